//! Frames a [`Serialiser`] buffer with a `{packet-id, byte-length}` header
//! and writes it to a byte sink, injecting the mandatory Version and
//! Metadata frames ahead of the first user record (§4.1, §5, §6.1).
use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};

use crate::catalog::{MetadataPayload, PacketId, VersionPayload};
use crate::error::WriterError;
use crate::serialiser::Serialiser;

/// Read-only counters a collaborator (e.g. the command shell of §6.6) can
/// poll without touching the Writer's exclusive authority over the sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct WriterStats {
    pub frames_written: u64,
    pub bytes_written: u64,
}

/// Frames buffers onto a byte sink in call order. Owns the sink exclusively;
/// a Writer never shares it, matching the single-threaded, cooperative
/// resource model of §5.
pub struct Writer<W: Write> {
    sink: W,
    metadata: MetadataPayload,
    preamble_emitted: bool,
    stats: WriterStats,
}

impl<W: Write> Writer<W> {
    /// Construct a Writer over `sink`. `metadata` is captured up front so
    /// the lazily-emitted Metadata frame never needs interior mutability to
    /// materialise late.
    pub fn new(sink: W, metadata: MetadataPayload) -> Self {
        Self {
            sink,
            metadata,
            preamble_emitted: false,
            stats: WriterStats::default(),
        }
    }

    pub fn stats(&self) -> WriterStats {
        self.stats
    }

    /// Record one frame. `id == 0` is always rejected, even on the very
    /// first call: the Version frame is the Writer's own, not a
    /// producer's. The first successful call additionally emits Version
    /// then Metadata ahead of the requested frame; neither frame is ever
    /// repeated on subsequent calls.
    pub fn record(&mut self, id: u32, buf: &Serialiser) -> Result<(), WriterError> {
        if id == PacketId::Version.as_u32() {
            return Err(WriterError::InvalidArgument);
        }

        if !self.preamble_emitted {
            let version_buf = VersionPayload::default().to_buffer();
            self.write_frame(PacketId::Version.as_u32(), &version_buf)?;

            let metadata_buf = self.metadata.to_buffer();
            self.write_frame(PacketId::Metadata.as_u32(), &metadata_buf)?;

            self.preamble_emitted = true;
        }

        self.write_frame(id, buf)
    }

    fn write_frame(&mut self, id: u32, buf: &Serialiser) -> Result<(), WriterError> {
        self.sink.write_u32::<LittleEndian>(id)?;
        self.sink.write_u32::<LittleEndian>(buf.len())?;
        self.sink.write_all(buf.as_bytes())?;

        self.stats.frames_written += 1;
        self.stats.bytes_written += 8 + buf.len() as u64;
        Ok(())
    }

    /// Consume the Writer and return the underlying sink (e.g. so a
    /// collaborator can fsync or close a file handle).
    pub fn into_inner(self) -> W {
        self.sink
    }
}

#[cfg(test)]
#[path = "writer_tests.rs"]
mod tests;
