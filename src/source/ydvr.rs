//! Reader for the YDVR `.DAT` capture format (§4.2, §6.2): a flat sequence
//! of `{u16 timestamp, u32 can-id-or-sentinel, payload}` records with no
//! outer framing or length prefix.
use std::io::{self, Read};

use byteorder::{LittleEndian, ReadBytesExt};

use crate::error::SourceError;

use super::can_id::CanId;
use super::multipacket_pgns::is_multi_packet;
use super::{MAX_N2K_DATA, N2kMessage, PacketSource};

/// PGN carried by an ISO Request, always a fixed 3-byte payload.
const ISO_REQUEST_PGN: u32 = 59904;
/// Sentinel CAN id marking a YDVR control record (fixed 8-byte payload).
const CONTROL_SENTINEL: u32 = 0xFFFF_FFFF;

/// Reads NMEA 2000 messages out of a YDVR DAT byte stream.
pub struct YdvrReader<R> {
    inner: R,
}

impl<R: Read> YdvrReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    /// Read `buf.len()` bytes, or report a clean end-of-stream. Any other
    /// I/O failure is fatal and bubbles to the caller.
    fn fill_or_eof(&mut self, buf: &mut [u8]) -> Result<bool, SourceError> {
        match self.inner.read_exact(buf) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => Ok(false),
            Err(e) => Err(SourceError::Io(e)),
        }
    }
}

impl<R: Read> PacketSource for YdvrReader<R> {
    fn next_n2k(&mut self) -> Result<Option<N2kMessage>, SourceError> {
        let timestamp = match self.inner.read_u16::<LittleEndian>() {
            Ok(v) => v,
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(None),
            Err(e) => return Err(SourceError::Io(e)),
        };

        let mut id_bytes = [0u8; 4];
        if !self.fill_or_eof(&mut id_bytes)? {
            return Ok(None);
        }
        let raw_id = u32::from_le_bytes(id_bytes);

        if raw_id == CONTROL_SENTINEL {
            let mut payload = [0u8; 8];
            if !self.fill_or_eof(&mut payload)? {
                return Ok(None);
            }
            return Ok(Some(N2kMessage {
                pgn: CONTROL_SENTINEL,
                priority: 0,
                source: 0,
                destination: 0,
                elapsed_ms: timestamp as u32,
                data: payload.to_vec(),
            }));
        }

        let can_id = CanId::new(raw_id);
        let pgn = can_id.pgn();

        let payload_len = if pgn == ISO_REQUEST_PGN {
            3
        } else if is_multi_packet(pgn) {
            let mut len_bytes = [0u8; 2];
            if !self.fill_or_eof(&mut len_bytes)? {
                return Ok(None);
            }
            len_bytes[1] as usize
        } else {
            8
        };

        if payload_len > MAX_N2K_DATA {
            return Err(SourceError::DataTooLarge {
                len: payload_len,
                max: MAX_N2K_DATA,
            });
        }

        let mut payload = vec![0u8; payload_len];
        if !self.fill_or_eof(&mut payload)? {
            return Ok(None);
        }

        Ok(Some(N2kMessage {
            pgn,
            priority: can_id.priority(),
            source: can_id.source(),
            destination: can_id.destination(),
            elapsed_ms: timestamp as u32,
            data: payload,
        }))
    }

    fn next_nmea0183(&mut self) -> Result<Option<(u32, Vec<u8>)>, SourceError> {
        Err(SourceError::Unimplemented)
    }

    fn is_n2k(&self) -> bool {
        true
    }
}

#[cfg(test)]
#[path = "ydvr_tests.rs"]
mod tests;
