//! Packet sources and the converters layered on top of them (§4.2).
//!
//! A [`PacketSource`] is a pull-based cursor over one physical log: either a
//! stream of NMEA 2000 messages, or a stream of raw NMEA-0183 sentences;
//! never both from the same concrete source, per the original two-method
//! interface. [`PacketSourceExt::next_batch`] is a thin convenience layered
//! on top for callers (the converter CLI) that don't care which kind of
//! source they were handed.
use crate::error::SourceError;

pub mod can_id;
pub mod factory;
pub mod multipacket_pgns;
pub mod teamsurv;
pub mod ydvr;

/// Largest payload a single NMEA 2000 message (fast-packet reassembled or
/// not) may carry. Matches the ISO 11783/NMEA 2000 fast-packet ceiling.
pub const MAX_N2K_DATA: usize = 223;

/// One decoded NMEA 2000 message, as delivered by a [`PacketSource`].
#[derive(Debug, Clone, PartialEq)]
pub struct N2kMessage {
    pub pgn: u32,
    pub priority: u8,
    pub source: u8,
    pub destination: u8,
    pub elapsed_ms: u32,
    pub data: Vec<u8>,
}

/// A uniform view over whichever kind of record a [`PacketSource`] produced,
/// for callers that just want "the next thing" (§4.2 design note).
#[derive(Debug, Clone, PartialEq)]
pub enum PacketBatch {
    N2k(N2kMessage),
    Nmea0183 { elapsed_ms: u32, sentence: Vec<u8> },
}

/// A pull-based source of either NMEA 2000 messages or raw NMEA-0183
/// sentences. A concrete source implements exactly one side; the other
/// returns [`SourceError::Unimplemented`].
pub trait PacketSource {
    /// Pull the next NMEA 2000 message, or `Ok(None)` at clean end-of-stream.
    fn next_n2k(&mut self) -> Result<Option<N2kMessage>, SourceError>;

    /// Pull the next raw, already-validated NMEA-0183 sentence and its
    /// elapsed time of arrival, or `Ok(None)` at clean end-of-stream.
    fn next_nmea0183(&mut self) -> Result<Option<(u32, Vec<u8>)>, SourceError>;

    /// `true` if this source produces NMEA 2000 messages rather than raw
    /// NMEA-0183 sentences.
    fn is_n2k(&self) -> bool;
}

/// Convenience extension giving every [`PacketSource`] a single pull method.
pub trait PacketSourceExt: PacketSource {
    fn next_batch(&mut self) -> Result<Option<PacketBatch>, SourceError> {
        if self.is_n2k() {
            Ok(self.next_n2k()?.map(PacketBatch::N2k))
        } else {
            Ok(self
                .next_nmea0183()?
                .map(|(elapsed_ms, sentence)| PacketBatch::Nmea0183 { elapsed_ms, sentence }))
        }
    }
}

impl<T: PacketSource + ?Sized> PacketSourceExt for T {}
