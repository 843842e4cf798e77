//! Reader for TeamSurv-style plain NMEA-0183 capture files (§4.2, §6.3):
//! one CRLF-terminated sentence per line, no timestamps.
use std::io::{self, BufRead};

use crate::error::SourceError;
use crate::nmea0183::is_valid_sentence;

use super::{N2kMessage, PacketSource};

/// Reads NMEA-0183 sentences out of a line-oriented TeamSurv capture.
/// Every emitted sentence is stamped with elapsed time `0`: the format
/// carries no timestamps of its own.
pub struct TeamSurvReader<R> {
    lines: io::Lines<R>,
}

impl<R: BufRead> TeamSurvReader<R> {
    pub fn new(inner: R) -> Self {
        Self {
            lines: inner.lines(),
        }
    }
}

impl<R: BufRead> PacketSource for TeamSurvReader<R> {
    fn next_n2k(&mut self) -> Result<Option<N2kMessage>, SourceError> {
        Err(SourceError::Unimplemented)
    }

    /// Pull the next acceptable sentence. Rejected lines (too short, not
    /// `$`-prefixed, or a bad checksum) are silently skipped, per §4.2; the
    /// search continues until an acceptable line is found or the stream
    /// ends.
    fn next_nmea0183(&mut self) -> Result<Option<(u32, Vec<u8>)>, SourceError> {
        loop {
            let line = match self.lines.next() {
                None => return Ok(None),
                Some(line) => line.map_err(SourceError::Io)?,
            };

            let sentence = line.into_bytes();
            if is_acceptable(&sentence) {
                return Ok(Some((0, sentence)));
            }
            tracing::debug!(len = sentence.len(), "teamsurv: rejected sentence");
        }
    }

    fn is_n2k(&self) -> bool {
        false
    }
}

/// `length > 11`, starts with `$`, third-from-last byte is `*`, last two
/// bytes are the uppercase hex XOR checksum of bytes `[1 .. *-1]` (§4.2).
/// `io::Lines` has already stripped the line's terminating `\n`/`\r\n`, so
/// the "last two bytes" here are the checksum digits themselves.
fn is_acceptable(sentence: &[u8]) -> bool {
    if sentence.len() <= 11 || sentence[0] != b'$' {
        return false;
    }
    if sentence[sentence.len() - 3] != b'*' {
        return false;
    }
    is_valid_sentence(sentence)
}
