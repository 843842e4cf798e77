//! Timestamp datum model (§3.4): an absolute time fix paired with the
//! monotonic tick counter it was valid at, plus the query that projects it
//! forward to "now".
use crate::serialiser::Serialiser;

/// Ticks per second of the monotonic counter driving [`Timestamp::query`].
/// `1000` models an embedded millisecond counter (the on-vessel logger
/// build); a simulator or host build using a different monotonic clock
/// would set this to its own resolution. The original source conflated this
/// with `CLOCKS_PER_SEC` in places; this crate keeps the two concepts
/// distinct and explicit, per the redesign note.
pub const TICKS_PER_SECOND: u64 = 1000;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// An absolute time datum: the last known wall-clock fix and the monotonic
/// tick it was observed at. `datum_seconds < 0` marks the datum
/// uninitialised; all other fields are meaningless until it is set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timestamp {
    datum_date: u16,
    datum_seconds: f64,
    elapsed_at_datum: u64,
}

impl Timestamp {
    /// An uninitialised datum: `query` still works (ticks since construction
    /// project forward from a negative `datum_seconds`), but callers should
    /// check [`Timestamp::is_valid`] before trusting the result.
    pub fn uninitialised() -> Self {
        Self {
            datum_date: 0,
            datum_seconds: -1.0,
            elapsed_at_datum: 0,
        }
    }

    /// Set (or replace) the absolute datum.
    pub fn set_datum(&mut self, date: u16, seconds_since_midnight: f64, elapsed_ticks: u64) {
        self.datum_date = date;
        self.datum_seconds = seconds_since_midnight;
        self.elapsed_at_datum = elapsed_ticks;
    }

    /// `true` once a real datum has been set.
    pub fn is_valid(&self) -> bool {
        self.datum_seconds >= 0.0
    }

    /// Project the datum forward to `raw_elapsed_now` ticks, handling at
    /// most one day rollover. The tick difference wraps modulo 2^32 (the
    /// embedded counter's width), matching the source's 32-bit tick
    /// assumption.
    pub fn query(&self, raw_elapsed_now: u64) -> TimeDatum {
        let diff = (raw_elapsed_now as u32).wrapping_sub(self.elapsed_at_datum as u32);

        let mut timestamp = self.datum_seconds + (diff as f64) / (TICKS_PER_SECOND as f64);
        let mut datestamp = self.datum_date;
        if timestamp > SECONDS_PER_DAY {
            datestamp = datestamp.wrapping_add(1);
            timestamp -= SECONDS_PER_DAY;
        }

        TimeDatum {
            datestamp,
            timestamp,
            raw_elapsed: diff,
        }
    }
}

/// A resolved time query, ready to serialise as the leading field of most
/// payload schemas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeDatum {
    pub datestamp: u16,
    pub timestamp: f64,
    pub raw_elapsed: u32,
}

impl TimeDatum {
    /// Serialise as `{u16 date, f64 seconds, u32 elapsed_ms}`.
    pub fn write_to(&self, buf: &mut Serialiser) {
        buf.append_u16(self.datestamp);
        buf.append_f64(self.timestamp);
        buf.append_u32(self.raw_elapsed);
    }
}

#[cfg(test)]
#[path = "timestamp_tests.rs"]
mod tests;
