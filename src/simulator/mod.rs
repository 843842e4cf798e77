//! Deterministic NMEA simulator (§4.4): an event-driven generator that
//! produces synthetic time/position/depth records and emits them as WIBL
//! binary frames and/or ASCII NMEA-0183 sentences through a [`Writer`].
//!
//! [`engine::Engine`] owns a [`state::State`] and a [`rng::SimRng`]
//! exclusively (§9) and threads a `&mut` [`crate::writer::Writer`] through
//! its generator calls rather than sharing ownership, per the
//! systems-language re-architecture noted in the original design.

pub mod engine;
pub mod rng;
pub mod sentences;
pub mod state;

pub use engine::{Engine, OutputMode, SimulatorStats};
pub use state::SimulatorConfig;

/// Ticks per second of the simulator's monotonic clock. `1000` models the
/// embedded logger's millisecond counter (§3.4), so simulator output is
/// directly comparable to on-vessel logger output (§4.4 supplement).
pub const TICKS_PER_SECOND: u64 = crate::timestamp::TICKS_PER_SECOND;
