//! WIBL binary log format, packet conversion pipeline, and NMEA simulator.
//!
//! This crate implements the three pieces of engineering that make up the
//! WIBL format: the [`catalog`]/[`serialiser`]/[`writer`] triad that frames
//! and emits the binary wire format itself, the [`source`] readers and
//! factory that turn foreign logs (Yacht Devices YDVR, TeamSurv) into WIBL
//! frames, and the [`simulator`] engine that produces deterministic
//! reference WIBL files for testing.
//!
//! Command/control surfaces, log rotation, and cloud orchestration are
//! deliberately out of scope; collaborators integrate through
//! [`writer::Writer`], [`source::PacketSource`], and
//! [`source::factory::SerialisableFactory`] only.

pub mod catalog;
pub mod error;
pub mod nmea0183;
pub mod serialiser;
pub mod simulator;
pub mod source;
pub mod timestamp;
pub mod writer;
