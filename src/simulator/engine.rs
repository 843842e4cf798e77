//! Event-driven generator producing synthetic time/position/depth records
//! (§4.4): each step advances simulated time to the earliest of three
//! scheduled update ticks, then updates the time datum, walks position, and
//! walks depth, in that order, emitting binary WIBL records and/or ASCII
//! NMEA-0183 sentences through a [`Writer`].
use std::io::Write as IoWrite;

use crate::catalog::{DepthPayload, GnssPayload, NmeaStringPayload, PacketId, SystemTimePayload};
use crate::error::WriterError;
use crate::timestamp::TimeDatum;
use crate::writer::Writer;

use super::rng::SimRng;
use super::sentences;
use super::state::{SimulatorConfig, State};

/// NMEA 2000 "GPS" source tag for the simulator's always-GPS-sourced
/// SystemTime records.
const SOURCE_GPS: u8 = 0;

/// Which representation(s) of each update the engine emits. At least one
/// must be active; the simulator binary defaults to `binary` when neither
/// `-s` nor `-b` is given (§4.4).
#[derive(Debug, Clone, Copy)]
pub struct OutputMode {
    pub binary: bool,
    pub serial: bool,
}

impl OutputMode {
    pub fn new(serial: bool, binary: bool) -> Self {
        if !serial && !binary {
            Self { binary: true, serial: false }
        } else {
            Self { serial, binary }
        }
    }
}

/// Cumulative counts of records emitted, for a `--stats`-style summary.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatorStats {
    pub time_updates: u64,
    pub position_updates: u64,
    pub depth_updates: u64,
}

/// Owns the simulation [`State`], its [`SimRng`], and the [`Writer`] it
/// emits through. The engine has exclusive ownership of all three, no
/// shared pointers, matching the systems-language re-architecture of §9.
pub struct Engine<W: IoWrite> {
    state: State,
    rng: SimRng,
    writer: Writer<W>,
    ticks_per_second: u64,
    mode: OutputMode,
    stats: SimulatorStats,
}

impl<W: IoWrite> Engine<W> {
    pub fn new(
        writer: Writer<W>,
        config: SimulatorConfig,
        mode: OutputMode,
        seed: u64,
        ticks_per_second: u64,
    ) -> Self {
        Self {
            state: State::new(&config, ticks_per_second),
            rng: SimRng::from_seed(seed),
            writer,
            ticks_per_second,
            mode,
            stats: SimulatorStats::default(),
        }
    }

    pub fn stats(&self) -> SimulatorStats {
        self.stats
    }

    /// Run until the simulated tick counter reaches `duration_ticks`.
    pub fn run(&mut self, duration_ticks: u64) -> Result<(), WriterError> {
        while self.state.sim_time.tick_count < duration_ticks {
            self.step()?;
        }
        Ok(())
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    /// Advance to the earliest scheduled tick and fire every subsystem
    /// whose target matches it, in the fixed order time → position →
    /// depth (§4.4).
    fn step(&mut self) -> Result<(), WriterError> {
        let now = self
            .state
            .target_reference_time
            .min(self.state.target_depth_time)
            .min(self.state.target_position_time);
        self.state.sim_time.tick_count = now;

        if self.state.target_reference_time == now {
            self.update_time_datum(now)?;
        }
        if self.state.target_position_time == now {
            self.walk_position(now)?;
        }
        if self.state.target_depth_time == now {
            self.walk_depth(now)?;
        }
        Ok(())
    }

    fn update_time_datum(&mut self, now: u64) -> Result<(), WriterError> {
        self.state.ref_time.advance_one_second(now);
        self.state.target_reference_time = now + self.ticks_per_second;
        self.stats.time_updates += 1;

        if self.mode.binary {
            let payload = SystemTimePayload {
                date: self.state.ref_time.days_since_epoch(),
                seconds: self.state.ref_time.seconds_of_day(),
                elapsed_ms: now as u32,
                source: SOURCE_GPS,
            };
            self.writer
                .record(PacketId::SystemTime.as_u32(), &payload.to_buffer())?;
        }
        if self.mode.serial {
            self.emit_sentence(now, sentences::format_zda(&self.state.ref_time))?;
        }
        Ok(())
    }

    fn walk_position(&mut self, now: u64) -> Result<(), WriterError> {
        let hour_in_ticks = self.ticks_per_second * 3600;
        if now.wrapping_sub(self.state.last_latitude_reversal) >= hour_in_ticks {
            self.state.latitude_scale = self.state.latitude_scale.reversed();
            self.state.last_latitude_reversal = now;
        }

        self.state.latitude += self.state.latitude_scale.sign() * self.state.position_step;
        self.state.longitude += self.state.position_step;
        self.state.target_position_time = now + self.ticks_per_second;
        self.stats.position_updates += 1;

        if self.mode.binary {
            let time = TimeDatum {
                datestamp: self.state.ref_time.days_since_epoch(),
                timestamp: self.state.ref_time.seconds_of_day(),
                raw_elapsed: now as u32,
            };
            let payload = GnssPayload {
                time,
                date: self.state.ref_time.days_since_epoch(),
                seconds: self.state.ref_time.seconds_of_day(),
                lat: self.state.latitude,
                lon: self.state.longitude,
                alt: 0.0,
                rx_type: 0,
                rx_method: 1,
                n_svs: 8,
                hdop: 0.9,
                pdop: 1.2,
                geoid_sep: 0.0,
                n_ref_stations: 0,
                ref_type: 0,
                ref_id: 0,
                corr_age: 0.0,
            };
            self.writer.record(PacketId::Gnss.as_u32(), &payload.to_buffer())?;
        }
        if self.mode.serial {
            let sentence =
                sentences::format_gga(&self.state.ref_time, self.state.latitude, self.state.longitude);
            self.emit_sentence(now, sentence)?;
        }
        Ok(())
    }

    fn walk_depth(&mut self, now: u64) -> Result<(), WriterError> {
        self.state.depth += self.state.depth_random_walk * self.rng.unit_normal();
        let jitter = self.rng.unit_uniform();
        let next_interval = (self.ticks_per_second as f64 * (1.0 + jitter)) as u64;
        self.state.target_depth_time = now + next_interval.max(1);
        self.stats.depth_updates += 1;

        if self.mode.binary {
            let time = TimeDatum {
                datestamp: 0,
                timestamp: -1.0,
                raw_elapsed: now as u32,
            };
            let payload = DepthPayload {
                time,
                depth: self.state.depth,
                offset: 0.0,
                range: self.state.measurement_uncertainty,
            };
            self.writer.record(PacketId::Depth.as_u32(), &payload.to_buffer())?;
        }
        if self.mode.serial {
            self.emit_sentence(now, sentences::format_dbt(self.state.depth))?;
        }
        Ok(())
    }

    fn emit_sentence(&mut self, now: u64, sentence: Vec<u8>) -> Result<(), WriterError> {
        let buf = NmeaStringPayload {
            elapsed_ms: now as u32,
            sentence,
        }
        .to_buffer();
        self.writer.record(PacketId::NmeaString.as_u32(), &buf)
    }
}
