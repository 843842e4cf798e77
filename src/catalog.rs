//! The closed set of WIBL payload kinds (§3.3), their numeric ids, and the
//! byte-exact schemas of §3.5.
//!
//! Each `*Payload` type below is a thin builder: it owns exactly the fields
//! its schema names and knows how to lay them out, in order, into a
//! [`Serialiser`]. None of them touch the frame header: that is the
//! [`crate::writer::Writer`]'s job.
use crate::serialiser::Serialiser;
use crate::timestamp::TimeDatum;

/// The closed packet id space. Id `0` may only ever be produced by a
/// [`crate::writer::Writer`] itself; a producer requesting it is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum PacketId {
    Version = 0,
    SystemTime = 1,
    Attitude = 2,
    Depth = 3,
    Cog = 4,
    Gnss = 5,
    Environment = 6,
    Temperature = 7,
    Humidity = 8,
    Pressure = 9,
    NmeaString = 10,
    LocalImu = 11,
    Metadata = 12,
    Algorithms = 13,
    Json = 14,
    Nmea0183Id = 15,
}

impl PacketId {
    pub const fn as_u32(self) -> u32 {
        self as u32
    }
}

/// Serialiser version carried by the mandatory Version frame. Bumped
/// whenever this crate's wire-format encoding changes.
pub const SERIALISER_VERSION: (u16, u16) = (1, 0);
/// Subset of the NMEA 2000 PGN catalogue this crate understands (§4.2).
pub const N2K_VERSION: (u16, u16, u16) = (1, 0, 0);
/// NMEA-0183 talker/sentence protocol version understood by the ingress
/// state machine (§4.3).
pub const N1K_VERSION: (u16, u16, u16) = (4, 0, 0);

/// Id-0 payload: serialiser and talker protocol versions. Only ever
/// constructed by a [`crate::writer::Writer`], never by a producer.
#[derive(Debug, Clone, Copy)]
pub struct VersionPayload {
    pub serialiser: (u16, u16),
    pub n2k: (u16, u16, u16),
    pub n1k: (u16, u16, u16),
}

impl Default for VersionPayload {
    fn default() -> Self {
        Self {
            serialiser: SERIALISER_VERSION,
            n2k: N2K_VERSION,
            n1k: N1K_VERSION,
        }
    }
}

impl VersionPayload {
    pub fn to_buffer(&self) -> Serialiser {
        let mut buf = Serialiser::with_capacity(16);
        buf.append_u16(self.serialiser.0);
        buf.append_u16(self.serialiser.1);
        buf.append_u16(self.n2k.0);
        buf.append_u16(self.n2k.1);
        buf.append_u16(self.n2k.2);
        buf.append_u16(self.n1k.0);
        buf.append_u16(self.n1k.1);
        buf.append_u16(self.n1k.2);
        buf
    }
}

/// Id-12 payload: logger name and unique id, the second frame of every file.
#[derive(Debug, Clone)]
pub struct MetadataPayload {
    pub name: Vec<u8>,
    pub id: Vec<u8>,
}

impl MetadataPayload {
    pub fn new(name: impl Into<Vec<u8>>, id: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
        }
    }

    pub fn to_buffer(&self) -> Serialiser {
        let mut buf = Serialiser::with_capacity(8 + self.name.len() + self.id.len());
        buf.append_u32(self.name.len() as u32);
        buf.append_bytes(&self.name);
        buf.append_u32(self.id.len() as u32);
        buf.append_bytes(&self.id);
        buf
    }
}

/// Id-1 payload: absolute wall-clock datum. Carries its own date/time/tick
/// fields directly rather than a leading [`TimeDatum`]: this payload *is*
/// the datum other payloads' TimeDatum fields are queried from.
#[derive(Debug, Clone, Copy)]
pub struct SystemTimePayload {
    pub date: u16,
    pub seconds: f64,
    pub elapsed_ms: u32,
    pub source: u8,
}

impl SystemTimePayload {
    pub fn to_buffer(&self) -> Serialiser {
        let mut buf = Serialiser::with_capacity(15);
        buf.append_u16(self.date);
        buf.append_f64(self.seconds);
        buf.append_u32(self.elapsed_ms);
        buf.append_u8(self.source);
        buf
    }
}

/// Id-2 payload: yaw/pitch/roll, prefixed with a TimeDatum.
#[derive(Debug, Clone, Copy)]
pub struct AttitudePayload {
    pub time: TimeDatum,
    pub yaw: f64,
    pub pitch: f64,
    pub roll: f64,
}

impl AttitudePayload {
    pub fn to_buffer(&self) -> Serialiser {
        let mut buf = Serialiser::with_capacity(14 + 24);
        self.time.write_to(&mut buf);
        buf.append_f64(self.yaw);
        buf.append_f64(self.pitch);
        buf.append_f64(self.roll);
        buf
    }
}

/// Id-3 payload: observed depth, transducer offset, and scale range.
#[derive(Debug, Clone, Copy)]
pub struct DepthPayload {
    pub time: TimeDatum,
    pub depth: f64,
    pub offset: f64,
    pub range: f64,
}

impl DepthPayload {
    pub fn to_buffer(&self) -> Serialiser {
        let mut buf = Serialiser::with_capacity(14 + 24);
        self.time.write_to(&mut buf);
        buf.append_f64(self.depth);
        buf.append_f64(self.offset);
        buf.append_f64(self.range);
        buf
    }
}

/// Id-4 payload: course and speed over ground, true reference only (§3.3).
#[derive(Debug, Clone, Copy)]
pub struct CogPayload {
    pub time: TimeDatum,
    pub cog: f64,
    pub sog: f64,
}

impl CogPayload {
    pub fn to_buffer(&self) -> Serialiser {
        let mut buf = Serialiser::with_capacity(14 + 16);
        self.time.write_to(&mut buf);
        buf.append_f64(self.cog);
        buf.append_f64(self.sog);
        buf
    }
}

/// Id-5 payload: full GNSS fix. The leading TimeDatum and the in-message
/// date/time are two distinct fields: the factory populates the TimeDatum
/// from the source message's elapsed tick alone (no absolute date/time is
/// available from a raw PGN), then writes the message's own date/time again
/// as `date`/`seconds` below.
#[derive(Debug, Clone, Copy)]
pub struct GnssPayload {
    pub time: TimeDatum,
    pub date: u16,
    pub seconds: f64,
    pub lat: f64,
    pub lon: f64,
    pub alt: f64,
    pub rx_type: u8,
    pub rx_method: u8,
    pub n_svs: u8,
    pub hdop: f64,
    pub pdop: f64,
    pub geoid_sep: f64,
    pub n_ref_stations: u8,
    pub ref_type: u8,
    pub ref_id: u16,
    pub corr_age: f64,
}

impl GnssPayload {
    pub fn to_buffer(&self) -> Serialiser {
        let mut buf = Serialiser::with_capacity(14 + 64);
        self.time.write_to(&mut buf);
        buf.append_u16(self.date);
        buf.append_f64(self.seconds);
        buf.append_f64(self.lat);
        buf.append_f64(self.lon);
        buf.append_f64(self.alt);
        buf.append_u8(self.rx_type);
        buf.append_u8(self.rx_method);
        buf.append_u8(self.n_svs);
        buf.append_f64(self.hdop);
        buf.append_f64(self.pdop);
        buf.append_f64(self.geoid_sep);
        buf.append_u8(self.n_ref_stations);
        buf.append_u8(self.ref_type);
        buf.append_u16(self.ref_id);
        buf.append_f64(self.corr_age);
        buf
    }
}

/// Id-6 payload: temperature/humidity/pressure triple from one talker.
#[derive(Debug, Clone, Copy)]
pub struct EnvironmentPayload {
    pub time: TimeDatum,
    pub t_source: u8,
    pub temp: f64,
    pub h_source: u8,
    pub humidity: f64,
    pub pressure: f64,
}

impl EnvironmentPayload {
    pub fn to_buffer(&self) -> Serialiser {
        let mut buf = Serialiser::with_capacity(14 + 26);
        self.time.write_to(&mut buf);
        buf.append_u8(self.t_source);
        buf.append_f64(self.temp);
        buf.append_u8(self.h_source);
        buf.append_f64(self.humidity);
        buf.append_f64(self.pressure);
        buf
    }
}

/// Shared shape of ids 7 (Temperature), 8 (Humidity), and 9 (Pressure):
/// a single scalar reading plus its source tag.
#[derive(Debug, Clone, Copy)]
pub struct ScalarReadingPayload {
    pub time: TimeDatum,
    pub source: u8,
    pub value: f64,
}

impl ScalarReadingPayload {
    pub fn to_buffer(&self) -> Serialiser {
        let mut buf = Serialiser::with_capacity(14 + 9);
        self.time.write_to(&mut buf);
        buf.append_u8(self.source);
        buf.append_f64(self.value);
        buf
    }
}

/// Id-10 payload: an opaque, already CR/LF-terminated NMEA-0183 sentence
/// stamped with its elapsed-time of arrival. No TimeDatum.
#[derive(Debug, Clone)]
pub struct NmeaStringPayload {
    pub elapsed_ms: u32,
    pub sentence: Vec<u8>,
}

impl NmeaStringPayload {
    pub fn to_buffer(&self) -> Serialiser {
        let mut buf = Serialiser::with_capacity(4 + self.sentence.len());
        buf.append_u32(self.elapsed_ms);
        buf.append_bytes(&self.sentence);
        buf
    }
}

/// Raw/opaque payload for the ids the original specification enumerates in
/// the id space (§3.3) but does not give a byte-exact schema for: 11
/// (LocalIMU), 13 (Algorithms), 14 (JSON), 15 (NMEA0183ID filter list). The
/// crate still recognises these ids as part of the closed set a
/// [`crate::writer::Writer`] will happily frame, but leaves their internal
/// layout to the caller, who supplies already-encoded bytes (e.g. a UTF-8
/// JSON document for id 14).
#[derive(Debug, Clone)]
pub struct RawPayload {
    pub bytes: Vec<u8>,
}

impl RawPayload {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            bytes: bytes.into(),
        }
    }

    pub fn to_buffer(&self) -> Serialiser {
        let mut buf = Serialiser::with_capacity(self.bytes.len());
        buf.append_bytes(&self.bytes);
        buf
    }
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
