//! Maps a decoded [`N2kMessage`] onto the WIBL payload catalog (§4.2): the
//! PGN→packet-id table, the per-PGN NMEA 2000 field layouts, and the §3.3
//! filter rules that silently drop some parsed messages.
use crate::catalog::{
    AttitudePayload, CogPayload, DepthPayload, EnvironmentPayload, GnssPayload,
    NmeaStringPayload, PacketId, ScalarReadingPayload, SystemTimePayload,
};
use crate::serialiser::Serialiser;
use crate::timestamp::TimeDatum;

use super::N2kMessage;

/// Outcome of feeding one [`N2kMessage`] to [`SerialisableFactory::convert`].
#[derive(Debug)]
pub enum ConversionOutcome {
    /// The message converted to a WIBL frame of the given packet id.
    Emit(PacketId, Serialiser),
    /// The PGN is recognised but this particular message failed a §3.3
    /// filter rule (e.g. a non-true COG reference). Counted separately from
    /// `Unsupported` in caller statistics.
    Filtered,
    /// The PGN has no counterpart in the closed WIBL catalog, or its data
    /// was too short to parse (§7 `Parse`, never surfaced to the caller).
    Unsupported,
}

/// A TimeDatum built from a raw message's elapsed tick alone: no absolute
/// date/time is available from a bare PGN, so the date is zero and the
/// seconds-of-day field carries the "uninitialised" sentinel of §3.4.
fn elapsed_only_datum(elapsed_ms: u32) -> TimeDatum {
    TimeDatum {
        datestamp: 0,
        timestamp: -1.0,
        raw_elapsed: elapsed_ms,
    }
}

/// Little-endian cursor over a PGN's data bytes, returning `None` (rather
/// than panicking) on a short read so a truncated/malformed message is
/// silently treated as `Unsupported`/`Parse` per §7.
struct FieldReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> FieldReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, n: usize) -> Option<&'a [u8]> {
        let end = self.pos.checked_add(n)?;
        let slice = self.data.get(self.pos..end)?;
        self.pos = end;
        Some(slice)
    }

    fn u8(&mut self) -> Option<u8> {
        Some(self.take(1)?[0])
    }

    fn u16(&mut self) -> Option<u16> {
        Some(u16::from_le_bytes(self.take(2)?.try_into().ok()?))
    }

    fn i16(&mut self) -> Option<i16> {
        Some(i16::from_le_bytes(self.take(2)?.try_into().ok()?))
    }

    fn u32(&mut self) -> Option<u32> {
        Some(u32::from_le_bytes(self.take(4)?.try_into().ok()?))
    }

    fn i32(&mut self) -> Option<i32> {
        Some(i32::from_le_bytes(self.take(4)?.try_into().ok()?))
    }

    fn i64(&mut self) -> Option<i64> {
        Some(i64::from_le_bytes(self.take(8)?.try_into().ok()?))
    }
}

/// NMEA 2000 "Source" enumeration values relevant to the §3.3 filter rules.
mod source_tags {
    pub const LOCAL_CRYSTAL_CLOCK: u8 = 5;
    pub const SEA_TEMPERATURE: u8 = 0;
    pub const OUTSIDE_TEMPERATURE: u8 = 1;
    pub const OUTSIDE_HUMIDITY: u8 = 1;
    pub const ATMOSPHERIC_PRESSURE: u8 = 0;
    pub const TRUE_HEADING_REFERENCE: u8 = 0;
}

/// Stateless mapper from [`N2kMessage`] to WIBL catalog frames.
pub struct SerialisableFactory;

impl SerialisableFactory {
    /// Convert one message. `None` data slices or PGNs outside the
    /// supported table yield [`ConversionOutcome::Unsupported`]; messages
    /// that parse but fail a §3.3 filter rule yield
    /// [`ConversionOutcome::Filtered`].
    pub fn convert(msg: &N2kMessage) -> ConversionOutcome {
        match msg.pgn {
            126_992 => Self::system_time(msg),
            127_257 => Self::attitude(msg),
            128_267 => Self::depth(msg),
            129_026 => Self::cog(msg),
            129_029 => Self::gnss(msg),
            130_311 => Self::environment(msg),
            130_312 | 130_316 => Self::temperature(msg),
            130_313 => Self::humidity(msg),
            130_314 => Self::pressure(msg),
            _ => ConversionOutcome::Unsupported,
        }
    }

    fn system_time(msg: &N2kMessage) -> ConversionOutcome {
        let mut r = FieldReader::new(&msg.data);
        let Some(_sid) = r.u8() else {
            return ConversionOutcome::Unsupported;
        };
        let Some(source_and_reserved) = r.u8() else {
            return ConversionOutcome::Unsupported;
        };
        let Some(date) = r.u16() else {
            return ConversionOutcome::Unsupported;
        };
        let Some(raw_time) = r.u32() else {
            return ConversionOutcome::Unsupported;
        };

        let source = source_and_reserved & 0x0F;
        if source == source_tags::LOCAL_CRYSTAL_CLOCK {
            return ConversionOutcome::Filtered;
        }

        let payload = SystemTimePayload {
            date,
            seconds: raw_time as f64 * 0.0001,
            elapsed_ms: msg.elapsed_ms,
            source,
        };
        ConversionOutcome::Emit(PacketId::SystemTime, payload.to_buffer())
    }

    fn attitude(msg: &N2kMessage) -> ConversionOutcome {
        let mut r = FieldReader::new(&msg.data);
        let (Some(_sid), Some(yaw), Some(pitch), Some(roll)) =
            (r.u8(), r.i16(), r.i16(), r.i16())
        else {
            return ConversionOutcome::Unsupported;
        };

        let payload = AttitudePayload {
            time: elapsed_only_datum(msg.elapsed_ms),
            yaw: yaw as f64 * 0.0001,
            pitch: pitch as f64 * 0.0001,
            roll: roll as f64 * 0.0001,
        };
        ConversionOutcome::Emit(PacketId::Attitude, payload.to_buffer())
    }

    fn depth(msg: &N2kMessage) -> ConversionOutcome {
        let mut r = FieldReader::new(&msg.data);
        let (Some(_sid), Some(depth), Some(offset), Some(range)) =
            (r.u8(), r.u32(), r.i16(), r.u8())
        else {
            return ConversionOutcome::Unsupported;
        };

        let payload = DepthPayload {
            time: elapsed_only_datum(msg.elapsed_ms),
            depth: depth as f64 * 0.01,
            offset: offset as f64 * 0.001,
            range: range as f64 * 10.0,
        };
        ConversionOutcome::Emit(PacketId::Depth, payload.to_buffer())
    }

    fn cog(msg: &N2kMessage) -> ConversionOutcome {
        let mut r = FieldReader::new(&msg.data);
        let (Some(_sid), Some(reference_byte), Some(cog), Some(sog)) =
            (r.u8(), r.u8(), r.u16(), r.u16())
        else {
            return ConversionOutcome::Unsupported;
        };

        if (reference_byte & 0x03) != source_tags::TRUE_HEADING_REFERENCE {
            return ConversionOutcome::Filtered;
        }

        let payload = CogPayload {
            time: elapsed_only_datum(msg.elapsed_ms),
            cog: cog as f64 * 0.0001,
            sog: sog as f64 * 0.01,
        };
        ConversionOutcome::Emit(PacketId::Cog, payload.to_buffer())
    }

    fn gnss(msg: &N2kMessage) -> ConversionOutcome {
        let mut r = FieldReader::new(&msg.data);
        let Some(_sid) = r.u8() else {
            return ConversionOutcome::Unsupported;
        };
        let (Some(date), Some(raw_time), Some(lat_raw), Some(lon_raw), Some(alt_raw)) =
            (r.u16(), r.u32(), r.i64(), r.i64(), r.i64())
        else {
            return ConversionOutcome::Unsupported;
        };
        let Some(type_and_method) = r.u8() else {
            return ConversionOutcome::Unsupported;
        };
        let Some(_integrity) = r.u8() else {
            return ConversionOutcome::Unsupported;
        };
        let (Some(n_svs), Some(hdop), Some(pdop), Some(geoid_sep), Some(n_ref_stations)) =
            (r.u8(), r.i16(), r.i16(), r.i32(), r.u8())
        else {
            return ConversionOutcome::Unsupported;
        };

        let (ref_type, ref_id, corr_age) = if n_ref_stations > 0 {
            match (r.u16(), r.u16()) {
                (Some(type_and_id), Some(age)) => (
                    (type_and_id & 0x000F) as u8,
                    (type_and_id >> 4) & 0x0FFF,
                    age as f64 * 0.01,
                ),
                _ => (0, 0, 0.0),
            }
        } else {
            (0, 0, 0.0)
        };

        // This PGN writes its own date/time twice: once inside the leading
        // TimeDatum (elapsed-only, per the factory's general rule) and once
        // again as the in-message date/time fields below (§4.2).
        let payload = GnssPayload {
            time: elapsed_only_datum(msg.elapsed_ms),
            date,
            seconds: raw_time as f64 * 0.0001,
            lat: lat_raw as f64 * 1e-16,
            lon: lon_raw as f64 * 1e-16,
            alt: alt_raw as f64 * 1e-6,
            rx_type: type_and_method >> 4,
            rx_method: type_and_method & 0x0F,
            n_svs,
            hdop: hdop as f64 * 0.01,
            pdop: pdop as f64 * 0.01,
            geoid_sep: geoid_sep as f64 * 0.01,
            n_ref_stations,
            ref_type,
            ref_id,
            corr_age,
        };
        ConversionOutcome::Emit(PacketId::Gnss, payload.to_buffer())
    }

    fn environment(msg: &N2kMessage) -> ConversionOutcome {
        let mut r = FieldReader::new(&msg.data);
        let (Some(_sid), Some(source_byte), Some(temp_raw), Some(hum_raw), Some(press_raw)) =
            (r.u8(), r.u8(), r.u16(), r.i16(), r.u16())
        else {
            return ConversionOutcome::Unsupported;
        };

        let payload = EnvironmentPayload {
            time: elapsed_only_datum(msg.elapsed_ms),
            t_source: source_byte & 0x3F,
            temp: temp_raw as f64 * 0.01,
            h_source: (source_byte >> 6) & 0x03,
            humidity: hum_raw as f64 * 0.004,
            pressure: press_raw as f64,
        };
        ConversionOutcome::Emit(PacketId::Environment, payload.to_buffer())
    }

    fn temperature(msg: &N2kMessage) -> ConversionOutcome {
        let mut r = FieldReader::new(&msg.data);
        let (Some(_sid), Some(_instance), Some(source), Some(temp_raw)) =
            (r.u8(), r.u8(), r.u8(), r.u16())
        else {
            return ConversionOutcome::Unsupported;
        };

        if source != source_tags::SEA_TEMPERATURE && source != source_tags::OUTSIDE_TEMPERATURE {
            return ConversionOutcome::Filtered;
        }

        let payload = ScalarReadingPayload {
            time: elapsed_only_datum(msg.elapsed_ms),
            source,
            value: temp_raw as f64 * 0.01,
        };
        ConversionOutcome::Emit(PacketId::Temperature, payload.to_buffer())
    }

    fn humidity(msg: &N2kMessage) -> ConversionOutcome {
        let mut r = FieldReader::new(&msg.data);
        let (Some(_sid), Some(_instance), Some(source), Some(hum_raw)) =
            (r.u8(), r.u8(), r.u8(), r.i16())
        else {
            return ConversionOutcome::Unsupported;
        };

        if source != source_tags::OUTSIDE_HUMIDITY {
            return ConversionOutcome::Filtered;
        }

        let payload = ScalarReadingPayload {
            time: elapsed_only_datum(msg.elapsed_ms),
            source,
            value: hum_raw as f64 * 0.004,
        };
        ConversionOutcome::Emit(PacketId::Humidity, payload.to_buffer())
    }

    fn pressure(msg: &N2kMessage) -> ConversionOutcome {
        let mut r = FieldReader::new(&msg.data);
        let (Some(_sid), Some(_instance), Some(source), Some(press_raw)) =
            (r.u8(), r.u8(), r.u8(), r.u32())
        else {
            return ConversionOutcome::Unsupported;
        };

        if source != source_tags::ATMOSPHERIC_PRESSURE {
            return ConversionOutcome::Filtered;
        }

        let payload = ScalarReadingPayload {
            time: elapsed_only_datum(msg.elapsed_ms),
            source,
            value: press_raw as f64 * 0.1,
        };
        ConversionOutcome::Emit(PacketId::Pressure, payload.to_buffer())
    }

    /// Map a raw NMEA-0183 sentence (from a source like [`super::teamsurv`])
    /// to an id-10 frame: `u32 elapsed | raw_sentence_bytes`, no TimeDatum.
    pub fn nmea0183_frame(elapsed_ms: u32, sentence: Vec<u8>) -> Serialiser {
        NmeaStringPayload { elapsed_ms, sentence }.to_buffer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(pgn: u32, data: Vec<u8>) -> N2kMessage {
        N2kMessage {
            pgn,
            priority: 2,
            source: 0,
            destination: 0xFF,
            elapsed_ms: 1234,
            data,
        }
    }

    #[test]
    fn test_unsupported_pgn() {
        let m = msg(999_999, vec![0; 8]);
        assert!(matches!(
            SerialisableFactory::convert(&m),
            ConversionOutcome::Unsupported
        ));
    }

    #[test]
    fn test_system_time_local_crystal_clock_filtered() {
        let mut data = vec![0u8]; // sid
        data.push(5); // source = LocalCrystalClock
        data.extend_from_slice(&100u16.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        let m = msg(126_992, data);
        assert!(matches!(
            SerialisableFactory::convert(&m),
            ConversionOutcome::Filtered
        ));
    }

    #[test]
    fn test_system_time_gnss_source_emitted() {
        let mut data = vec![0u8];
        data.push(0); // source = GPS
        data.extend_from_slice(&100u16.to_le_bytes());
        data.extend_from_slice(&0u32.to_le_bytes());
        let m = msg(126_992, data);
        assert!(matches!(
            SerialisableFactory::convert(&m),
            ConversionOutcome::Emit(PacketId::SystemTime, _)
        ));
    }

    #[test]
    fn test_cog_magnetic_reference_filtered() {
        let mut data = vec![0u8, 1]; // reference = magnetic (1)
        data.extend_from_slice(&0u16.to_le_bytes());
        data.extend_from_slice(&0u16.to_le_bytes());
        let m = msg(129_026, data);
        assert!(matches!(
            SerialisableFactory::convert(&m),
            ConversionOutcome::Filtered
        ));
    }

    #[test]
    fn test_cog_true_reference_emitted() {
        let mut data = vec![0u8, 0]; // reference = true (0)
        data.extend_from_slice(&0u16.to_le_bytes());
        data.extend_from_slice(&0u16.to_le_bytes());
        let m = msg(129_026, data);
        assert!(matches!(
            SerialisableFactory::convert(&m),
            ConversionOutcome::Emit(PacketId::Cog, _)
        ));
    }

    #[test]
    fn test_temperature_inside_cabin_filtered() {
        let data = vec![0u8, 0, 2, 0, 0]; // source = 2 (inside, not sea/outside)
        let m = msg(130_312, data);
        assert!(matches!(
            SerialisableFactory::convert(&m),
            ConversionOutcome::Filtered
        ));
    }

    #[test]
    fn test_temperature_sea_emitted() {
        let data = vec![0u8, 0, 0, 0, 0];
        let m = msg(130_312, data);
        assert!(matches!(
            SerialisableFactory::convert(&m),
            ConversionOutcome::Emit(PacketId::Temperature, _)
        ));
    }

    #[test]
    fn test_truncated_message_is_unsupported() {
        let m = msg(128_267, vec![0u8; 2]);
        assert!(matches!(
            SerialisableFactory::convert(&m),
            ConversionOutcome::Unsupported
        ));
    }

    #[test]
    fn test_nmea0183_frame_layout() {
        let buf = SerialisableFactory::nmea0183_frame(42, b"$GPGGA*00\r\n".to_vec());
        let bytes = buf.as_bytes();
        assert_eq!(u32::from_le_bytes(bytes[0..4].try_into().unwrap()), 42);
        assert_eq!(&bytes[4..], b"$GPGGA*00\r\n");
    }
}
