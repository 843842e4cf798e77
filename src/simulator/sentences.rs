//! Formats the three ASCII NMEA-0183 sentences the simulator's serial
//! output mode emits (§4.4): `$GPZDA` (time datum), `$GPGGA` (position
//! fix), `$SDDBT` (depth below transducer). Each is checksummed the way
//! [`crate::nmea0183::is_valid_sentence`] verifies.
use super::state::ComponentDateTime;

fn days_in_month(year: u16, month: u8) -> u8 {
    let leap = (year % 4 == 0 && year % 100 != 0) || year % 400 == 0;
    match month {
        1 => 31,
        2 => if leap { 29 } else { 28 },
        3 => 31,
        4 => 30,
        5 => 31,
        6 => 30,
        7 => 31,
        8 => 31,
        9 => 30,
        10 => 31,
        11 => 30,
        12 => 31,
        _ => unreachable!("month out of range"),
    }
}

/// Convert a (year, day-of-year) pair into a (month, day-of-month) pair.
fn month_day_from_doy(year: u16, day_of_year: u16) -> (u8, u8) {
    let mut remaining = day_of_year.max(1);
    for month in 1..=12u8 {
        let len = days_in_month(year, month) as u16;
        if remaining <= len {
            return (month, remaining as u8);
        }
        remaining -= len;
    }
    (12, 31)
}

fn checksum(body: &[u8]) -> u8 {
    body.iter().fold(0u8, |acc, &b| acc ^ b)
}

fn finish_sentence(body: String) -> Vec<u8> {
    let check = checksum(body.as_bytes());
    format!("{body}*{check:02X}\r\n").into_bytes()
}

fn format_lat(lat: f64) -> (String, char) {
    let hemi = if lat >= 0.0 { 'N' } else { 'S' };
    let lat = lat.abs();
    let deg = lat.trunc() as u32;
    let min = (lat - deg as f64) * 60.0;
    (format!("{deg:02}{min:07.4}"), hemi)
}

fn format_lon(lon: f64) -> (String, char) {
    let hemi = if lon >= 0.0 { 'E' } else { 'W' };
    let lon = lon.abs();
    let deg = lon.trunc() as u32;
    let min = (lon - deg as f64) * 60.0;
    (format!("{deg:03}{min:07.4}"), hemi)
}

/// `$GPZDA,hhmmss.ss,DD,MM,YYYY,00,00*CC`: UTC time and date datum.
pub fn format_zda(time: &ComponentDateTime) -> Vec<u8> {
    let (month, day) = month_day_from_doy(time.year, time.day_of_year);
    let body = format!(
        "$GPZDA,{:02}{:02}{:05.2},{:02},{:02},{:04},00,00",
        time.hour, time.minute, time.second, day, month, time.year
    );
    finish_sentence(body)
}

/// `$GPGGA,...`: GPS position fix, fixed quality/satellite/DOP fields
/// suitable for a simulated, always-locked receiver.
pub fn format_gga(time: &ComponentDateTime, latitude: f64, longitude: f64) -> Vec<u8> {
    let (lat, lat_hemi) = format_lat(latitude);
    let (lon, lon_hemi) = format_lon(longitude);
    let body = format!(
        "$GPGGA,{:02}{:02}{:05.2},{},{},{},{},1,08,0.9,0.0,M,0.0,M,,",
        time.hour, time.minute, time.second, lat, lat_hemi, lon, lon_hemi
    );
    finish_sentence(body)
}

/// `$SDDBT,f,f,m,M,fa,F`: depth below transducer in feet, metres, fathoms.
pub fn format_dbt(depth_m: f64) -> Vec<u8> {
    let feet = depth_m * 3.28084;
    let fathoms = depth_m * 0.546807;
    let body = format!("$SDDBT,{feet:.1},f,{depth_m:.1},M,{fathoms:.1},F");
    finish_sentence(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nmea0183::is_valid_sentence;

    fn sample_time() -> ComponentDateTime {
        let mut t = ComponentDateTime::new(2024, 60);
        t.hour = 12;
        t.minute = 34;
        t.second = 56.0;
        t
    }

    #[test]
    fn test_zda_passes_checksum_validation() {
        let sentence = format_zda(&sample_time());
        assert!(is_valid_sentence(&sentence[..sentence.len() - 2])); // strip CRLF
    }

    #[test]
    fn test_gga_passes_checksum_validation() {
        let sentence = format_gga(&sample_time(), 45.1234, -63.5678);
        assert!(is_valid_sentence(&sentence[..sentence.len() - 2]));
    }

    #[test]
    fn test_dbt_passes_checksum_validation() {
        let sentence = format_dbt(12.3);
        assert!(is_valid_sentence(&sentence[..sentence.len() - 2]));
    }

    #[test]
    fn test_month_day_from_doy_day_one() {
        assert_eq!(month_day_from_doy(2024, 1), (1, 1));
    }

    #[test]
    fn test_month_day_from_doy_crosses_february_leap_year() {
        // day 60 of a leap year (29-day Feb) is March 1st.
        assert_eq!(month_day_from_doy(2024, 60), (3, 1));
    }
}
