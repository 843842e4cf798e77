//! Unit tests for [`Serialiser`] primitive encoding.
use super::*;

#[test]
/// S4: `u16=0x1234, f64=1.5, "ABC"` serialises to the exact 13-byte sequence.
fn test_mixed_primitives_s4() {
    let mut s = Serialiser::new();
    s.append_u16(0x1234);
    s.append_f64(1.5);
    s.append_bytes(b"ABC");

    let expected: &[u8] = &[
        0x34, 0x12, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0xF8, 0x3F, 0x41, 0x42, 0x43,
    ];
    assert_eq!(s.as_bytes(), expected);
    assert_eq!(s.len(), 13);
}

#[test]
/// Property 2: `append(x)` round-trips through a little-endian reader.
fn test_roundtrip_all_widths() {
    let mut s = Serialiser::new();
    s.append_u8(0xAB);
    s.append_u16(0xBEEF);
    s.append_u32(0xDEAD_BEEF);
    s.append_u64(0x0123_4567_89AB_CDEF);
    s.append_f32(3.25);
    s.append_f64(-7.5);

    let bytes = s.as_bytes();
    assert_eq!(bytes[0], 0xAB);
    assert_eq!(u16::from_le_bytes(bytes[1..3].try_into().unwrap()), 0xBEEF);
    assert_eq!(
        u32::from_le_bytes(bytes[3..7].try_into().unwrap()),
        0xDEAD_BEEF
    );
    assert_eq!(
        u64::from_le_bytes(bytes[7..15].try_into().unwrap()),
        0x0123_4567_89AB_CDEF
    );
    assert_eq!(f32::from_le_bytes(bytes[15..19].try_into().unwrap()), 3.25);
    assert_eq!(f64::from_le_bytes(bytes[19..27].try_into().unwrap()), -7.5);
}

#[test]
fn test_clear_resets_buffer() {
    let mut s = Serialiser::new();
    s.append_u32(1);
    assert_eq!(s.len(), 4);
    s.clear();
    assert!(s.is_empty());
    assert_eq!(s.len(), 0);
}

#[test]
fn test_append_bytes_no_terminator_no_prefix() {
    let mut s = Serialiser::new();
    s.append_bytes(b"hello");
    assert_eq!(s.as_bytes(), b"hello");
}
