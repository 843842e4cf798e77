use std::io::Cursor;

use super::*;

fn reader(bytes: Vec<u8>) -> YdvrReader<Cursor<Vec<u8>>> {
    YdvrReader::new(Cursor::new(bytes))
}

#[test]
/// S1: an unsupported PGN still decodes cleanly at the source layer; the
/// factory is what later declines to convert it.
fn test_unsupported_pgn_decodes() {
    let mut bytes = 100u16.to_le_bytes().to_vec();
    bytes.extend_from_slice(&0x09F8_0100u32.to_le_bytes());
    bytes.extend_from_slice(&[0u8; 8]);

    let mut r = reader(bytes);
    let msg = r.next_n2k().unwrap().unwrap();
    assert_eq!(msg.pgn, 0x1F801);
    assert_eq!(msg.priority, 2);
    assert_eq!(msg.source, 0);
    assert_eq!(msg.destination, 0xFF);
    assert_eq!(msg.elapsed_ms, 100);
    assert_eq!(msg.data.len(), 8);
}

#[test]
fn test_control_sentinel_record() {
    let mut bytes = 1u16.to_le_bytes().to_vec();
    bytes.extend_from_slice(&0xFFFF_FFFFu32.to_le_bytes());
    bytes.extend_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);

    let mut r = reader(bytes);
    let msg = r.next_n2k().unwrap().unwrap();
    assert_eq!(msg.pgn, 0xFFFF_FFFF);
    assert_eq!(msg.priority, 0);
    assert_eq!(msg.source, 0);
    assert_eq!(msg.destination, 0);
    assert_eq!(msg.data, vec![1, 2, 3, 4, 5, 6, 7, 8]);
}

#[test]
fn test_iso_request_has_three_byte_payload() {
    let mut bytes = 5u16.to_le_bytes().to_vec();
    bytes.extend_from_slice(&0x18EA_0507u32.to_le_bytes());
    bytes.extend_from_slice(&[9, 9, 9]);

    let mut r = reader(bytes);
    let msg = r.next_n2k().unwrap().unwrap();
    assert_eq!(msg.pgn, 59904);
    assert_eq!(msg.destination, 5);
    assert_eq!(msg.priority, 6);
    assert_eq!(msg.source, 7);
    assert_eq!(msg.data, vec![9, 9, 9]);
}

#[test]
/// A multi-packet PGN reads two extra length bytes; the second is the
/// payload length.
fn test_multi_packet_pgn_reads_length_prefix() {
    let mut bytes = 7u16.to_le_bytes().to_vec();
    bytes.extend_from_slice(&0x0DF8_0509u32.to_le_bytes()); // pgn 129029
    bytes.extend_from_slice(&[0x00, 10]); // length byte = 10
    bytes.extend_from_slice(&[0xAB; 10]);

    let mut r = reader(bytes);
    let msg = r.next_n2k().unwrap().unwrap();
    assert_eq!(msg.pgn, 129029);
    assert_eq!(msg.data, vec![0xAB; 10]);
}

#[test]
fn test_over_long_payload_is_data_too_large() {
    let mut bytes = 7u16.to_le_bytes().to_vec();
    bytes.extend_from_slice(&0x0DF8_0509u32.to_le_bytes());
    bytes.extend_from_slice(&[0x00, 255]);

    let mut r = reader(bytes);
    let err = r.next_n2k().unwrap_err();
    assert!(matches!(
        err,
        SourceError::DataTooLarge { len: 255, max: MAX_N2K_DATA }
    ));
}

#[test]
fn test_empty_stream_is_clean_eof() {
    let mut r = reader(Vec::new());
    assert!(r.next_n2k().unwrap().is_none());
}

#[test]
/// A record truncated mid-payload is a clean end-of-stream, not an error.
fn test_truncated_record_is_clean_eof() {
    let mut bytes = 1u16.to_le_bytes().to_vec();
    bytes.extend_from_slice(&0x18EA_0507u32.to_le_bytes());
    bytes.push(1); // only 1 of 3 expected payload bytes

    let mut r = reader(bytes);
    assert!(r.next_n2k().unwrap().is_none());
}

#[test]
fn test_next_nmea0183_is_unimplemented() {
    let mut r = reader(Vec::new());
    assert!(matches!(
        r.next_nmea0183(),
        Err(SourceError::Unimplemented)
    ));
    assert!(r.is_n2k());
}
