use super::*;

fn checksum_hex(body: &[u8]) -> String {
    format!("{:02X}", body.iter().fold(0u8, |acc, &b| acc ^ b))
}

fn sentence_with_checksum(body: &str) -> Vec<u8> {
    let mut s = format!("${}*", body).into_bytes();
    s.extend(checksum_hex(body.as_bytes()).into_bytes());
    s
}

#[test]
fn test_valid_sentence_checksum() {
    let s = sentence_with_checksum("GPGGA,1,2,3");
    assert!(is_valid_sentence(&s));
}

#[test]
fn test_invalid_sentence_bad_checksum() {
    let mut s = sentence_with_checksum("GPGGA,1,2,3");
    let last = s.len() - 1;
    s[last] = if s[last] == b'0' { b'1' } else { b'0' };
    assert!(!is_valid_sentence(&s));
}

#[test]
fn test_invalid_sentence_missing_star() {
    assert!(!is_valid_sentence(b"$GPGGA,1,2,3"));
}

#[test]
fn test_invalid_sentence_wrong_prefix() {
    let s = sentence_with_checksum("GPGGA");
    let mut bad = s.clone();
    bad[0] = b'%';
    assert!(!is_valid_sentence(&bad));
}

#[test]
fn test_sentence_token_extracts_five_bytes() {
    let s = sentence_with_checksum("GPGGA,foo");
    assert_eq!(sentence_token(&s), Some(&b"GPGGA"[..]));
}

#[test]
fn test_sentence_token_none_for_short_input() {
    assert_eq!(sentence_token(b"$GP"), None);
}

#[test]
/// Property 3, via the assembler: a sentence fed byte-by-byte round trips.
fn test_assembler_captures_one_sentence() {
    let mut asm = Assembler::new();
    let raw = sentence_with_checksum("GPGGA,hello");
    let mut framed = raw.clone();
    framed.extend_from_slice(b"\r\n");

    for (i, &b) in framed.iter().enumerate() {
        asm.push_byte(b, 1000 + i as u64);
    }

    let record = asm.try_pop().expect("one sentence buffered");
    assert_eq!(record.sentence, raw);
    assert_eq!(record.tick, 1000); // timestamp snapshot at '$'
    assert!(is_valid_sentence(&record.sentence));
}

#[test]
/// CAPTURING + '$' restarts the sentence and warns, per spec.
fn test_mid_capture_dollar_restarts_sentence() {
    let mut asm = Assembler::new();
    let garbage = b"$GPGG";
    let good = sentence_with_checksum("SDDBT,1");
    let mut framed = good.clone();
    framed.extend_from_slice(b"\r\n");

    asm.push_bytes(garbage, 10);
    asm.push_bytes(&framed, 20);

    let record = asm.try_pop().expect("restarted sentence captured");
    assert_eq!(record.sentence, good);
    assert_eq!(record.tick, 20);
}

#[test]
/// Over-long sentences abort back to SEARCHING without being buffered.
fn test_over_long_sentence_aborts() {
    let mut asm = Assembler::with_limits(8, RING_CAPACITY);
    asm.push_byte(b'$', 0);
    for i in 0..20u8 {
        asm.push_byte(b'A' + (i % 26), i as u64);
    }
    assert_eq!(asm.buffered_len(), 0);

    // A subsequent well-formed sentence still works after the abort.
    let good = sentence_with_checksum("X");
    asm.push_bytes(&good, 100);
    asm.push_byte(b'\n', 101);
    assert_eq!(asm.buffered_len(), 1);
}

#[test]
/// Ring buffer drops the oldest entry once full.
fn test_ring_drops_oldest_when_full() {
    let mut asm = Assembler::with_limits(64, 2);
    for i in 0..3u8 {
        let body = format!("GPGGA,{i}");
        let s = sentence_with_checksum(&body);
        asm.push_bytes(&s, i as u64 * 10);
        asm.push_byte(b'\n', i as u64 * 10 + 1);
    }
    assert_eq!(asm.buffered_len(), 2);
    let first = asm.try_pop().unwrap();
    assert_eq!(first.sentence, sentence_with_checksum("GPGGA,1"));
}

#[test]
/// S6: two independent channels fed interleaved bytes keep disjoint,
/// correctly ordered output with timestamps matching their own '$' arrival.
fn test_two_assemblers_interleaved() {
    let mut a = Assembler::new();
    let mut b = Assembler::new();

    let sa1 = sentence_with_checksum("AAAA,1");
    let sa2 = sentence_with_checksum("AAAA,2");
    let sb1 = sentence_with_checksum("BBBB,1");

    // Interleave byte-by-byte with distinct tick sequences per channel.
    a.push_bytes(&sa1, 1);
    a.push_byte(b'\n', 2);
    b.push_bytes(&sb1, 100);
    b.push_byte(b'\n', 101);
    a.push_bytes(&sa2, 3);
    a.push_byte(b'\n', 4);

    assert_eq!(a.try_pop().unwrap().sentence, sa1);
    assert_eq!(a.try_pop().unwrap().sentence, sa2);
    assert!(a.try_pop().is_none());

    let b_rec = b.try_pop().unwrap();
    assert_eq!(b_rec.sentence, sb1);
    assert_eq!(b_rec.tick, 100);
    assert!(b.try_pop().is_none());
}
