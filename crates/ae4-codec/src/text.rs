//! Length-prefixed Shift-JIS strings.
//!
//! The editor stores strings as a `u32` length followed by the encoded
//! bytes. The stored length counts a trailing NUL that is written as a
//! separate byte after the body:
//!
//! | value     | length | body           |
//! |-----------|--------|----------------|
//! | `""`      | 1      | (none)         |
//! | `"ab"`    | 3      | `61 62 00`     |
//!
//! Readers treat any length `<= 1` as the empty string and consume no body.

use encoding_rs::{EncoderResult, SHIFT_JIS};

use crate::cursor::ByteCursor;
use crate::error::Result;

/// Decode Shift-JIS bytes, replacing malformed sequences and dropping trailing NULs.
pub fn decode(bytes: &[u8]) -> String {
    let (text, _) = SHIFT_JIS.decode_without_bom_handling(bytes);
    text.trim_end_matches('\0').to_string()
}

/// Encode to Shift-JIS, dropping characters the encoding cannot represent.
pub fn encode(value: &str) -> Vec<u8> {
    let mut encoder = SHIFT_JIS.new_encoder();
    let mut out = Vec::with_capacity(value.len() * 2 + 8);
    let mut rest = value;
    loop {
        let (result, read) =
            encoder.encode_from_utf8_to_vec_without_replacement(rest, &mut out, true);
        rest = &rest[read..];
        match result {
            EncoderResult::InputEmpty => break,
            EncoderResult::OutputFull => out.reserve(rest.len() * 2 + 8),
            EncoderResult::Unmappable(c) => {
                tracing::trace!(character = %c, "dropping character not representable in Shift-JIS");
            }
        }
    }
    out
}

/// Read a length-prefixed string.
pub fn read_text(cur: &mut ByteCursor) -> Result<String> {
    let len = cur.read_u32()? as usize;
    if len <= 1 {
        return Ok(String::new());
    }
    let body = cur.read_bytes(len)?;
    Ok(decode(&body))
}

/// Write a length-prefixed string.
pub fn write_text(cur: &mut ByteCursor, value: &str) -> Result<()> {
    let encoded = encode(value);
    cur.write_u32(encoded.len() as u32 + 1)?;
    if !encoded.is_empty() {
        cur.write_bytes(&encoded)?;
        cur.write_u8(0)?;
    }
    Ok(())
}

/// Read a string whose body is always exactly `length` bytes, even when short.
pub fn read_sized_text(cur: &mut ByteCursor) -> Result<String> {
    let len = cur.read_u32()? as usize;
    let body = cur.read_bytes(len)?;
    Ok(decode(&body))
}

/// Write a string whose stored length always equals its body size.
///
/// An empty value is stored as length 1 plus a lone NUL.
pub fn write_sized_text(cur: &mut ByteCursor, value: &str) -> Result<()> {
    let encoded = encode(value);
    cur.write_u32(encoded.len() as u32 + 1)?;
    cur.write_bytes(&encoded)?;
    cur.write_u8(0)
}

/// Like [`write_text`], but an empty value is stored as length 0.
pub fn write_text_or_zero(cur: &mut ByteCursor, value: &str) -> Result<()> {
    if value.is_empty() {
        return cur.write_u32(0);
    }
    write_text(cur, value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn written(value: &str) -> Vec<u8> {
        let mut cur = ByteCursor::append();
        write_text(&mut cur, value).unwrap();
        cur.finish()
    }

    #[test]
    fn test_empty_is_length_one_without_body() {
        assert_eq!(written(""), vec![1, 0, 0, 0]);
    }

    #[test]
    fn test_length_counts_terminator() {
        assert_eq!(written("ab"), vec![3, 0, 0, 0, b'a', b'b', 0]);
    }

    #[test]
    fn test_japanese_roundtrip() {
        let bytes = written("ステージ");
        // 4 double-byte characters plus the terminator
        assert_eq!(&bytes[..4], &[9, 0, 0, 0]);
        let mut cur = ByteCursor::fixed(bytes);
        assert_eq!(read_text(&mut cur).unwrap(), "ステージ");
        assert!(cur.is_exhausted());
    }

    #[test]
    fn test_short_lengths_consume_no_body() {
        for len in [0u8, 1] {
            let mut cur = ByteCursor::fixed(vec![len, 0, 0, 0, 0xaa]);
            assert_eq!(read_text(&mut cur).unwrap(), "");
            assert_eq!(cur.position(), 4);
        }
    }

    #[test]
    fn test_unmappable_characters_dropped() {
        assert_eq!(encode("a😀b"), b"ab".to_vec());
    }

    #[test]
    fn test_malformed_bytes_replaced() {
        let decoded = decode(&[b'x', 0x81, 0x00]);
        assert!(decoded.starts_with('x'));
        assert!(decoded.contains('\u{fffd}'));
    }

    #[test]
    fn test_sized_text() {
        let mut cur = ByteCursor::append();
        write_sized_text(&mut cur, "").unwrap();
        write_sized_text(&mut cur, "run").unwrap();
        let bytes = cur.finish();
        assert_eq!(&bytes[..5], &[1, 0, 0, 0, 0]);

        let mut cur = ByteCursor::fixed(bytes);
        assert_eq!(read_sized_text(&mut cur).unwrap(), "");
        assert_eq!(read_sized_text(&mut cur).unwrap(), "run");
        assert!(cur.is_exhausted());
    }

    #[test]
    fn test_text_or_zero() {
        let mut cur = ByteCursor::append();
        write_text_or_zero(&mut cur, "").unwrap();
        write_text_or_zero(&mut cur, "a").unwrap();
        assert_eq!(cur.finish(), vec![0, 0, 0, 0, 2, 0, 0, 0, b'a', 0]);
    }
}
