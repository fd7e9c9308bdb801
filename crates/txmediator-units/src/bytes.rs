//! Byte Encoding Module
//!
//! UTF-8 and hex helpers plus the fixed-width `bytes32` string encoding
//! used by Solidity contracts.

use crate::error::{UnitError, UnitResult};

/// Width of a Solidity `bytes32` word
const WORD_LEN: usize = 32;

/// Encode a string as its UTF-8 byte sequence.
pub fn to_utf8_bytes(data: &str) -> Vec<u8> {
    data.as_bytes().to_vec()
}

/// Decode a UTF-8 byte sequence back into a string.
pub fn to_utf8_string(data: &[u8]) -> UnitResult<String> {
    String::from_utf8(data.to_vec())
        .map_err(|e| UnitError::Encoding(format!("invalid UTF-8: {e}")))
}

/// Encode a string into a zero-padded `bytes32` word.
///
/// Strings whose UTF-8 encoding exceeds 32 bytes are rejected.
pub fn encode_bytes32_string(data: &str) -> UnitResult<[u8; WORD_LEN]> {
    let raw = data.as_bytes();
    if raw.len() > WORD_LEN {
        return Err(UnitError::Encoding(format!(
            "string is {} bytes, bytes32 holds at most {WORD_LEN}",
            raw.len()
        )));
    }

    let mut word = [0u8; WORD_LEN];
    word[..raw.len()].copy_from_slice(raw);
    Ok(word)
}

/// Decode a `bytes32` word produced by [`encode_bytes32_string`].
///
/// Trailing zero bytes are padding and are dropped.
pub fn decode_bytes32_string(word: &[u8; WORD_LEN]) -> UnitResult<String> {
    let end = word.iter().rposition(|b| *b != 0).map_or(0, |i| i + 1);
    to_utf8_string(&word[..end])
}

/// Returns true when `data` is a `0x`-prefixed hex string of whole bytes.
pub fn is_bytes_like(data: &str) -> bool {
    match data.strip_prefix("0x") {
        Some(digits) => digits.len() % 2 == 0 && digits.bytes().all(|b| b.is_ascii_hexdigit()),
        None => false,
    }
}

/// Render bytes as a `0x`-prefixed lowercase hex string.
pub fn hexlify(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

/// Left-pad a hex byte string with zeros to `length` bytes.
pub fn zero_pad_value(data: &str, length: usize) -> UnitResult<String> {
    if !is_bytes_like(data) {
        return Err(UnitError::Encoding(format!("{data:?} is not a hex byte string")));
    }

    let raw = hex::decode(&data[2..]).map_err(|e| UnitError::Encoding(e.to_string()))?;
    if raw.len() > length {
        return Err(UnitError::Encoding(format!(
            "value is {} bytes, exceeds padding length {length}",
            raw.len()
        )));
    }

    let mut padded = vec![0u8; length - raw.len()];
    padded.extend_from_slice(&raw);
    Ok(hexlify(&padded))
}

/// Left-pad a hex byte string with zeros to a 32-byte word.
pub fn zero_pad_value32(data: &str) -> UnitResult<String> {
    zero_pad_value(data, WORD_LEN)
}
