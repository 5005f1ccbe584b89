//! Hex wire codecs
//!
//! Quantities are `0x`-prefixed hex without leading zeros (`0x0`, `0x1b4`).
//! Byte strings are `0x`-prefixed hex with an even number of digits. Decoding
//! is strict: a missing prefix, a leading zero or a value wider than the
//! native type is an error, never a silent truncation.

use bytes::Bytes;
use serde_json::Value;
use w3_primitives::U256;

use crate::error::WireFormatError;

// ==================== Encoding ====================

/// Encode a u64 as a wire quantity
pub fn encode_u64(value: u64) -> String {
    format!("0x{value:x}")
}

/// Encode a U256 as a wire quantity
pub fn encode_u256(value: &U256) -> String {
    format!("0x{value:x}")
}

/// Encode bytes as a `0x`-prefixed hex string
pub fn encode_bytes(data: &[u8]) -> String {
    format!("0x{}", hex::encode(data))
}

// ==================== Decoding ====================

/// Decode a wire quantity into a u64
pub fn decode_u64(field: &str, s: &str) -> Result<u64, WireFormatError> {
    let digits = quantity_digits(field, s)?;
    if digits.len() > 16 {
        return Err(WireFormatError::new(field, format!("{s} overflows u64")));
    }
    u64::from_str_radix(digits, 16).map_err(|e| WireFormatError::new(field, e.to_string()))
}

/// Decode a wire quantity into a U256
pub fn decode_u256(field: &str, s: &str) -> Result<U256, WireFormatError> {
    let digits = quantity_digits(field, s)?;
    if digits.len() > 64 {
        return Err(WireFormatError::new(field, format!("{s} overflows 256 bits")));
    }
    U256::from_str_radix(digits, 16).map_err(|e| WireFormatError::new(field, format!("{e:?}")))
}

/// Decode a `0x`-prefixed hex byte string
pub fn decode_bytes(field: &str, s: &str) -> Result<Bytes, WireFormatError> {
    let digits = s
        .strip_prefix("0x")
        .ok_or_else(|| WireFormatError::new(field, format!("missing 0x prefix in {s:?}")))?;
    hex::decode(digits)
        .map(Bytes::from)
        .map_err(|e| WireFormatError::new(field, e.to_string()))
}

fn quantity_digits<'a>(field: &str, s: &'a str) -> Result<&'a str, WireFormatError> {
    let digits = s
        .strip_prefix("0x")
        .ok_or_else(|| WireFormatError::new(field, format!("missing 0x prefix in {s:?}")))?;
    if digits.is_empty() {
        return Err(WireFormatError::new(field, "empty quantity"));
    }
    if digits.len() > 1 && digits.starts_with('0') {
        return Err(WireFormatError::new(field, format!("leading zero in {s:?}")));
    }
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(WireFormatError::new(field, format!("invalid hex digit in {s:?}")));
    }
    Ok(digits)
}

// ==================== JSON values ====================

fn as_hex_str<'a>(field: &str, value: &'a Value) -> Result<&'a str, WireFormatError> {
    value
        .as_str()
        .ok_or_else(|| WireFormatError::new(field, format!("expected hex string, got {value}")))
}

/// Decode a JSON string holding a wire quantity into a u64
pub fn u64_from_value(field: &str, value: &Value) -> Result<u64, WireFormatError> {
    decode_u64(field, as_hex_str(field, value)?)
}

/// Decode a JSON string holding a wire quantity into a U256
pub fn u256_from_value(field: &str, value: &Value) -> Result<U256, WireFormatError> {
    decode_u256(field, as_hex_str(field, value)?)
}

/// Decode a JSON string holding hex bytes
pub fn bytes_from_value(field: &str, value: &Value) -> Result<Bytes, WireFormatError> {
    decode_bytes(field, as_hex_str(field, value)?)
}
