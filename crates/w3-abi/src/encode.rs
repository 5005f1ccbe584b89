//! ABI encoding

use sha3::{Digest, Keccak256};
use w3_primitives::U256;

use crate::types::{ParamType, Token};
use crate::AbiError;

/// Encode tokens against their declared types.
///
/// Fails when the token count differs from the type count or a token does not
/// fit its type (wrong variant, integer out of range, wrong fixed length).
pub fn encode(types: &[ParamType], tokens: &[Token]) -> Result<Vec<u8>, AbiError> {
    if types.len() != tokens.len() {
        return Err(AbiError::Encode(format!(
            "expected {} arguments, got {}",
            types.len(),
            tokens.len()
        )));
    }
    for (i, (param_type, token)) in types.iter().zip(tokens).enumerate() {
        if !token.matches(param_type) {
            return Err(AbiError::Encode(format!(
                "argument {i} does not match type {param_type}: {token:?}"
            )));
        }
    }
    Ok(encode_params(types, tokens))
}

/// Head/tail encode already type-checked tokens.
pub(crate) fn encode_params(types: &[ParamType], tokens: &[Token]) -> Vec<u8> {
    let head_size = types
        .iter()
        .fold(0usize, |len, t| len.saturating_add(t.head_length()));

    let mut head = Vec::new();
    let mut tail = Vec::new();

    for (param_type, token) in types.iter().zip(tokens.iter()) {
        if param_type.is_dynamic() {
            let offset = head_size + tail.len();
            head.extend(encode_u256(&U256::from(offset)));
            tail.extend(encode_token(param_type, token));
        } else {
            head.extend(encode_token(param_type, token));
        }
    }

    head.extend(tail);
    head
}

fn encode_token(param_type: &ParamType, token: &Token) -> Vec<u8> {
    match (param_type, token) {
        (ParamType::Address, Token::Address(addr)) => {
            let mut buf = [0u8; 32];
            buf[12..32].copy_from_slice(addr.as_bytes());
            buf.to_vec()
        }
        (ParamType::Uint(_), Token::Uint(value)) => encode_u256(value),
        (ParamType::Int(_), Token::Int(value)) => {
            if value.negative {
                // two's complement
                let abs = u256_to_bytes(&value.abs);
                let mut bytes = [0u8; 32];
                for (dst, src) in bytes.iter_mut().zip(abs.iter()) {
                    *dst = !src;
                }
                let mut carry = 1u16;
                for byte in bytes.iter_mut().rev() {
                    let sum = *byte as u16 + carry;
                    *byte = sum as u8;
                    carry = sum >> 8;
                }
                bytes.to_vec()
            } else {
                encode_u256(&value.abs)
            }
        }
        (ParamType::Bool, Token::Bool(b)) => {
            let mut buf = [0u8; 32];
            buf[31] = u8::from(*b);
            buf.to_vec()
        }
        (ParamType::FixedBytes(_), Token::FixedBytes(data)) => {
            let mut buf = [0u8; 32];
            buf[..data.len()].copy_from_slice(data);
            buf.to_vec()
        }
        (ParamType::Bytes, Token::Bytes(data)) => encode_bytes(data),
        (ParamType::String, Token::String(s)) => encode_bytes(s.as_bytes()),
        (ParamType::Array(inner), Token::Array(tokens)) => {
            let mut result = encode_u256(&U256::from(tokens.len()));
            let inner_types = vec![(**inner).clone(); tokens.len()];
            result.extend(encode_params(&inner_types, tokens));
            result
        }
        (ParamType::FixedArray(inner, _), Token::FixedArray(tokens)) => {
            let inner_types = vec![(**inner).clone(); tokens.len()];
            encode_params(&inner_types, tokens)
        }
        (ParamType::Tuple(types), Token::Tuple(tokens)) => encode_params(types, tokens),
        // unreachable after `Token::matches`
        _ => vec![0u8; 32],
    }
}

fn u256_to_bytes(value: &U256) -> [u8; 32] {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    bytes
}

fn encode_u256(value: &U256) -> Vec<u8> {
    u256_to_bytes(value).to_vec()
}

fn encode_bytes(data: &[u8]) -> Vec<u8> {
    let mut result = encode_u256(&U256::from(data.len()));
    let padded_len = data.len().div_ceil(32) * 32;
    let mut padded = vec![0u8; padded_len];
    padded[..data.len()].copy_from_slice(data);
    result.extend(padded);
    result
}

/// Compute function selector (first 4 bytes of keccak256(signature))
pub fn function_selector(signature: &str) -> [u8; 4] {
    let hash = Keccak256::digest(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash[..4]);
    selector
}
