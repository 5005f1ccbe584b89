//! ABI decoding

use w3_primitives::{Address, U256};

use crate::types::{ParamType, Token, I256};
use crate::AbiError;

/// Decode tokens from ABI-encoded data
///
/// Every byte copied into the result is charged against the input size, so
/// offsets that alias each other cannot make the output larger than the data.
pub fn decode(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, AbiError> {
    let mut decoder = Decoder { budget: data.len() };
    decoder.decode_seq(types.iter(), data, 0)
}

struct Decoder {
    budget: usize,
}

impl Decoder {
    fn charge(&mut self, bytes: usize) -> Result<(), AbiError> {
        self.budget = self.budget.checked_sub(bytes).ok_or_else(|| {
            AbiError::Decode("decoded data exceeds input size (aliased offsets)".into())
        })?;
        Ok(())
    }

    fn decode_seq<'t>(
        &mut self,
        types: impl Iterator<Item = &'t ParamType>,
        base: &[u8],
        mut head: usize,
    ) -> Result<Vec<Token>, AbiError> {
        let mut tokens = Vec::new();
        for param_type in types {
            tokens.push(self.decode_at(param_type, base, head)?);
            head = head.saturating_add(param_type.head_length());
        }
        Ok(tokens)
    }

    /// Decode the value whose head word starts at `head` within `base`.
    ///
    /// Offsets stored in head words are relative to `base`, which is the start
    /// of the enclosing tuple or array body.
    fn decode_at(
        &mut self,
        param_type: &ParamType,
        base: &[u8],
        head: usize,
    ) -> Result<Token, AbiError> {
        if param_type.is_dynamic() {
            let offset = self.read_usize(base, head)?;
            let tail = base.get(offset..).ok_or_else(|| {
                AbiError::Decode(format!(
                    "offset {} out of bounds for {} bytes",
                    offset,
                    base.len()
                ))
            })?;
            return self.decode_dynamic(param_type, tail);
        }

        match param_type {
            ParamType::FixedArray(inner, size) => {
                check_array_len(*size, inner.head_length(), base.len().saturating_sub(head))?;
                let elements = std::iter::repeat(&**inner).take(*size);
                return Ok(Token::FixedArray(self.decode_seq(elements, base, head)?));
            }
            ParamType::Tuple(types) => {
                return Ok(Token::Tuple(self.decode_seq(types.iter(), base, head)?));
            }
            _ => {}
        }

        let word = self.read_word(base, head)?;
        match param_type {
            ParamType::Address => {
                if word[..12].iter().any(|b| *b != 0) {
                    return Err(AbiError::Decode("dirty address padding".into()));
                }
                let mut bytes = [0u8; 20];
                bytes.copy_from_slice(&word[12..]);
                Ok(Token::Address(Address::from_bytes(bytes)))
            }
            ParamType::Uint(bits) => {
                let value = U256::from_big_endian(word);
                if value.bits() > *bits {
                    return Err(AbiError::Decode(format!("value overflows uint{bits}")));
                }
                Ok(Token::Uint(value))
            }
            ParamType::Int(bits) => {
                // bytes above the declared width must repeat the sign bit
                let sign_index = 32usize.saturating_sub(bits / 8).min(31);
                let fill = if word[sign_index] & 0x80 != 0 { 0xff } else { 0x00 };
                if word[..sign_index].iter().any(|b| *b != fill) {
                    return Err(AbiError::Decode(format!("value overflows int{bits}")));
                }

                let negative = word[0] & 0x80 != 0;
                let abs = if negative {
                    let mut flipped = [0u8; 32];
                    for (dst, src) in flipped.iter_mut().zip(word.iter()) {
                        *dst = !src;
                    }
                    U256::from_big_endian(&flipped) + U256::one()
                } else {
                    U256::from_big_endian(word)
                };
                Ok(Token::Int(I256::new(abs, negative)))
            }
            ParamType::Bool => match word[31] {
                0 | 1 if word[..31].iter().all(|b| *b == 0) => Ok(Token::Bool(word[31] == 1)),
                _ => Err(AbiError::Decode("invalid bool encoding".into())),
            },
            ParamType::FixedBytes(size) => Ok(Token::FixedBytes(word[..*size].to_vec())),
            ParamType::FixedArray(..)
            | ParamType::Tuple(_)
            | ParamType::Bytes
            | ParamType::String
            | ParamType::Array(_) => {
                unreachable!("sequences and dynamic types are handled above")
            }
        }
    }

    fn decode_dynamic(&mut self, param_type: &ParamType, tail: &[u8]) -> Result<Token, AbiError> {
        match param_type {
            ParamType::Bytes => Ok(Token::Bytes(self.decode_bytes(tail)?)),
            ParamType::String => {
                let s = String::from_utf8(self.decode_bytes(tail)?)
                    .map_err(|e| AbiError::Decode(format!("invalid UTF-8: {e}")))?;
                Ok(Token::String(s))
            }
            ParamType::Array(inner) => {
                let len = self.read_usize(tail, 0)?;
                let body = &tail[32..];
                check_array_len(len, inner.head_length(), body.len())?;
                let elements = std::iter::repeat(&**inner).take(len);
                Ok(Token::Array(self.decode_seq(elements, body, 0)?))
            }
            ParamType::FixedArray(inner, size) => {
                check_array_len(*size, inner.head_length(), tail.len())?;
                let elements = std::iter::repeat(&**inner).take(*size);
                Ok(Token::FixedArray(self.decode_seq(elements, tail, 0)?))
            }
            ParamType::Tuple(types) => Ok(Token::Tuple(self.decode_seq(types.iter(), tail, 0)?)),
            _ => unreachable!("static types never reach decode_dynamic"),
        }
    }

    fn decode_bytes(&mut self, tail: &[u8]) -> Result<Vec<u8>, AbiError> {
        let len = self.read_usize(tail, 0)?;
        check_length(tail, 32usize.saturating_add(len))?;
        self.charge(len)?;
        Ok(tail[32..32 + len].to_vec())
    }

    fn read_word<'d>(&mut self, data: &'d [u8], offset: usize) -> Result<&'d [u8], AbiError> {
        check_length(data, offset.saturating_add(32))?;
        self.charge(32)?;
        Ok(&data[offset..offset + 32])
    }

    fn read_usize(&mut self, data: &[u8], offset: usize) -> Result<usize, AbiError> {
        let value = U256::from_big_endian(self.read_word(data, offset)?);
        if value > U256::from(usize::MAX) {
            return Err(AbiError::Decode(format!("offset or length too large: {value}")));
        }
        Ok(value.as_usize())
    }
}

/// Check that `len` elements with `element_head` bytes each fit in `available`.
///
/// Zero-sized elements are bounded by the data length instead.
fn check_array_len(len: usize, element_head: usize, available: usize) -> Result<(), AbiError> {
    let needed = len
        .checked_mul(element_head)
        .filter(|needed| *needed <= available && (element_head > 0 || len <= available));
    if needed.is_none() {
        return Err(AbiError::Decode(format!(
            "array of {len} elements exceeds {available} bytes of data"
        )));
    }
    Ok(())
}

/// Check that data has at least `required` bytes
fn check_length(data: &[u8], required: usize) -> Result<(), AbiError> {
    if data.len() < required {
        return Err(AbiError::Decode(format!(
            "insufficient data: need {} bytes, have {}",
            required,
            data.len()
        )));
    }
    Ok(())
}
