//! ABI type definitions

use std::fmt;

use w3_primitives::{Address, H256, U256};

/// A decoded ABI value, or an argument to encode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// `address`
    Address(Address),
    /// `uint<M>`
    Uint(U256),
    /// `int<M>`
    Int(I256),
    /// `bool`
    Bool(bool),
    /// `bytes`
    Bytes(Vec<u8>),
    /// `bytes<M>`, left-aligned
    FixedBytes(Vec<u8>),
    /// `string`
    String(String),
    /// `T[]`
    Array(Vec<Token>),
    /// `T[k]`
    FixedArray(Vec<Token>),
    /// `(T1,...,Tn)`
    Tuple(Vec<Token>),
}

/// Signed 256-bit integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct I256 {
    /// Absolute value
    pub abs: U256,
    /// Sign (true if negative)
    pub negative: bool,
}

impl I256 {
    /// Create a new I256
    pub fn new(abs: U256, negative: bool) -> Self {
        Self {
            abs,
            negative: negative && !abs.is_zero(),
        }
    }

    /// Create from i128
    pub fn from_i128(value: i128) -> Self {
        Self::new(U256::from(value.unsigned_abs()), value < 0)
    }

    /// Check if zero
    pub fn is_zero(&self) -> bool {
        self.abs.is_zero()
    }
}

/// Declared type of a function parameter or return value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// Address
    Address,
    /// `uint<bits>`
    Uint(usize),
    /// Signed integer with bit size
    Int(usize),
    /// Boolean
    Bool,
    /// Dynamic bytes
    Bytes,
    /// Fixed-size bytes (size 1-32)
    FixedBytes(usize),
    /// UTF-8 string
    String,
    /// Dynamic array
    Array(Box<ParamType>),
    /// Fixed-size array
    FixedArray(Box<ParamType>, usize),
    /// Tuple
    Tuple(Vec<ParamType>),
}

impl ParamType {
    /// Check if this type is dynamic (variable length)
    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::Bytes | ParamType::String | ParamType::Array(_) => true,
            ParamType::FixedArray(inner, _) => inner.is_dynamic(),
            ParamType::Tuple(types) => types.iter().any(|t| t.is_dynamic()),
            _ => false,
        }
    }

    /// Size of this type in the head section of an encoding
    pub(crate) fn head_length(&self) -> usize {
        match self {
            ParamType::FixedArray(inner, size) if !self.is_dynamic() => {
                inner.head_length().saturating_mul(*size)
            }
            ParamType::Tuple(types) if !self.is_dynamic() => types
                .iter()
                .fold(0usize, |len, t| len.saturating_add(t.head_length())),
            _ => 32,
        }
    }
}

impl fmt::Display for ParamType {
    /// Canonical type string as used in function signatures.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Address => f.write_str("address"),
            ParamType::Uint(bits) => write!(f, "uint{bits}"),
            ParamType::Int(bits) => write!(f, "int{bits}"),
            ParamType::Bool => f.write_str("bool"),
            ParamType::Bytes => f.write_str("bytes"),
            ParamType::FixedBytes(size) => write!(f, "bytes{size}"),
            ParamType::String => f.write_str("string"),
            ParamType::Array(inner) => write!(f, "{inner}[]"),
            ParamType::FixedArray(inner, size) => write!(f, "{inner}[{size}]"),
            ParamType::Tuple(types) => {
                f.write_str("(")?;
                for (i, t) in types.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{t}")?;
                }
                f.write_str(")")
            }
        }
    }
}

impl Token {
    /// Create a uint256 from u128
    pub fn uint(value: u128) -> Self {
        Token::Uint(U256::from(value))
    }

    /// Create a bytes32 token
    pub fn bytes32(data: H256) -> Self {
        Token::FixedBytes(data.as_bytes().to_vec())
    }

    /// Whether this token can be encoded as `param_type`.
    pub fn matches(&self, param_type: &ParamType) -> bool {
        match (param_type, self) {
            (ParamType::Address, Token::Address(_)) => true,
            (ParamType::Uint(bits), Token::Uint(value)) => value.bits() <= *bits,
            (ParamType::Int(bits), Token::Int(value)) => {
                if *bits == 0 || *bits > 256 {
                    return false;
                }
                let limit = U256::one() << (bits - 1);
                if value.negative {
                    value.abs <= limit
                } else {
                    value.abs < limit
                }
            }
            (ParamType::Bool, Token::Bool(_)) => true,
            (ParamType::Bytes, Token::Bytes(_)) => true,
            (ParamType::FixedBytes(size), Token::FixedBytes(data)) => data.len() <= *size,
            (ParamType::String, Token::String(_)) => true,
            (ParamType::Array(inner), Token::Array(tokens)) => {
                tokens.iter().all(|t| t.matches(inner))
            }
            (ParamType::FixedArray(inner, size), Token::FixedArray(tokens)) => {
                tokens.len() == *size && tokens.iter().all(|t| t.matches(inner))
            }
            (ParamType::Tuple(types), Token::Tuple(tokens)) => {
                types.len() == tokens.len()
                    && types.iter().zip(tokens).all(|(p, t)| t.matches(p))
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dynamic_types() {
        assert!(!ParamType::Address.is_dynamic());
        assert!(!ParamType::Uint(256).is_dynamic());
        assert!(!ParamType::FixedBytes(32).is_dynamic());
        assert!(!ParamType::FixedArray(Box::new(ParamType::Bool), 3).is_dynamic());

        assert!(ParamType::Bytes.is_dynamic());
        assert!(ParamType::String.is_dynamic());
        assert!(ParamType::Array(Box::new(ParamType::Uint(256))).is_dynamic());
        assert!(ParamType::Tuple(vec![ParamType::Bool, ParamType::String]).is_dynamic());
    }

    #[test]
    fn test_param_type_display() {
        let t = ParamType::Tuple(vec![
            ParamType::Address,
            ParamType::Array(Box::new(ParamType::Uint(256))),
            ParamType::FixedArray(Box::new(ParamType::FixedBytes(32)), 2),
        ]);
        assert_eq!(t.to_string(), "(address,uint256[],bytes32[2])");
    }

    #[test]
    fn test_token_matches() {
        assert!(Token::uint(255).matches(&ParamType::Uint(8)));
        assert!(!Token::uint(256).matches(&ParamType::Uint(8)));
        assert!(!Token::Bool(true).matches(&ParamType::Address));
        assert!(Token::Int(I256::from_i128(-1)).matches(&ParamType::Int(8)));
        assert!(!Token::FixedArray(vec![Token::Bool(true)])
            .matches(&ParamType::FixedArray(Box::new(ParamType::Bool), 2)));
    }

    #[test]
    fn test_i256_sign() {
        let negative = I256::from_i128(-100);
        assert!(negative.negative);
        assert_eq!(negative.abs, U256::from(100));

        let zero = I256::from_i128(0);
        assert!(zero.is_zero());
        assert!(!zero.negative);
    }

    #[test]
    fn test_negative_zero_is_normalized() {
        assert_eq!(I256::new(U256::zero(), true), I256::default());
    }
}
