//! Conversion of decoded tokens into typed destinations

use w3_primitives::{Address, H256, U256};

use crate::types::{Token, I256};
use crate::AbiError;

/// A Rust type that can be built from one decoded ABI token.
///
/// Tuples are built from a [`Token::Tuple`] with the same arity, which is how
/// a function with several return values is decoded into `(A, B, ..)`.
pub trait FromToken: Sized {
    /// Convert the token, failing on a type or arity mismatch.
    fn from_token(token: Token) -> Result<Self, AbiError>;
}

fn mismatch<T>(expected: &str, token: &Token) -> Result<T, AbiError> {
    Err(AbiError::Decode(format!(
        "cannot decode {token:?} into {expected}"
    )))
}

impl FromToken for Token {
    fn from_token(token: Token) -> Result<Self, AbiError> {
        Ok(token)
    }
}

impl FromToken for U256 {
    fn from_token(token: Token) -> Result<Self, AbiError> {
        match token {
            Token::Uint(value) => Ok(value),
            other => mismatch("U256", &other),
        }
    }
}

impl FromToken for u64 {
    fn from_token(token: Token) -> Result<Self, AbiError> {
        match token {
            Token::Uint(value) if value.bits() <= 64 => Ok(value.as_u64()),
            other => mismatch("u64", &other),
        }
    }
}

impl FromToken for I256 {
    fn from_token(token: Token) -> Result<Self, AbiError> {
        match token {
            Token::Int(value) => Ok(value),
            other => mismatch("I256", &other),
        }
    }
}

impl FromToken for bool {
    fn from_token(token: Token) -> Result<Self, AbiError> {
        match token {
            Token::Bool(value) => Ok(value),
            other => mismatch("bool", &other),
        }
    }
}

impl FromToken for Address {
    fn from_token(token: Token) -> Result<Self, AbiError> {
        match token {
            Token::Address(value) => Ok(value),
            other => mismatch("Address", &other),
        }
    }
}

impl FromToken for H256 {
    fn from_token(token: Token) -> Result<Self, AbiError> {
        match token {
            Token::FixedBytes(bytes) if bytes.len() == 32 => H256::from_slice(&bytes)
                .map_err(|e| AbiError::Decode(e.to_string())),
            other => mismatch("H256", &other),
        }
    }
}

impl FromToken for String {
    fn from_token(token: Token) -> Result<Self, AbiError> {
        match token {
            Token::String(value) => Ok(value),
            other => mismatch("String", &other),
        }
    }
}

impl FromToken for Vec<u8> {
    fn from_token(token: Token) -> Result<Self, AbiError> {
        match token {
            Token::Bytes(bytes) | Token::FixedBytes(bytes) => Ok(bytes),
            other => mismatch("Vec<u8>", &other),
        }
    }
}

/// Any array token; `Vec<u8>` is reserved for `bytes`, so use `Vec<Token>` or
/// element types other than `u8` here.
impl<T: ArrayElement> FromToken for Vec<T> {
    fn from_token(token: Token) -> Result<Self, AbiError> {
        match token {
            Token::Array(tokens) | Token::FixedArray(tokens) => {
                tokens.into_iter().map(T::from_token).collect()
            }
            other => mismatch("Vec<T>", &other),
        }
    }
}

/// Element types allowed in `Vec<T>` destinations.
pub trait ArrayElement: FromToken {}

impl ArrayElement for Token {}
impl ArrayElement for U256 {}
impl ArrayElement for u64 {}
impl ArrayElement for I256 {}
impl ArrayElement for bool {}
impl ArrayElement for Address {}
impl ArrayElement for H256 {}
impl ArrayElement for String {}
impl ArrayElement for Vec<u8> {}

impl FromToken for () {
    fn from_token(token: Token) -> Result<Self, AbiError> {
        match token {
            Token::Tuple(tokens) if tokens.is_empty() => Ok(()),
            other => mismatch("()", &other),
        }
    }
}

impl<A: FromToken> FromToken for (A,) {
    fn from_token(token: Token) -> Result<Self, AbiError> {
        match token {
            Token::Tuple(mut tokens) if tokens.len() == 1 => {
                Ok((A::from_token(tokens.remove(0))?,))
            }
            other => Ok((A::from_token(other)?,)),
        }
    }
}

macro_rules! impl_tuple {
    ($len:expr; $($name:ident),+) => {
        impl<$($name: FromToken),+> FromToken for ($($name,)+) {
            fn from_token(token: Token) -> Result<Self, AbiError> {
                match token {
                    Token::Tuple(tokens) if tokens.len() == $len => {
                        let mut iter = tokens.into_iter();
                        Ok(($(
                            $name::from_token(iter.next().ok_or_else(|| {
                                AbiError::Decode("tuple ended early".into())
                            })?)?,
                        )+))
                    }
                    other => mismatch(concat!("tuple of ", stringify!($len)), &other),
                }
            }
        }
    };
}

impl_tuple!(2; A, B);
impl_tuple!(3; A, B, C);
impl_tuple!(4; A, B, C, D);
impl_tuple!(5; A, B, C, D, E);
impl_tuple!(6; A, B, C, D, E, F);
