//! ABI error types

use thiserror::Error;

/// ABI codec error
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AbiError {
    /// Arguments do not fit the declared input types
    #[error("ABI encoding error: {0}")]
    Encode(String),

    /// Output data does not fit the declared types or destinations
    #[error("ABI decoding error: {0}")]
    Decode(String),

    /// Function signature or type string could not be parsed
    #[error("invalid signature: {0}")]
    InvalidSignature(String),
}
