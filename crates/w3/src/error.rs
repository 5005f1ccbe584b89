//! Error types

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use w3_abi::AbiError;

/// Error returned by a node for one batch element.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("RPC error {code}: {message}")]
pub struct RpcError {
    /// JSON-RPC error code
    pub code: i64,
    /// Error message
    pub message: String,
    /// Optional error data, e.g. revert data for `eth_call`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl RpcError {
    /// Create an error without data
    pub fn new(code: i64, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            data: None,
        }
    }
}

/// A wire value that does not match its declared format.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {field}: {reason}")]
pub struct WireFormatError {
    /// Name of the offending field
    pub field: String,
    /// What was wrong with it
    pub reason: String,
}

impl WireFormatError {
    /// Create a new wire format error
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Error type for building, sending and decoding calls
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid call arguments, detected before anything is sent
    #[error("invalid call: {0}")]
    Construction(String),

    /// Error returned by the node
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// Malformed hex on the wire
    #[error(transparent)]
    WireFormat(#[from] WireFormatError),

    /// Result does not fit the declared destination
    #[error("decode error: {0}")]
    Decode(String),

    /// Connection or envelope failure
    #[error("transport error: {0}")]
    Transport(String),

    /// One or more calls of a batch failed
    #[error(transparent)]
    Batch(#[from] CallErrors),
}

/// Error category, used to decide between retrying and fixing the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid arguments
    Construction,
    /// Node-returned error
    Rpc,
    /// Result could not be decoded
    Decode,
    /// Network or envelope failure
    Transport,
    /// Per-call errors of a batch
    Batch,
}

impl Error {
    /// Category of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Construction(_) => ErrorKind::Construction,
            Error::Rpc(_) => ErrorKind::Rpc,
            Error::WireFormat(_) | Error::Decode(_) => ErrorKind::Decode,
            Error::Transport(_) => ErrorKind::Transport,
            Error::Batch(_) => ErrorKind::Batch,
        }
    }

    /// Whether sending the same call again may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self.kind(), ErrorKind::Rpc | ErrorKind::Transport)
    }
}

impl From<AbiError> for Error {
    fn from(e: AbiError) -> Self {
        match e {
            AbiError::Encode(msg) => Error::Construction(msg),
            AbiError::InvalidSignature(msg) => Error::Construction(msg),
            AbiError::Decode(msg) => Error::Decode(msg),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Decode(e.to_string())
    }
}

/// Per-call errors of a batch, one slot per submitted caller.
#[derive(Debug, Default)]
pub struct CallErrors(Vec<Option<Error>>);

impl CallErrors {
    pub(crate) fn new(errors: Vec<Option<Error>>) -> Self {
        Self(errors)
    }

    /// Error of the caller at `index`, if it failed
    pub fn get(&self, index: usize) -> Option<&Error> {
        self.0.get(index).and_then(Option::as_ref)
    }

    /// Number of callers in the batch
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the batch was empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(index, error)` of the failed callers
    pub fn failed(&self) -> impl Iterator<Item = (usize, &Error)> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, e)| e.as_ref().map(|e| (i, e)))
    }

    /// Take the first error out, consuming the collection
    pub fn into_first(self) -> Option<Error> {
        self.0.into_iter().flatten().next()
    }
}

impl fmt::Display for CallErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let failed = self.failed().count();
        write!(f, "{} of {} calls failed", failed, self.0.len())?;
        if let Some((index, err)) = self.failed().next() {
            write!(f, "; call {index}: {err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for CallErrors {}
