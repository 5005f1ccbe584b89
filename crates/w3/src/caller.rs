//! The `Caller` abstraction shared by every method

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::RpcError;
use crate::Error;

/// One request element of a batch
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Request {
    /// JSON-RPC method name
    pub method: String,
    /// Wire-shaped parameters
    pub params: Vec<Value>,
}

impl Request {
    /// Create a request element
    pub fn new(method: impl Into<String>, params: Vec<Value>) -> Self {
        Self {
            method: method.into(),
            params,
        }
    }
}

/// One response element of a batch: a raw result or a node error
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Response {
    /// Raw result
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// Node error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<RpcError>,
}

impl Response {
    /// Successful response
    pub fn result(result: Value) -> Self {
        Self {
            result: Some(result),
            error: None,
        }
    }

    /// Failed response
    pub fn error(error: RpcError) -> Self {
        Self {
            result: None,
            error: Some(error),
        }
    }

    /// The raw result, or the node error unchanged. A missing result is `null`.
    pub fn into_result(self) -> Result<Value, Error> {
        match self.error {
            Some(err) => Err(Error::Rpc(err)),
            None => Ok(self.result.unwrap_or(Value::Null)),
        }
    }
}

/// A typed call that can be sent in a batch.
///
/// `create_request` may be called any number of times and must return the
/// same request every time. `handle_response` consumes the caller, so a caller
/// whose response was handled cannot be sent again.
pub trait Caller: Send {
    /// Build the request element
    fn create_request(&self) -> Result<Request, Error>;

    /// Decode the response element into the caller's destination
    fn handle_response(self: Box<Self>, response: Response) -> Result<(), Error>;
}

/// Box a caller for a heterogeneous batch
pub fn boxed<'a, C: Caller + 'a>(caller: C) -> Box<dyn Caller + 'a> {
    Box::new(caller)
}

/// Collect callers of different types into a batch for
/// [`Client::call`](crate::Client::call).
///
/// ```rust,ignore
/// client.call(batch![
///     eth::balance(addr, None).returns(&mut balance),
///     eth::chain_id().returns(&mut chain_id),
/// ]).await?;
/// ```
#[macro_export]
macro_rules! batch {
    ($($caller:expr),* $(,)?) => {
        vec![$($crate::boxed($caller)),*]
    };
}
