//! Generic caller built from a method name and its parameters
//!
//! Most methods need nothing more than a method name, a parameter list and a
//! way to decode the result. [`Factory`] captures exactly that; method
//! constructors in [`crate::module`] are thin instantiations of it.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::Value;
use w3_primitives::U256;

use crate::args::to_call_arg;
use crate::caller::{Caller, Request, Response};
use crate::codec;
use crate::types::Message;
use crate::Error;

/// A request parameter, either already wire-shaped or shaped at send time.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    /// Wire-shaped value
    Wire(Value),
    /// Call message whose input is encoded by the args wrapper
    Message(Message),
}

impl From<Value> for Param {
    fn from(value: Value) -> Self {
        Param::Wire(value)
    }
}

impl From<Message> for Param {
    fn from(msg: Message) -> Self {
        Param::Message(msg)
    }
}

/// Shapes the full parameter list right before the request is built
pub type ArgsWrapper = fn(&[Param]) -> Result<Vec<Value>, Error>;

/// Decodes the raw result into the destination type
pub type RetWrapper<T> = fn(Value) -> Result<T, Error>;

/// Builder for a single-method caller.
///
/// Defaults: params pass through unchanged ([`default_args_wrapper`]) and
/// the result is decoded with the type's serde mapping.
#[derive(Debug, Clone)]
pub struct Factory<T> {
    method: &'static str,
    params: Vec<Param>,
    args_wrapper: ArgsWrapper,
    ret_wrapper: RetWrapper<T>,
}

impl<T: DeserializeOwned> Factory<T> {
    /// Create a factory decoding the result with `T`'s serde mapping
    pub fn new(method: &'static str, params: Vec<Param>) -> Self {
        Self::with_ret_wrapper(method, params, default_ret_wrapper::<T>)
    }
}

impl<T> Factory<T> {
    /// Create a factory with a custom result decoder
    pub fn with_ret_wrapper(
        method: &'static str,
        params: Vec<Param>,
        ret_wrapper: RetWrapper<T>,
    ) -> Self {
        Self {
            method,
            params,
            args_wrapper: default_args_wrapper,
            ret_wrapper,
        }
    }

    /// Replace the args wrapper
    pub fn args_wrapper(mut self, args_wrapper: ArgsWrapper) -> Self {
        self.args_wrapper = args_wrapper;
        self
    }

    /// Replace the result decoder
    pub fn ret_wrapper(mut self, ret_wrapper: RetWrapper<T>) -> Self {
        self.ret_wrapper = ret_wrapper;
        self
    }

    /// JSON-RPC method name
    pub fn method(&self) -> &'static str {
        self.method
    }

    /// Build the request element
    pub fn create_request(&self) -> Result<Request, Error> {
        let params = (self.args_wrapper)(&self.params)?;
        Ok(Request::new(self.method, params))
    }

    /// Decode the result into `dest` once the call completes
    pub fn returns(self, dest: &mut T) -> FactoryCaller<'_, T> {
        FactoryCaller {
            factory: self,
            dest,
        }
    }
}

/// A [`Factory`] bound to its destination
#[derive(Debug)]
pub struct FactoryCaller<'a, T> {
    factory: Factory<T>,
    dest: &'a mut T,
}

impl<T: Send> Caller for FactoryCaller<'_, T> {
    fn create_request(&self) -> Result<Request, Error> {
        self.factory.create_request()
    }

    fn handle_response(self: Box<Self>, response: Response) -> Result<(), Error> {
        let FactoryCaller { factory, dest } = *self;
        let raw = response.into_result()?;
        // decode fully before touching the destination
        let value = (factory.ret_wrapper)(raw)?;
        *dest = value;
        Ok(())
    }
}

// ==================== Args wrappers ====================

/// Pass wire params through unchanged. Call messages are rejected; use
/// [`msg_args_wrapper`] for methods that take one.
pub fn default_args_wrapper(params: &[Param]) -> Result<Vec<Value>, Error> {
    params
        .iter()
        .map(|param| match param {
            Param::Wire(value) => Ok(value.clone()),
            Param::Message(_) => Err(Error::Construction(
                "call message parameter needs msg_args_wrapper".into(),
            )),
        })
        .collect()
}

/// Resolve call messages (encoding their input) and shape them as call objects.
pub fn msg_args_wrapper(params: &[Param]) -> Result<Vec<Value>, Error> {
    params
        .iter()
        .map(|param| match param {
            Param::Wire(value) => Ok(value.clone()),
            Param::Message(msg) => Ok(to_call_arg(&msg.resolve()?)),
        })
        .collect()
}

// ==================== Ret wrappers ====================

fn default_ret_wrapper<T: DeserializeOwned>(raw: Value) -> Result<T, Error> {
    Ok(serde_json::from_value(raw)?)
}

/// Decode a hex quantity into a U256
pub fn hex_big_ret_wrapper(raw: Value) -> Result<U256, Error> {
    Ok(codec::u256_from_value("result", &raw)?)
}

/// Decode a hex quantity into a u64
pub fn hex_u64_ret_wrapper(raw: Value) -> Result<u64, Error> {
    Ok(codec::u64_from_value("result", &raw)?)
}

/// Decode hex bytes
pub fn hex_bytes_ret_wrapper(raw: Value) -> Result<Bytes, Error> {
    Ok(codec::bytes_from_value("result", &raw)?)
}
