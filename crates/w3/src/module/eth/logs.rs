use serde_json::Value;

use crate::args::to_filter_arg;
use crate::caller::{Caller, Request, Response};
use crate::types::{FilterQuery, Log};
use crate::Error;

/// eth_getLogs - Logs matching a filter query
pub fn logs(query: FilterQuery) -> LogsFactory {
    LogsFactory { query }
}

/// Builder for an `eth_getLogs` call
#[derive(Debug, Clone)]
pub struct LogsFactory {
    query: FilterQuery,
}

impl LogsFactory {
    /// Build the request element; fails when the query mixes a block hash
    /// with a block range
    pub fn create_request(&self) -> Result<Request, Error> {
        Ok(Request::new("eth_getLogs", vec![to_filter_arg(&self.query)?]))
    }

    /// Replace `dest` with the matching logs
    pub fn returns(self, dest: &mut Vec<Log>) -> LogsCaller<'_> {
        LogsCaller {
            factory: self,
            dest,
        }
    }
}

/// A [`LogsFactory`] bound to its destination
#[derive(Debug)]
pub struct LogsCaller<'a> {
    factory: LogsFactory,
    dest: &'a mut Vec<Log>,
}

impl Caller for LogsCaller<'_> {
    fn create_request(&self) -> Result<Request, Error> {
        self.factory.create_request()
    }

    fn handle_response(self: Box<Self>, response: Response) -> Result<(), Error> {
        let LogsCaller { dest, .. } = *self;
        let logs = match response.into_result()? {
            Value::Null => Vec::new(),
            raw => serde_json::from_value(raw)?,
        };
        *dest = logs;
        Ok(())
    }
}
