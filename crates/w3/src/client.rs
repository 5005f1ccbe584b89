//! Client - sends batches of callers

use tracing::{debug, warn};

use crate::caller::{Caller, Request, Response};
use crate::config::ClientConfig;
use crate::error::CallErrors;
use crate::transport::BatchTransport;
use crate::Error;

#[cfg(feature = "http")]
use crate::transport::HttpTransport;

/// Executes callers in JSON-RPC batches
pub struct Client {
    transport: Box<dyn BatchTransport>,
    max_batch_size: usize,
}

impl Client {
    /// Create a client over `transport` with default limits
    pub fn new(transport: impl BatchTransport + 'static) -> Self {
        Self::with_config(transport, &ClientConfig::default())
    }

    /// Create a client over `transport` with the limits from `config`
    pub fn with_config(transport: impl BatchTransport + 'static, config: &ClientConfig) -> Self {
        Self {
            transport: Box::new(transport),
            max_batch_size: config.max_batch_size,
        }
    }

    /// Create a client over HTTP
    #[cfg(feature = "http")]
    pub fn http(config: &ClientConfig) -> Result<Self, Error> {
        Ok(Self::with_config(HttpTransport::from_config(config)?, config))
    }

    /// Send the callers as one batch and route each response to its caller.
    ///
    /// All requests are built first; a construction error aborts the call
    /// before anything is sent. If any caller fails afterwards the result is
    /// [`Error::Batch`] with one slot per caller, and the other callers still
    /// receive their values.
    pub async fn call<'a>(&self, callers: Vec<Box<dyn Caller + 'a>>) -> Result<(), Error> {
        if callers.is_empty() {
            return Ok(());
        }

        let requests = callers
            .iter()
            .map(|caller| caller.create_request())
            .collect::<Result<Vec<_>, _>>()?;
        let responses = self.send(&requests).await?;

        let mut errors = Vec::with_capacity(callers.len());
        let mut failed = false;
        for ((caller, response), request) in callers.into_iter().zip(responses).zip(&requests) {
            match caller.handle_response(response) {
                Ok(()) => errors.push(None),
                Err(err) => {
                    debug!(method = %request.method, error = %err, "call failed");
                    failed = true;
                    errors.push(Some(err));
                }
            }
        }

        if failed {
            return Err(Error::Batch(CallErrors::new(errors)));
        }
        Ok(())
    }

    /// Send a single caller, returning its own error on failure
    pub async fn call_one<'a>(&self, caller: impl Caller + 'a) -> Result<(), Error> {
        match self.call(vec![crate::boxed(caller)]).await {
            Err(Error::Batch(errors)) => Err(errors
                .into_first()
                .unwrap_or_else(|| Error::Transport("batch failed without an error".into()))),
            other => other,
        }
    }

    /// Send requests in chunks of at most `max_batch_size`, keeping order
    async fn send(&self, requests: &[Request]) -> Result<Vec<Response>, Error> {
        let chunk_size = match self.max_batch_size {
            0 => requests.len(),
            n => n,
        };

        let mut responses = Vec::with_capacity(requests.len());
        for chunk in requests.chunks(chunk_size) {
            debug!(
                batch_size = chunk.len(),
                methods = ?chunk.iter().map(|r| r.method.as_str()).collect::<Vec<_>>(),
                "sending batch"
            );

            let chunk_responses = self.transport.send_batch(chunk).await?;
            if chunk_responses.len() != chunk.len() {
                warn!(
                    expected = chunk.len(),
                    got = chunk_responses.len(),
                    "transport returned wrong number of responses"
                );
                return Err(Error::Transport(format!(
                    "expected {} responses, got {}",
                    chunk.len(),
                    chunk_responses.len()
                )));
            }
            responses.extend(chunk_responses);
        }
        Ok(responses)
    }
}
