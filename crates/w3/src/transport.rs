//! Batch transport boundary

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use serde_json::Value;

use crate::caller::{Request, Response};
use crate::error::RpcError;
use crate::Error;

/// Sends a batch of requests in one exchange (object-safe).
///
/// Implementations return exactly one response per request, in request order.
#[async_trait]
pub trait BatchTransport: Send + Sync {
    /// Send the batch and return the response elements
    async fn send_batch(&self, requests: &[Request]) -> Result<Vec<Response>, Error>;
}

#[async_trait]
impl<T: BatchTransport + ?Sized> BatchTransport for Arc<T> {
    async fn send_batch(&self, requests: &[Request]) -> Result<Vec<Response>, Error> {
        (**self).send_batch(requests).await
    }
}

// ==================== Mock ====================

#[derive(Default)]
struct MockState {
    queued: VecDeque<Vec<Response>>,
    responses: HashMap<String, Response>,
    sent: Vec<Vec<Request>>,
}

/// In-memory transport for tests.
///
/// Batches queued with [`push_batch`](Self::push_batch) are returned as-is,
/// one per exchange. Otherwise each request is answered from the per-method
/// responses, or with a "method not found" error.
#[derive(Default)]
pub struct MockTransport {
    state: Mutex<MockState>,
}

impl MockTransport {
    /// Create an empty mock transport
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue the responses for the next exchange
    pub fn push_batch(&self, responses: Vec<Response>) {
        self.state().queued.push_back(responses);
    }

    /// Answer every request for `method` with `result`
    pub fn set_response(&self, method: &str, result: Value) {
        self.state()
            .responses
            .insert(method.to_string(), Response::result(result));
    }

    /// Answer every request for `method` with `error`
    pub fn set_error(&self, method: &str, error: RpcError) {
        self.state()
            .responses
            .insert(method.to_string(), Response::error(error));
    }

    /// Every batch sent so far, oldest first
    pub fn sent_batches(&self) -> Vec<Vec<Request>> {
        self.state().sent.clone()
    }
}

#[async_trait]
impl BatchTransport for MockTransport {
    async fn send_batch(&self, requests: &[Request]) -> Result<Vec<Response>, Error> {
        let mut state = self.state();
        state.sent.push(requests.to_vec());

        if let Some(batch) = state.queued.pop_front() {
            return Ok(batch);
        }

        Ok(requests
            .iter()
            .map(|request| {
                state.responses.get(&request.method).cloned().unwrap_or_else(|| {
                    Response::error(RpcError::new(
                        -32601,
                        format!("Method not found: {}", request.method),
                    ))
                })
            })
            .collect())
    }
}

// ==================== HTTP ====================

#[cfg(feature = "http")]
pub use http_transport::HttpTransport;

#[cfg(feature = "http")]
mod http_transport {
    use std::sync::atomic::{AtomicU64, Ordering};

    use async_trait::async_trait;
    use serde::{Deserialize, Serialize};
    use serde_json::Value;
    use tracing::trace;

    use super::BatchTransport;
    use crate::caller::{Request, Response};
    use crate::config::ClientConfig;
    use crate::error::RpcError;
    use crate::Error;

    /// JSON-RPC 2.0 batch transport over HTTP
    pub struct HttpTransport {
        client: reqwest::Client,
        url: String,
        request_id: AtomicU64,
    }

    impl HttpTransport {
        /// Create a transport for `url` without a request timeout
        pub fn new(url: &str) -> Self {
            Self {
                client: reqwest::Client::new(),
                url: url.to_string(),
                request_id: AtomicU64::new(1),
            }
        }

        /// Create a transport from a client config
        pub fn from_config(config: &ClientConfig) -> Result<Self, Error> {
            let client = reqwest::Client::builder()
                .timeout(config.request_timeout())
                .build()
                .map_err(|e| Error::Transport(e.to_string()))?;
            Ok(Self {
                client,
                url: config.url.clone(),
                request_id: AtomicU64::new(1),
            })
        }

        /// Reserve `count` consecutive request ids
        fn next_ids(&self, count: usize) -> u64 {
            self.request_id.fetch_add(count as u64, Ordering::SeqCst)
        }
    }

    #[derive(Serialize)]
    struct JsonRpcRequest<'a> {
        jsonrpc: &'static str,
        id: u64,
        method: &'a str,
        params: &'a [Value],
    }

    #[derive(Deserialize)]
    struct JsonRpcResponse {
        #[serde(default)]
        id: Value,
        result: Option<Value>,
        error: Option<RpcError>,
    }

    /// Nodes answer a rejected batch with a single error object
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum BatchReply {
        Batch(Vec<JsonRpcResponse>),
        Single(JsonRpcResponse),
    }

    #[async_trait]
    impl BatchTransport for HttpTransport {
        async fn send_batch(&self, requests: &[Request]) -> Result<Vec<Response>, Error> {
            if requests.is_empty() {
                return Ok(Vec::new());
            }

            let first_id = self.next_ids(requests.len());
            let envelope: Vec<JsonRpcRequest<'_>> = requests
                .iter()
                .zip(first_id..)
                .map(|(request, id)| JsonRpcRequest {
                    jsonrpc: "2.0",
                    id,
                    method: &request.method,
                    params: &request.params,
                })
                .collect();
            trace!(first_id, count = requests.len(), url = %self.url, "posting batch");

            let response = self
                .client
                .post(&self.url)
                .json(&envelope)
                .send()
                .await
                .map_err(|e| Error::Transport(e.to_string()))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                return Err(Error::Transport(format!("HTTP {status}: {body}")));
            }

            let reply: BatchReply = response
                .json()
                .await
                .map_err(|e| Error::Transport(e.to_string()))?;

            match reply {
                BatchReply::Batch(elements) => order_by_id(elements, first_id, requests.len()),
                BatchReply::Single(element) => Err(Error::Transport(match element.error {
                    Some(err) => format!("batch rejected: {err}"),
                    None => "expected a batch response, got a single object".to_string(),
                })),
            }
        }
    }

    /// Put response elements back into request order
    fn order_by_id(
        elements: Vec<JsonRpcResponse>,
        first_id: u64,
        count: usize,
    ) -> Result<Vec<Response>, Error> {
        let mut slots: Vec<Option<Response>> = vec![None; count];
        for element in elements {
            let index = element
                .id
                .as_u64()
                .and_then(|id| id.checked_sub(first_id))
                .and_then(|offset| usize::try_from(offset).ok())
                .filter(|index| *index < count)
                .ok_or_else(|| {
                    Error::Transport(format!("unexpected response id {}", element.id))
                })?;
            slots[index] = Some(Response {
                result: element.result,
                error: element.error,
            });
        }

        slots
            .into_iter()
            .zip(first_id..)
            .map(|(slot, id)| {
                slot.ok_or_else(|| Error::Transport(format!("missing response for id {id}")))
            })
            .collect()
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_mock_per_method_responses() {
        let transport = MockTransport::new();
        transport.set_response("eth_chainId", json!("0x1"));
        transport.set_error("eth_gasPrice", RpcError::new(-32000, "boom"));

        let requests = vec![
            Request::new("eth_chainId", vec![]),
            Request::new("eth_gasPrice", vec![]),
            Request::new("eth_unknown", vec![]),
        ];
        let responses = transport.send_batch(&requests).await.unwrap();

        assert_eq!(responses[0], Response::result(json!("0x1")));
        assert_eq!(responses[1].error, Some(RpcError::new(-32000, "boom")));
        assert_eq!(responses[2].error.as_ref().map(|e| e.code), Some(-32601));
        assert_eq!(transport.sent_batches(), vec![requests]);
    }

    #[tokio::test]
    async fn test_mock_queued_batch_takes_priority() {
        let transport = MockTransport::new();
        transport.set_response("eth_chainId", json!("0x1"));
        transport.push_batch(vec![Response::result(json!("0x5"))]);

        let requests = [Request::new("eth_chainId", vec![])];
        let first = transport.send_batch(&requests).await.unwrap();
        let second = transport.send_batch(&requests).await.unwrap();

        assert_eq!(first, vec![Response::result(json!("0x5"))]);
        assert_eq!(second, vec![Response::result(json!("0x1"))]);
        assert_eq!(transport.sent_batches().len(), 2);
    }

    #[tokio::test]
    async fn test_arc_transport() {
        let transport = Arc::new(MockTransport::new());
        transport.set_response("web3_clientVersion", json!("Geth"));

        let shared: Arc<MockTransport> = Arc::clone(&transport);
        let responses = shared
            .send_batch(&[Request::new("web3_clientVersion", vec![])])
            .await
            .unwrap();
        assert_eq!(responses, vec![Response::result(json!("Geth"))]);
        assert_eq!(transport.sent_batches().len(), 1);
    }
}
