//! Client configuration

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Configuration for [`Client`](crate::Client) and the HTTP transport
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Node RPC endpoint
    pub url: String,
    /// Timeout for one batch exchange, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Maximum calls per batch; larger batches are split (0 = unlimited)
    #[serde(default = "default_max_batch_size")]
    pub max_batch_size: usize,
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_batch_size() -> usize {
    100
}

impl ClientConfig {
    /// Create a config for `url` with default limits
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            request_timeout_secs: default_request_timeout_secs(),
            max_batch_size: default_max_batch_size(),
        }
    }

    /// Load a config from JSON
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Request timeout
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://127.0.0.1:8545")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::from_json(r#"{"url":"http://localhost:8545"}"#).unwrap();
        assert_eq!(config.url, "http://localhost:8545");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.max_batch_size, 100);
        assert_eq!(config, ClientConfig::new("http://localhost:8545"));
    }

    #[test]
    fn test_overrides() {
        let config = ClientConfig::from_json(
            r#"{"url":"https://rpc.example","request_timeout_secs":5,"max_batch_size":0}"#,
        )
        .unwrap();
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.max_batch_size, 0);
    }

    #[test]
    fn test_missing_url() {
        assert!(matches!(ClientConfig::from_json("{}"), Err(Error::Decode(_))));
    }
}
