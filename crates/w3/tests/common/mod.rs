//! Shared helpers for integration tests

#![allow(dead_code)]

use std::sync::Arc;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use w3::{Address, Client, MockTransport, Response};

/// Install a test subscriber once; filter with `RUST_LOG=w3=debug`
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_test_writer())
        .with(EnvFilter::from_default_env())
        .try_init();
}

/// Client over a shared mock transport
pub fn mock_client() -> (Client, Arc<MockTransport>) {
    init_tracing();
    let transport = Arc::new(MockTransport::new());
    (Client::new(Arc::clone(&transport)), transport)
}

/// Parse a response fixture such as `{"result":"0xc0fe"}`
pub fn fixture(json: &str) -> Response {
    serde_json::from_str(json).unwrap()
}

pub fn addr(s: &str) -> Address {
    Address::from_hex(s).unwrap()
}

pub const WETH: &str = "0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2";
pub const C0FE: &str = "0x000000000000000000000000000000000000c0Fe";
pub const C0DE: &str = "0x000000000000000000000000000000000000c0DE";
