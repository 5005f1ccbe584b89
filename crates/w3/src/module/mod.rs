//! Method constructors, grouped by JSON-RPC namespace

pub mod eth;
pub mod web3;
