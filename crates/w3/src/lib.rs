//! # w3
//!
//! Typed, batchable request builders for Ethereum JSON-RPC nodes.
//!
//! ## Features
//!
//! - **Method constructors**: [`eth`] and [`web3`] return builders that are
//!   bound to a typed destination with `.returns(&mut dest)`
//! - **Client**: sends any mix of callers in one JSON-RPC batch and routes
//!   each response back to the caller that produced the request
//! - **Contract calls**: [`eth::call_func`] encodes arguments and decodes
//!   return values from a Solidity function signature
//! - **Transports**: HTTP (feature `http`, on by default) and an in-memory
//!   [`MockTransport`] for tests
//!
//! ## Quick Start
//!
//! ```rust
//! use w3::{batch, eth, Address, Client, MockTransport, U256};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let transport = MockTransport::new();
//!     transport.set_response("eth_getBalance", "0xc0fe".into());
//!     transport.set_response("eth_chainId", "0x1".into());
//!     let client = Client::new(transport);
//!
//!     let account = Address::from_hex("0x000000000000000000000000000000000000c0Fe")?;
//!     let mut balance = U256::zero();
//!     let mut chain_id = 0u64;
//!     client
//!         .call(batch![
//!             eth::balance(account, None).returns(&mut balance),
//!             eth::chain_id().returns(&mut chain_id),
//!         ])
//!         .await?;
//!
//!     assert_eq!(balance, U256::from(0xc0feu64));
//!     assert_eq!(chain_id, 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Contract Calls
//!
//! ```rust,no_run
//! use w3::{eth, Address, BlockNumber, Client, ClientConfig, Func, Token, U256};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::http(&ClientConfig::new("http://127.0.0.1:8545"))?;
//!
//!     let weth = Address::from_hex("0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2")?;
//!     let owner = Address::from_hex("0x000000000000000000000000000000000000c0Fe")?;
//!     let balance_of = Func::new("balanceOf(address)", "uint256")?;
//!
//!     let mut balance = U256::zero();
//!     client
//!         .call_one(
//!             eth::call_func(balance_of, weth, vec![Token::Address(owner)])
//!                 .at_block(BlockNumber::Latest)
//!                 .returns(&mut balance),
//!         )
//!         .await?;
//!     println!("balance: {balance}");
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod args;
pub mod caller;
pub mod client;
pub mod codec;
pub mod config;
pub mod error;
pub mod factory;
pub mod module;
pub mod transport;
pub mod types;

pub use caller::{boxed, Caller, Request, Response};
pub use client::Client;
pub use config::ClientConfig;
pub use error::{CallErrors, Error, ErrorKind, RpcError, WireFormatError};
pub use factory::{ArgsWrapper, Factory, FactoryCaller, Param, RetWrapper};
pub use module::{eth, web3};
pub use transport::{BatchTransport, MockTransport};
pub use types::{
    AccessList, AccessListEntry, AccessListResponse, Account, BlockNumber, FilterQuery, Log,
    Message, ResolvedMessage, State,
};

#[cfg(feature = "http")]
pub use transport::HttpTransport;

pub use w3_abi::{Func, Token};
pub use w3_primitives::{Address, H256, U256};
