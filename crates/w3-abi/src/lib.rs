//! # w3-abi
//!
//! Solidity ABI encoding and decoding.
//!
//! - Encoding function arguments against a parsed [`Func`] signature
//! - Decoding return data into typed destinations ([`FromToken`])
//! - Computing function selectors
//!
//! # Example
//!
//! ```rust
//! use w3_abi::{Func, Token};
//! use w3_primitives::{Address, U256};
//!
//! let balance_of = Func::new("balanceOf(address)", "uint256").unwrap();
//! let input = balance_of.encode_args(&[Token::Address(Address::ZERO)]).unwrap();
//! assert_eq!(&input[..4], &[0x70, 0xa0, 0x82, 0x31]);
//!
//! let output = [0u8; 32];
//! let balance: U256 = balance_of.decode_returns(&output).unwrap();
//! assert!(balance.is_zero());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

mod decode;
mod detokenize;
mod encode;
mod error;
mod func;
mod types;

pub use decode::decode;
pub use detokenize::{ArrayElement, FromToken};
pub use encode::{encode, function_selector};
pub use error::AbiError;
pub use func::Func;
pub use types::{ParamType, Token, I256};
