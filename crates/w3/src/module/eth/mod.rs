//! Ethereum namespace methods (eth_*)
//!
//! Each constructor returns a builder; call `.returns(&mut dest)` on it to get
//! a [`Caller`](crate::Caller) for [`Client::call`](crate::Client::call).
//! Block-scoped methods take `None` for the latest block.

mod call;
mod call_func;
mod logs;

pub use call::{access_list, call, estimate_gas};
pub use call_func::{call_func, CallFuncCaller, CallFuncFactory};
pub use logs::{logs, LogsCaller, LogsFactory};

use bytes::Bytes;
use serde_json::json;
use w3_primitives::{Address, H256, U256};

use crate::args::block_number_arg;
use crate::factory::{hex_big_ret_wrapper, hex_bytes_ret_wrapper, hex_u64_ret_wrapper, Factory};
use crate::types::BlockNumber;

/// eth_getBalance - Balance of an account in wei
pub fn balance(address: Address, block: Option<BlockNumber>) -> Factory<U256> {
    Factory::with_ret_wrapper(
        "eth_getBalance",
        vec![json!(address).into(), block_number_arg(block).into()],
        hex_big_ret_wrapper,
    )
}

/// eth_getTransactionCount - Nonce of an account
pub fn nonce(address: Address, block: Option<BlockNumber>) -> Factory<u64> {
    Factory::with_ret_wrapper(
        "eth_getTransactionCount",
        vec![json!(address).into(), block_number_arg(block).into()],
        hex_u64_ret_wrapper,
    )
}

/// eth_getCode - Code stored at an address
pub fn code(address: Address, block: Option<BlockNumber>) -> Factory<Bytes> {
    Factory::with_ret_wrapper(
        "eth_getCode",
        vec![json!(address).into(), block_number_arg(block).into()],
        hex_bytes_ret_wrapper,
    )
}

/// eth_getStorageAt - Value of a storage slot
pub fn storage_at(address: Address, slot: H256, block: Option<BlockNumber>) -> Factory<H256> {
    Factory::new(
        "eth_getStorageAt",
        vec![
            json!(address).into(),
            json!(slot).into(),
            block_number_arg(block).into(),
        ],
    )
}

/// eth_blockNumber - Number of the latest block
pub fn block_number() -> Factory<U256> {
    Factory::with_ret_wrapper("eth_blockNumber", vec![], hex_big_ret_wrapper)
}

/// eth_chainId - Chain ID
pub fn chain_id() -> Factory<u64> {
    Factory::with_ret_wrapper("eth_chainId", vec![], hex_u64_ret_wrapper)
}

/// eth_gasPrice - Current gas price in wei
pub fn gas_price() -> Factory<U256> {
    Factory::with_ret_wrapper("eth_gasPrice", vec![], hex_big_ret_wrapper)
}
