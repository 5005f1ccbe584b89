use bytes::Bytes;
use serde::Deserialize;
use serde_json::Value;

use crate::args::{block_number_arg, to_overrides_arg};
use crate::codec;
use crate::factory::{hex_bytes_ret_wrapper, hex_u64_ret_wrapper, msg_args_wrapper, Factory, Param};
use crate::types::{AccessList, AccessListResponse, BlockNumber, Message, State};
use crate::Error;

/// eth_call - Execute a message call without creating a transaction.
///
/// `overrides` is sent only when it is non-empty.
pub fn call(
    msg: Message,
    block: Option<BlockNumber>,
    overrides: Option<State>,
) -> Factory<Bytes> {
    let mut params = vec![Param::Message(msg), block_number_arg(block).into()];
    if let Some(overrides) = overrides.as_ref().and_then(to_overrides_arg) {
        params.push(overrides.into());
    }
    Factory::with_ret_wrapper("eth_call", params, hex_bytes_ret_wrapper)
        .args_wrapper(msg_args_wrapper)
}

/// eth_estimateGas - Gas needed to execute a message
pub fn estimate_gas(msg: Message, block: Option<BlockNumber>) -> Factory<u64> {
    Factory::with_ret_wrapper(
        "eth_estimateGas",
        vec![Param::Message(msg), block_number_arg(block).into()],
        hex_u64_ret_wrapper,
    )
    .args_wrapper(msg_args_wrapper)
}

/// eth_createAccessList - Access list and gas used for a message
pub fn access_list(msg: Message, block: Option<BlockNumber>) -> Factory<AccessListResponse> {
    Factory::with_ret_wrapper(
        "eth_createAccessList",
        vec![Param::Message(msg), block_number_arg(block).into()],
        access_list_ret_wrapper,
    )
    .args_wrapper(msg_args_wrapper)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawAccessListResponse {
    access_list: AccessList,
    gas_used: String,
}

fn access_list_ret_wrapper(raw: Value) -> Result<AccessListResponse, Error> {
    let raw: RawAccessListResponse = serde_json::from_value(raw)?;
    Ok(AccessListResponse {
        access_list: raw.access_list,
        gas_used: codec::decode_u64("gasUsed", &raw.gas_used)?,
    })
}
