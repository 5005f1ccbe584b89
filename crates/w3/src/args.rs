//! Wire shaping of call arguments

use serde_json::{json, Map, Value};

use crate::codec;
use crate::types::{BlockNumber, FilterQuery, ResolvedMessage, State};
use crate::Error;

/// Wire form of a block selector; `None` selects `"latest"`.
///
/// Every block-scoped method goes through this function.
pub fn block_number_arg(block: Option<BlockNumber>) -> Value {
    match block.unwrap_or_default() {
        BlockNumber::Number(n) => Value::String(codec::encode_u64(n)),
        other => Value::String(other.to_string()),
    }
}

/// Call object for `eth_call`, `eth_estimateGas` and `eth_createAccessList`.
///
/// `to` is always present. Every other field is omitted when zero or empty.
pub fn to_call_arg(msg: &ResolvedMessage) -> Value {
    let mut arg = Map::new();
    arg.insert("to".into(), json!(msg.to));

    if let Some(from) = msg.from.filter(|from| !from.is_zero()) {
        arg.insert("from".into(), json!(from));
    }
    if !msg.input.is_empty() {
        arg.insert("data".into(), Value::String(codec::encode_bytes(&msg.input)));
    }
    if !msg.value.is_zero() {
        arg.insert("value".into(), Value::String(codec::encode_u256(&msg.value)));
    }
    if msg.gas != 0 {
        arg.insert("gas".into(), Value::String(codec::encode_u64(msg.gas)));
    }
    if !msg.gas_price.is_zero() {
        arg.insert("gasPrice".into(), Value::String(codec::encode_u256(&msg.gas_price)));
    }
    if !msg.gas_fee_cap.is_zero() {
        arg.insert(
            "maxFeePerGas".into(),
            Value::String(codec::encode_u256(&msg.gas_fee_cap)),
        );
    }
    if !msg.gas_tip_cap.is_zero() {
        arg.insert(
            "maxPriorityFeePerGas".into(),
            Value::String(codec::encode_u256(&msg.gas_tip_cap)),
        );
    }
    if !msg.access_list.is_empty() {
        arg.insert("accessList".into(), json!(msg.access_list));
    }

    Value::Object(arg)
}

/// Filter object for `eth_getLogs`.
///
/// Fails when `block_hash` is combined with a block range. Without a block
/// hash the range defaults to block 0 through `"latest"`.
pub fn to_filter_arg(query: &FilterQuery) -> Result<Value, Error> {
    let mut arg = Map::new();

    let topics = query
        .topics
        .iter()
        .map(|alternatives| match alternatives.as_slice() {
            [] => Value::Null,
            _ => json!(alternatives),
        })
        .collect();
    arg.insert("topics".into(), Value::Array(topics));

    if !query.addresses.is_empty() {
        arg.insert("address".into(), json!(query.addresses));
    }

    match query.block_hash {
        Some(hash) => {
            if query.from_block.is_some() || query.to_block.is_some() {
                return Err(Error::Construction(
                    "cannot specify both block hash and from/to block".into(),
                ));
            }
            arg.insert("blockHash".into(), json!(hash));
        }
        None => {
            let from = query.from_block.unwrap_or(BlockNumber::Number(0));
            arg.insert("fromBlock".into(), block_number_arg(Some(from)));
            arg.insert("toBlock".into(), block_number_arg(query.to_block));
        }
    }

    Ok(Value::Object(arg))
}

/// State override object, or `None` when there is nothing to override.
///
/// Unset account fields are omitted; storage slots go under `stateDiff` so
/// they patch the existing storage instead of replacing it.
pub fn to_overrides_arg(state: &State) -> Option<Value> {
    if state.is_empty() {
        return None;
    }

    let overrides = state
        .iter()
        .map(|(address, account)| {
            let mut arg = Map::new();
            if let Some(nonce) = account.nonce {
                arg.insert("nonce".into(), Value::String(codec::encode_u64(nonce)));
            }
            if let Some(balance) = &account.balance {
                arg.insert("balance".into(), Value::String(codec::encode_u256(balance)));
            }
            if let Some(code) = &account.code {
                arg.insert("code".into(), Value::String(codec::encode_bytes(code)));
            }
            if !account.storage.is_empty() {
                let storage = account
                    .storage
                    .iter()
                    .map(|(slot, value)| (slot.to_hex(), Value::String(value.to_hex())))
                    .collect();
                arg.insert("stateDiff".into(), Value::Object(storage));
            }
            (address.to_hex(), Value::Object(arg))
        })
        .collect();

    Some(Value::Object(overrides))
}
