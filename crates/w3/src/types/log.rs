use bytes::Bytes;
use serde::{Deserialize, Deserializer};
use w3_primitives::{Address, H256};

use crate::codec;

/// Log emitted by a contract, as returned by `eth_getLogs`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Log {
    /// Emitting contract
    pub address: Address,
    /// Indexed topics
    pub topics: Vec<H256>,
    /// Non-indexed data
    pub data: Bytes,
    /// Block number (`None` while pending)
    pub block_number: Option<u64>,
    /// Block hash
    pub block_hash: Option<H256>,
    /// Transaction hash
    pub transaction_hash: Option<H256>,
    /// Transaction index in the block
    pub transaction_index: Option<u64>,
    /// Log index in the block
    pub log_index: Option<u64>,
    /// Whether the log was removed by a reorg
    pub removed: bool,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawLog {
    address: Address,
    #[serde(default)]
    topics: Vec<H256>,
    data: String,
    block_number: Option<String>,
    block_hash: Option<H256>,
    transaction_hash: Option<H256>,
    transaction_index: Option<String>,
    log_index: Option<String>,
    #[serde(default)]
    removed: bool,
}

impl<'de> Deserialize<'de> for Log {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        use serde::de::Error as _;

        let raw = RawLog::deserialize(deserializer)?;
        let quantity = |field: &str, value: Option<String>| {
            value
                .map(|v| codec::decode_u64(field, &v))
                .transpose()
                .map_err(D::Error::custom)
        };

        Ok(Log {
            address: raw.address,
            topics: raw.topics,
            data: codec::decode_bytes("data", &raw.data).map_err(D::Error::custom)?,
            block_number: quantity("blockNumber", raw.block_number)?,
            block_hash: raw.block_hash,
            transaction_hash: raw.transaction_hash,
            transaction_index: quantity("transactionIndex", raw.transaction_index)?,
            log_index: quantity("logIndex", raw.log_index)?,
            removed: raw.removed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_deserialize() {
        let log: Log = serde_json::from_str(
            r#"{
                "address": "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2",
                "topics": ["0xddf252ad1be2c89b69c2b068fc378daa952ba7f163c4a11628f55a4df523b3ef"],
                "data": "0x00000000000000000000000000000000000000000000000000000000000000ff",
                "blockNumber": "0xe4e1c0",
                "blockHash": "0x0000000000000000000000000000000000000000000000000000000000000001",
                "transactionHash": "0x0000000000000000000000000000000000000000000000000000000000000002",
                "transactionIndex": "0x0",
                "logIndex": "0x1b",
                "removed": false
            }"#,
        )
        .unwrap();

        assert_eq!(log.topics.len(), 1);
        assert_eq!(log.data.len(), 32);
        assert_eq!(log.block_number, Some(15_000_000));
        assert_eq!(log.transaction_index, Some(0));
        assert_eq!(log.log_index, Some(27));
        assert!(!log.removed);
    }

    #[test]
    fn test_pending_log() {
        let log: Log = serde_json::from_str(
            r#"{"address":"0x0000000000000000000000000000000000000001","topics":[],"data":"0x","blockNumber":null,"blockHash":null,"transactionHash":null,"transactionIndex":null,"logIndex":null}"#,
        )
        .unwrap();

        assert!(log.data.is_empty());
        assert_eq!(log.block_number, None);
        assert_eq!(log.log_index, None);
    }

    #[test]
    fn test_log_rejects_bad_quantity() {
        let result: Result<Log, _> = serde_json::from_str(
            r#"{"address":"0x0000000000000000000000000000000000000001","topics":[],"data":"0x","blockNumber":"0x01"}"#,
        );
        let err = result.unwrap_err().to_string();
        assert!(err.contains("blockNumber"), "{err}");
    }
}
