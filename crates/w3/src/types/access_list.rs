use serde::{Deserialize, Serialize};
use w3_primitives::{Address, H256};

/// Storage slots of one account a transaction is expected to touch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessListEntry {
    /// Account address
    pub address: Address,
    /// Storage keys
    #[serde(default)]
    pub storage_keys: Vec<H256>,
}

/// EIP-2930 access list
pub type AccessList = Vec<AccessListEntry>;

/// Result of `eth_createAccessList`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AccessListResponse {
    /// Generated access list
    pub access_list: AccessList,
    /// Gas used when executing with the access list
    pub gas_used: u64,
}
