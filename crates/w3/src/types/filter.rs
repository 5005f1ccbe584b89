use w3_primitives::{Address, H256};

use super::BlockNumber;

/// Query for `eth_getLogs`.
///
/// Either `block_hash` or a `from_block`/`to_block` range may be set, not
/// both. An empty topic position matches any topic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterQuery {
    /// Restrict to the block with this hash
    pub block_hash: Option<H256>,
    /// First block of the range (genesis when unset)
    pub from_block: Option<BlockNumber>,
    /// Last block of the range (latest when unset)
    pub to_block: Option<BlockNumber>,
    /// Emitting contracts; empty matches any
    pub addresses: Vec<Address>,
    /// Topic alternatives per position
    pub topics: Vec<Vec<H256>>,
}

impl FilterQuery {
    /// Create an empty query
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to a single block by hash
    pub fn block_hash(mut self, hash: H256) -> Self {
        self.block_hash = Some(hash);
        self
    }

    /// Set the first block of the range
    pub fn from_block(mut self, block: impl Into<BlockNumber>) -> Self {
        self.from_block = Some(block.into());
        self
    }

    /// Set the last block of the range
    pub fn to_block(mut self, block: impl Into<BlockNumber>) -> Self {
        self.to_block = Some(block.into());
        self
    }

    /// Add an emitting contract
    pub fn address(mut self, address: Address) -> Self {
        self.addresses.push(address);
        self
    }

    /// Append the next topic position; an empty list matches any topic
    pub fn topic(mut self, alternatives: Vec<H256>) -> Self {
        self.topics.push(alternatives);
        self
    }
}
