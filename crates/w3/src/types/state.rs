use std::collections::BTreeMap;

use bytes::Bytes;
use w3_primitives::{Address, H256, U256};

/// State overrides for `eth_call`, keyed by account
pub type State = BTreeMap<Address, Account>;

/// Overridden account fields; unset fields keep their on-chain value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Account {
    /// Nonce
    pub nonce: Option<u64>,
    /// Balance
    pub balance: Option<U256>,
    /// Code
    pub code: Option<Bytes>,
    /// Storage slots patched on top of the existing storage
    pub storage: BTreeMap<H256, H256>,
}

impl Account {
    /// Override the balance
    pub fn with_balance(mut self, balance: U256) -> Self {
        self.balance = Some(balance);
        self
    }

    /// Override the nonce
    pub fn with_nonce(mut self, nonce: u64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    /// Override the code
    pub fn with_code(mut self, code: impl Into<Bytes>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Override one storage slot
    pub fn with_storage(mut self, slot: H256, value: H256) -> Self {
        self.storage.insert(slot, value);
        self
    }
}
