use bytes::Bytes;
use w3_abi::{Func, Token};
use w3_primitives::{Address, U256};

use super::AccessList;
use crate::Error;

/// Call message for `eth_call`, `eth_estimateGas` and `eth_createAccessList`.
///
/// The input is either raw `input` bytes or a function descriptor with its
/// arguments, encoded by [`Message::resolve`]. Raw input takes precedence when
/// both are set. Zero values mean "unset" and are left off the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    /// Sender
    pub from: Option<Address>,
    /// Recipient (`None` for contract creation)
    pub to: Option<Address>,
    /// Raw call data
    pub input: Option<Bytes>,
    /// Function to encode the call data from
    pub func: Option<Func>,
    /// Arguments for `func`
    pub args: Vec<Token>,
    /// Value to transfer
    pub value: U256,
    /// Gas limit
    pub gas: u64,
    /// Gas price (legacy)
    pub gas_price: U256,
    /// Max fee per gas (EIP-1559)
    pub gas_fee_cap: U256,
    /// Max priority fee per gas (EIP-1559)
    pub gas_tip_cap: U256,
    /// EIP-2930 access list
    pub access_list: AccessList,
}

impl Message {
    /// Create a message to `to`
    pub fn new(to: Address) -> Self {
        Self {
            to: Some(to),
            ..Default::default()
        }
    }

    /// Set the sender
    pub fn from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    /// Set raw call data
    pub fn input(mut self, input: impl Into<Bytes>) -> Self {
        self.input = Some(input.into());
        self
    }

    /// Encode the call data from `func` and `args` when the message is sent
    pub fn func(mut self, func: Func, args: Vec<Token>) -> Self {
        self.func = Some(func);
        self.args = args;
        self
    }

    /// Set the value to transfer
    pub fn value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    /// Set the gas limit
    pub fn gas(mut self, gas: u64) -> Self {
        self.gas = gas;
        self
    }

    /// Set the legacy gas price
    pub fn gas_price(mut self, gas_price: U256) -> Self {
        self.gas_price = gas_price;
        self
    }

    /// Set EIP-1559 fee caps
    pub fn fees(mut self, max_fee_per_gas: U256, max_priority_fee_per_gas: U256) -> Self {
        self.gas_fee_cap = max_fee_per_gas;
        self.gas_tip_cap = max_priority_fee_per_gas;
        self
    }

    /// Set the access list
    pub fn access_list(mut self, access_list: AccessList) -> Self {
        self.access_list = access_list;
        self
    }

    /// Whether the call data still has to be encoded from `func`
    pub fn needs_encoding(&self) -> bool {
        self.input.is_none() && self.func.is_some()
    }

    /// Produce the resolved message with its call data encoded.
    ///
    /// Does not modify `self`, so the same message can be resolved for
    /// several calls.
    pub fn resolve(&self) -> Result<ResolvedMessage, Error> {
        let input = match (&self.input, &self.func) {
            (Some(input), _) => input.clone(),
            (None, Some(func)) => Bytes::from(func.encode_args(&self.args)?),
            (None, None) => Bytes::new(),
        };

        Ok(ResolvedMessage {
            from: self.from,
            to: self.to,
            input,
            value: self.value,
            gas: self.gas,
            gas_price: self.gas_price,
            gas_fee_cap: self.gas_fee_cap,
            gas_tip_cap: self.gas_tip_cap,
            access_list: self.access_list.clone(),
        })
    }
}

/// A call message with its call data encoded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedMessage {
    /// Sender
    pub from: Option<Address>,
    /// Recipient
    pub to: Option<Address>,
    /// Call data
    pub input: Bytes,
    /// Value to transfer
    pub value: U256,
    /// Gas limit
    pub gas: u64,
    /// Gas price (legacy)
    pub gas_price: U256,
    /// Max fee per gas
    pub gas_fee_cap: U256,
    /// Max priority fee per gas
    pub gas_tip_cap: U256,
    /// Access list
    pub access_list: AccessList,
}
