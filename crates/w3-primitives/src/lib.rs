//! # w3-primitives
//!
//! Fixed-size byte types shared by the w3 crates.
//!
//! `Address` and `H256` serialize as `0x`-prefixed lowercase hex strings, the
//! same shape Ethereum JSON-RPC nodes use on the wire.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod hash;

pub use address::{Address, AddressError};
pub use hash::{HashError, H256};

// Re-export primitive-types for U256
pub use primitive_types::U256;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u256_from_hex_str() {
        let v = U256::from_str_radix("c0fe", 16).unwrap();
        assert_eq!(v, U256::from(49406u64));
    }
}
