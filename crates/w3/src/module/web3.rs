//! Web3 namespace methods (web3_*)

use crate::factory::Factory;

/// web3_clientVersion - Node client version string
pub fn client_version() -> Factory<String> {
    Factory::new("web3_clientVersion", vec![])
}
