//! Consensus parameters for each MasterStake network.
//!
//! One [`NetworkParameters`] record exists per network profile, built
//! from compiled-in literals and verified against the expected genesis
//! hash before use. The [`ParameterRegistry`] owns the selected record
//! for the life of the process and hands out shared references.

mod error;
mod genesis;
mod network;
mod registry;


pub use error::{ParameterError, RegistryError};
pub use genesis::{genesis_block, genesis_hash, GENESIS_PREVIOUS_BLOCK_HASH};
pub use network::{
    magics, Base58Prefixes, InvalidNetworkError, Magic, Network, NetworkParameters,
    ZEROCOIN_MODULUS,
};
pub use registry::ParameterRegistry;
