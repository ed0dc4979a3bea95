//! Errors for network parameter construction and selection.

use thiserror::Error;

use crate::{block, zerocoin::ModulusParseError};

use super::Network;

/// A fatal error constructing a network parameter record.
///
/// These indicate a corrupted or tampered parameter table; a node must
/// not start against parameters that fail their genesis assertions.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    /// The compiled-in genesis block does not hash to the expected value.
    #[error("genesis block hashes to {computed} but the parameter table expects {expected}")]
    GenesisHashMismatch {
        /// The hash of the constructed genesis block.
        computed: block::Hash,
        /// The compiled-in expected hash.
        expected: block::Hash,
    },

    /// The genesis transactions do not produce the expected merkle root.
    #[error("genesis merkle root is {computed} but the parameter table expects {expected}")]
    GenesisMerkleRootMismatch {
        /// The merkle root computed from the genesis transactions.
        computed: block::merkle::Root,
        /// The compiled-in expected root.
        expected: block::merkle::Root,
    },
}

/// An error selecting or adjusting the active network.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A different network was already selected on this registry.
    #[error("cannot select {requested}: registry already selected {active}")]
    AlreadySelected {
        /// The network the registry is locked to.
        active: Network,
        /// The conflicting selection.
        requested: Network,
    },

    /// The selected profile failed its startup checks.
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    /// The active profile's accumulator modulus literal failed to parse.
    #[error(transparent)]
    Modulus(#[from] ModulusParseError),

    /// A test-only setter was called outside the unit-test profile.
    #[error("parameter overrides are only available on the unit-test network, not {0}")]
    NotUnitTest(Network),
}
