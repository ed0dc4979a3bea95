//! Errors that can occur when checking consensus rules.
//!
//! Verification failures on attacker-controlled input are not errors:
//! they are `false` verdicts. The types here cover the remaining cases,
//! where the local node itself is misconfigured or its bundled data is
//! corrupt.

use thiserror::Error;

/// An error signing a block.
///
/// Signing happens at block-assembly time on the local node, so unlike
/// verification these conditions are reported as errors, not absorbed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BlockSignatureError {
    /// The block has no transactions at all.
    #[error("cannot sign a block with no transactions")]
    NoTransactions,

    /// The block has no coinstake transaction committing to a staking key.
    #[error("cannot sign a block with no coinstake transaction")]
    NoCoinstake,
}

/// An error loading a bundled blacklist resource.
///
/// The blacklist is a security control, so a resource that cannot be
/// parsed at all is fatal at startup. Individually malformed records
/// are skipped and counted instead, and do not produce this error.
#[derive(Error, Debug)]
pub enum BlacklistError {
    /// The resource is not valid JSON.
    #[error("bundled blacklist is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The resource parsed, but is not a JSON array of records.
    #[error("bundled blacklist must be a JSON array of records")]
    NotAnArray,
}
