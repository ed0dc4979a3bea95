//! Consensus checks for MasterStake.
//!
//! This crate produces the trust-anchoring verdicts the block
//! validation pipeline consumes:
//!
//! - [`checkpoint`] vetoes any chain history that conflicts with the
//!   hard-coded checkpoint anchors;
//! - [`block_signature`] decides whether a block was signed by the key
//!   controlling its staked coins;
//! - [`invalid`] tracks the serial numbers and outpoints that must
//!   never be spent again.
//!
//! All three return plain boolean verdicts on the hot validation path:
//! malformed or adversarial input produces `false`, never a fault,
//! because a panicking verifier on attacker-controlled data is itself a
//! denial-of-service vector.

#![deny(missing_docs)]

pub mod block_signature;
pub mod checkpoint;
pub mod error;
pub mod invalid;

pub use block_signature::{check_block_signature, sign_block};
pub use checkpoint::{CheckpointData, CheckpointList};
pub use invalid::SpendLedger;

/// A boxed [`std::error::Error`].
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
