//! Chain data structures and consensus parameters for MasterStake.
//!
//! This crate defines the value types shared by every MasterStake
//! component: blocks and their hashes, transactions and outpoints,
//! bitcoin-style binary serialization, zerocoin serial numbers and
//! accumulator parameters, and the per-network consensus parameter
//! records selected once at startup.

#![deny(missing_docs)]

mod sha256d_writer;

pub mod amount;
pub mod block;
pub mod parameters;
pub mod serialization;
pub mod transaction;
pub mod transparent;
pub mod work;
pub mod zerocoin;
