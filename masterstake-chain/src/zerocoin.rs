//! Zerocoin value types: serial numbers, spend kinds, and accumulator
//! parameters.
//!
//! The accumulator proofs themselves (modular exponentiation,
//! Fiat-Shamir) are an external primitive library; this module defines
//! the data those proofs are verified against.

mod accumulator;
mod serial_number;

pub use accumulator::{AccumulatorParameters, ModulusEncoding, ModulusParseError};
pub use serial_number::SerialNumber;

use serde::{Deserialize, Serialize};

/// The reason a zerocoin serial number was revealed.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SpendType {
    /// A typical spend transaction; the coin is unusable afterwards.
    Spend,
    /// A spend that occurs as a stake.
    Stake,
    /// Proving ownership of coins that will back a masternode.
    MasternodeCollateral,
    /// Signing a message that does not belong above.
    SignMessage,
}
