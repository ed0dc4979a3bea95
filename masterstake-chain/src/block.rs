//! Blocks and block-related structures (heights, headers, etc.)

mod hash;
mod header;
mod height;

pub mod merkle;

#[cfg(test)]
mod tests;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use hash::Hash;
pub use header::{Header, ZEROCOIN_HEADER_VERSION};
pub use height::Height;

use crate::transaction::Transaction;

/// A MasterStake block, containing a header, a list of transactions,
/// and the producer's stake signature.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Block {
    /// The block header, containing block metadata.
    pub header: Header,

    /// The block transactions.
    pub transactions: Vec<Transaction>,

    /// The DER-encoded ECDSA signature over this block's hash, made by
    /// the key committed in the coinstake output script.
    ///
    /// Empty for proof-of-work blocks, which have nothing to sign with.
    pub signature: Vec<u8>,
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Block")
            .field("hash", &self.hash())
            .field("transactions", &self.transactions.len())
            .finish()
    }
}

impl Block {
    /// Compute the hash of this block.
    pub fn hash(&self) -> Hash {
        self.header.hash()
    }

    /// Returns true if this is a proof-of-stake block.
    ///
    /// Proof-of-stake blocks carry their coinstake as the second
    /// transaction, right after the (empty-payout) coinbase.
    pub fn is_proof_of_stake(&self) -> bool {
        self.transactions.len() > 1 && self.transactions[1].is_coinstake()
    }

    /// Returns the coinstake transaction, if this is a proof-of-stake
    /// block.
    pub fn coinstake(&self) -> Option<&Transaction> {
        if self.is_proof_of_stake() {
            self.transactions.get(1)
        } else {
            None
        }
    }
}
