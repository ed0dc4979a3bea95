//! Transactions, as much of them as the consensus core needs.
//!
//! The full script interpreter, UTXO bookkeeping, and mempool policy
//! live in external components; this module models the transaction
//! structure itself, its identifying hash, and the coinbase/coinstake
//! classification the stake-signature checks depend on.

use std::{fmt, io};

use byteorder::{LittleEndian, WriteBytesExt};
use serde::{Deserialize, Serialize};

#[cfg(any(test, feature = "proptest-impl"))]
use proptest_derive::Arbitrary;

use crate::{
    serialization::{MasterstakeSerialize, SerializationError, WriteMasterstakeExt},
    sha256d_writer::Sha256dWriter,
    transparent::{Input, Output},
};

/// A double-SHA256 hash of a transaction's canonical serialization.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[cfg_attr(any(test, feature = "proptest-impl"), derive(Arbitrary))]
pub struct Hash(pub [u8; 32]);

impl fmt::Display for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        f.write_str(&hex::encode(reversed))
    }
}

impl fmt::Debug for Hash {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("transaction::Hash")
            .field(&self.to_string())
            .finish()
    }
}

impl std::str::FromStr for Hash {
    type Err = SerializationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0; 32];
        if hex::decode_to_slice(s, &mut bytes[..]).is_err() {
            Err(SerializationError::Parse("hex decoding error"))
        } else {
            bytes.reverse();
            Ok(Hash(bytes))
        }
    }
}

impl From<&Transaction> for Hash {
    fn from(transaction: &Transaction) -> Self {
        let mut hash_writer = Sha256dWriter::default();
        transaction
            .masterstake_serialize(&mut hash_writer)
            .expect("Sha256dWriter is infallible");
        Self(hash_writer.finish())
    }
}

/// A MasterStake transaction.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Transaction {
    /// The transaction format version.
    pub version: u32,

    /// The transparent inputs.
    pub inputs: Vec<Input>,

    /// The transparent outputs.
    pub outputs: Vec<Output>,

    /// The earliest time or block height this transaction may be added
    /// to the chain.
    pub lock_time: u32,
}

impl Transaction {
    /// Compute the identifying hash of this transaction.
    pub fn hash(&self) -> Hash {
        Hash::from(self)
    }

    /// Returns true if this is a coinbase transaction: a single input
    /// spending the null outpoint.
    pub fn is_coinbase(&self) -> bool {
        self.inputs.len() == 1 && self.inputs[0].outpoint.is_null()
    }

    /// Returns true if this is a coinstake transaction.
    ///
    /// A coinstake spends a real previous output (proving ownership of
    /// the staked coins) and marks itself by leaving its first output
    /// empty; the stake payout starts at the second output.
    pub fn is_coinstake(&self) -> bool {
        !self.inputs.is_empty()
            && !self.inputs[0].outpoint.is_null()
            && self.outputs.len() >= 2
            && self.outputs[0].is_empty()
    }
}

impl MasterstakeSerialize for Transaction {
    fn masterstake_serialize<W: io::Write>(&self, mut writer: W) -> Result<(), io::Error> {
        writer.write_u32::<LittleEndian>(self.version)?;

        writer.write_compactsize(self.inputs.len() as u64)?;
        for input in &self.inputs {
            input.masterstake_serialize(&mut writer)?;
        }

        writer.write_compactsize(self.outputs.len() as u64)?;
        for output in &self.outputs {
            output.masterstake_serialize(&mut writer)?;
        }

        writer.write_u32::<LittleEndian>(self.lock_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        amount::Amount,
        transparent::{OutPoint, Script},
    };

    fn spending_input() -> Input {
        Input {
            outpoint: OutPoint {
                hash: Hash([0xab; 32]),
                index: 0,
            },
            script_sig: Script(vec![0x51]),
            sequence: u32::MAX,
        }
    }

    fn empty_output() -> Output {
        Output {
            value: Amount::zero(),
            script_pubkey: Script::default(),
        }
    }

    fn payout_output() -> Output {
        Output {
            value: Amount::try_from_coins(1).expect("in range"),
            script_pubkey: Script(vec![0x51]),
        }
    }

    #[test]
    fn coinstake_requires_empty_first_output() {
        let coinstake = Transaction {
            version: 1,
            inputs: vec![spending_input()],
            outputs: vec![empty_output(), payout_output()],
            lock_time: 0,
        };
        assert!(coinstake.is_coinstake());
        assert!(!coinstake.is_coinbase());

        let not_coinstake = Transaction {
            outputs: vec![payout_output(), payout_output()],
            ..coinstake.clone()
        };
        assert!(!not_coinstake.is_coinstake());

        // A coinstake needs a payout output after the empty marker.
        let too_few_outputs = Transaction {
            outputs: vec![empty_output()],
            ..coinstake
        };
        assert!(!too_few_outputs.is_coinstake());
    }

    #[test]
    fn coinbase_spends_the_null_outpoint() {
        let coinbase = Transaction {
            version: 1,
            inputs: vec![Input {
                outpoint: OutPoint::null(),
                script_sig: Script(vec![0x04]),
                sequence: u32::MAX,
            }],
            outputs: vec![payout_output()],
            lock_time: 0,
        };
        assert!(coinbase.is_coinbase());
        assert!(!coinbase.is_coinstake());
    }
}
