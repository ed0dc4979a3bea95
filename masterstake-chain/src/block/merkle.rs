//! The Bitcoin-inherited Merkle tree of transactions.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    serialization::SerializationError, sha256d_writer::Sha256dWriter, transaction::Transaction,
};

use std::io::Write;

/// The root of the transaction Merkle tree, binding the block header to
/// the transactions in the block.
///
/// With a single transaction, the root is that transaction's hash.
/// Otherwise each level hashes concatenated digest pairs with double
/// SHA256, duplicating the last digest of an odd-length level.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Root(pub [u8; 32]);

impl fmt::Display for Root {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut reversed = self.0;
        reversed.reverse();
        f.write_str(&hex::encode(reversed))
    }
}

impl fmt::Debug for Root {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("merkle::Root")
            .field(&self.to_string())
            .finish()
    }
}

impl std::str::FromStr for Root {
    type Err = SerializationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut bytes = [0; 32];
        if hex::decode_to_slice(s, &mut bytes[..]).is_err() {
            Err(SerializationError::Parse("hex decoding error"))
        } else {
            bytes.reverse();
            Ok(Root(bytes))
        }
    }
}

impl Root {
    /// Compute the Merkle root of `transactions`.
    ///
    /// # Panics
    ///
    /// If `transactions` is empty; valid blocks always contain at least
    /// a coinbase transaction.
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        assert!(
            !transactions.is_empty(),
            "blocks must have at least one transaction"
        );

        let mut level: Vec<[u8; 32]> = transactions.iter().map(|tx| tx.hash().0).collect();

        while level.len() > 1 {
            if level.len() % 2 != 0 {
                let last = *level.last().expect("level is non-empty");
                level.push(last);
            }

            level = level
                .chunks(2)
                .map(|pair| {
                    let mut writer = Sha256dWriter::default();
                    writer
                        .write_all(&pair[0])
                        .and_then(|()| writer.write_all(&pair[1]))
                        .expect("Sha256dWriter is infallible");
                    writer.finish()
                })
                .collect();
        }

        Root(level[0])
    }
}
