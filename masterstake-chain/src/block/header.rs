use std::io;

use byteorder::{LittleEndian, WriteBytesExt};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    serialization::{MasterstakeSerialize, WriteMasterstakeExt},
    work::CompactDifficulty,
};

use super::{merkle, Hash};

/// The lowest header version that appends the accumulator checkpoint to
/// the hash preimage.
///
/// Once zerocoin is active, every block header must use at least this
/// version, and its identifying hash covers the accumulator checkpoint
/// field.
pub const ZEROCOIN_HEADER_VERSION: u32 = 4;

/// A block header, containing metadata about a block.
///
/// How are blocks chained together? They are chained together via the
/// backwards reference (previous header hash) present in the block
/// header. Each block points backwards to its parent, all the way
/// back to the genesis block (the first block in the blockchain).
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Header {
    /// The block's version field.
    ///
    /// Headers produced after zerocoin activation must use version
    /// [`ZEROCOIN_HEADER_VERSION`] or greater, which extends the hash
    /// preimage with `accumulator_checkpoint`.
    pub version: u32,

    /// The hash of the previous block, used to create a chain of blocks back to
    /// the genesis block.
    ///
    /// This ensures no previous block can be changed without also changing this
    /// block's header.
    pub previous_block_hash: Hash,

    /// The root of the transaction Merkle tree, binding the block header
    /// to the transactions in the block.
    ///
    /// Note that because of a flaw in Bitcoin's design, the `merkle_root` does
    /// not always precisely bind the contents of the block (CVE-2012-2459). It
    /// is sometimes possible for an attacker to create multiple distinct sets of
    /// transactions with the same Merkle root, although only one set will be
    /// valid.
    pub merkle_root: merkle::Root,

    /// The block timestamp is a Unix epoch time (UTC) when the producer
    /// assembled the header, serialized as a `u32` on the wire.
    pub time: DateTime<Utc>,

    /// An encoded version of the target threshold this block's header
    /// hash must be less than or equal to, in the same nBits format
    /// used by Bitcoin.
    pub difficulty_threshold: CompactDifficulty,

    /// An arbitrary field that historical proof-of-work miners changed
    /// to produce a hash below the target threshold. Fixed for
    /// proof-of-stake blocks.
    pub nonce: u32,

    /// The zerocoin accumulator checkpoint committed by this header.
    ///
    /// Zero for blocks without an accumulator update. Only covered by
    /// the block hash for `version >= ZEROCOIN_HEADER_VERSION`.
    pub accumulator_checkpoint: [u8; 32],
}

impl Header {
    /// Compute the identifying hash of this header.
    pub fn hash(&self) -> Hash {
        Hash::from(self)
    }
}

impl MasterstakeSerialize for Header {
    fn masterstake_serialize<W: io::Write>(&self, mut writer: W) -> Result<(), io::Error> {
        writer.write_u32::<LittleEndian>(self.version)?;
        self.previous_block_hash.masterstake_serialize(&mut writer)?;
        writer.write_32_bytes(&self.merkle_root.0)?;
        writer.write_u32::<LittleEndian>(self.time.timestamp() as u32)?;
        writer.write_u32::<LittleEndian>(self.difficulty_threshold.0)?;
        writer.write_u32::<LittleEndian>(self.nonce)?;

        // Headers below the zerocoin version hash only the first 80 bytes.
        if self.version >= ZEROCOIN_HEADER_VERSION {
            writer.write_32_bytes(&self.accumulator_checkpoint)?;
        }

        Ok(())
    }
}
