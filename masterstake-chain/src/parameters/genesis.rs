//! The genesis block, built from compiled-in literals.
//!
//! Every network profile shares the same genesis block, and verifies it
//! against [`genesis_hash`] and [`genesis_merkle_root`] during
//! construction. A mismatch means the binary is running against a
//! corrupted or tampered parameter table and must not start.

use chrono::DateTime;

use crate::{
    amount::Amount,
    block::{merkle, Block, Hash, Header},
    transaction::Transaction,
    transparent::{Input, OutPoint, Output, Script},
    work::CompactDifficulty,
};

use super::Network;

/// The previous block hash for the genesis block.
///
/// All known networks use the Bitcoin `null` value for the parent of the
/// genesis block. (In Bitcoin, `null` is `[0; 32]`.)
pub const GENESIS_PREVIOUS_BLOCK_HASH: Hash = Hash([0; 32]);

/// The newspaper-style timestamp embedded in the genesis coinbase,
/// proving the block was not created before July 2022.
const GENESIS_COINBASE_TIMESTAMP: &str = "New MasterStake Genesis Block mined by Team in 07/2022";

/// The uncompressed public key the genesis output pays to.
const GENESIS_OUTPUT_PUBKEY: &str = "04330b7eec077a1d56b2bcaac8f1a6cf340ed806955d7eb56f2bba26454bd6d30857378b272f37d976fe803bba8e3472c6129b98b026871e0d3755cfeb472c2da0";

/// The Unix timestamp of the genesis block.
pub(super) const GENESIS_TIME: i64 = 1_656_967_050;

/// The compact difficulty of the genesis block.
pub(super) const GENESIS_BITS: u32 = 0x1e0f_fff0;

/// The nonce that makes the genesis header hash meet its target.
pub(super) const GENESIS_NONCE: u32 = 68_866;

/// Returns the hash of the genesis block in `network`.
///
/// Every profile, including the test networks, anchors to the same
/// genesis block.
pub fn genesis_hash(network: Network) -> Hash {
    match network {
        Network::Mainnet | Network::Testnet | Network::Regtest | Network::UnitTest => {
            "0000f00ba769187169bc7e9b4fd82c73ce31d355c35915a5d999ef55d3c903fb"
        }
    }
    .parse()
    .expect("hard-coded hash parses")
}

/// Returns the expected merkle root of the genesis transactions.
pub(super) fn genesis_merkle_root() -> merkle::Root {
    "318407c1baff76f6dcaa61de5525f99d8920b6b3dca2b290c68b2f1cb6726cc1"
        .parse()
        .expect("hard-coded merkle root parses")
}

/// Build the genesis block from its compiled-in literals.
///
/// The result is structurally complete but not yet trusted: profile
/// constructors re-hash it and compare against [`genesis_hash`].
pub fn genesis_block() -> Block {
    // The classic genesis scriptSig: the original difficulty target and
    // a pushed height, followed by the timestamp text.
    let mut script_sig = vec![0x04];
    script_sig.extend_from_slice(&486_604_799u32.to_le_bytes());
    script_sig.extend_from_slice(&[0x01, 0x04]);
    script_sig.push(GENESIS_COINBASE_TIMESTAMP.len() as u8);
    script_sig.extend_from_slice(GENESIS_COINBASE_TIMESTAMP.as_bytes());

    let pubkey = hex::decode(GENESIS_OUTPUT_PUBKEY).expect("hard-coded pubkey is valid hex");
    let mut script_pubkey = vec![0x41];
    script_pubkey.extend_from_slice(&pubkey);
    script_pubkey.push(0xac);

    let coinbase = Transaction {
        version: 1,
        inputs: vec![Input {
            outpoint: OutPoint::null(),
            script_sig: Script(script_sig),
            sequence: u32::MAX,
        }],
        outputs: vec![Output {
            value: Amount::zero(),
            script_pubkey: Script(script_pubkey),
        }],
        lock_time: 0,
    };

    let transactions = vec![coinbase];
    let merkle_root = merkle::Root::from_transactions(&transactions);

    Block {
        header: Header {
            version: 4,
            previous_block_hash: GENESIS_PREVIOUS_BLOCK_HASH,
            merkle_root,
            time: DateTime::from_timestamp(GENESIS_TIME, 0)
                .expect("hard-coded genesis time is in range"),
            difficulty_threshold: CompactDifficulty(GENESIS_BITS),
            nonce: GENESIS_NONCE,
            accumulator_checkpoint: [0; 32],
        },
        transactions,
        signature: Vec::new(),
    }
}
