//! Block structure and hashing tests.

use crate::{
    amount::Amount,
    parameters::genesis_block,
    serialization::MasterstakeSerialize,
    transaction::{self, Transaction},
    transparent::{Input, OutPoint, Output, Script},
};

fn coinstake_transaction() -> Transaction {
    Transaction {
        version: 1,
        inputs: vec![Input {
            outpoint: OutPoint {
                hash: transaction::Hash([0x11; 32]),
                index: 1,
            },
            script_sig: Script(vec![]),
            sequence: u32::MAX,
        }],
        outputs: vec![
            Output {
                value: Amount::zero(),
                script_pubkey: Script::default(),
            },
            Output {
                value: Amount::try_from_coins(2).expect("in range"),
                script_pubkey: Script(vec![0x51]),
            },
        ],
        lock_time: 0,
    }
}

#[test]
fn genesis_header_serializes_to_112_bytes() {
    let genesis = genesis_block();
    let bytes = genesis
        .header
        .masterstake_serialize_to_vec()
        .expect("serializing to a Vec never fails");

    // version 4 headers append the 32-byte accumulator checkpoint to
    // the classic 80-byte header.
    assert_eq!(bytes.len(), 112);
    assert_eq!(&bytes[0..4], &4u32.to_le_bytes());
    assert_eq!(&bytes[76..80], &68_866u32.to_le_bytes());
    assert_eq!(&bytes[80..112], &[0u8; 32][..]);
}

#[test]
fn legacy_header_version_hashes_80_bytes() {
    let mut header = genesis_block().header;
    header.version = 3;

    let bytes = header
        .masterstake_serialize_to_vec()
        .expect("serializing to a Vec never fails");
    assert_eq!(bytes.len(), 80);
}

#[test]
fn genesis_is_not_proof_of_stake() {
    let genesis = genesis_block();
    assert!(!genesis.is_proof_of_stake());
    assert!(genesis.coinstake().is_none());
}

#[test]
fn proof_of_stake_needs_a_second_transaction() {
    let mut block = genesis_block();
    block.transactions.push(coinstake_transaction());

    assert!(block.is_proof_of_stake());
    assert!(block
        .coinstake()
        .expect("proof-of-stake block has a coinstake")
        .is_coinstake());
}

#[test]
fn block_hash_depends_only_on_the_header() {
    let genesis = genesis_block();
    let mut with_extra_tx = genesis.clone();
    with_extra_tx.transactions.push(coinstake_transaction());

    // Identical headers mean identical hashes, even if the transaction
    // list differs; the merkle root binds the transactions.
    assert_eq!(genesis.hash(), with_extra_tx.hash());

    let mut new_nonce = genesis;
    new_nonce.header.nonce += 1;
    assert_ne!(new_nonce.hash(), with_extra_tx.hash());
}
