//! Tests for checkpoint lists and sync-progress estimates.

use chrono::Duration;
use proptest::prelude::*;

use masterstake_chain::{
    block::{Hash, Height},
    parameters::{genesis_hash, Network},
};

use super::*;

/// The hard-coded lists parse and validate for every network.
#[test]
fn hard_coded_lists_validate() {
    for network in Network::iter() {
        let list = CheckpointList::new(network);
        assert!(list.contains(Height(0)));
        assert_eq!(list.hash(Height(0)), Some(genesis_hash(network)));
    }
}

#[test]
fn anchored_heights_veto_conflicting_hashes() {
    let list = CheckpointList::new(Network::Mainnet);
    let genesis = genesis_hash(Network::Mainnet);

    assert!(list.is_valid_history(Height(0), &genesis));

    // Any other hash at an anchored height is rejected, no matter how
    // close it is to the anchor.
    let mut near_miss = genesis;
    near_miss.0[0] ^= 0x01;
    assert!(!list.is_valid_history(Height(0), &near_miss));
}

#[test]
fn checkpoint_list_rejects_structural_errors() {
    let genesis = genesis_hash(Network::Mainnet);
    let other = Hash([0x42; 32]);

    // empty
    assert!(CheckpointList::from_list(Vec::new()).is_err());
    // no genesis checkpoint
    assert!(CheckpointList::from_list(vec![(Height(5), other)]).is_err());
    // wrong genesis hash
    assert!(CheckpointList::from_list(vec![(Height(0), other)]).is_err());
    // duplicate heights
    assert!(
        CheckpointList::from_list(vec![(Height(0), genesis), (Height(0), other)]).is_err()
    );
    // duplicate hashes at different heights
    assert!(
        CheckpointList::from_list(vec![(Height(0), genesis), (Height(10), genesis)]).is_err()
    );
    // null hash
    assert!(CheckpointList::from_list(vec![
        (Height(0), genesis),
        (Height(10), Hash([0; 32]))
    ])
    .is_err());

    // a well-formed multi-entry list is fine
    let list = CheckpointList::from_list(vec![(Height(0), genesis), (Height(10), other)])
        .expect("valid list");
    assert_eq!(list.max_height(), Height(10));
    assert!(list.is_valid_history(Height(10), &other));
    assert!(!list.is_valid_history(Height(10), &genesis));
}

#[test]
fn list_parser_rejects_malformed_lines() {
    assert!("nonsense".parse::<CheckpointList>().is_err());
    assert!("0".parse::<CheckpointList>().is_err());
    assert!(
        "0 0000f00ba769187169bc7e9b4fd82c73ce31d355c35915a5d999ef55d3c903fb extra-field"
            .parse::<CheckpointList>()
            .is_err()
    );
}

#[test]
fn estimated_transactions_extrapolates_from_the_last_checkpoint() {
    let data = CheckpointData::new(Network::Mainnet);
    let spacing = Duration::seconds(3 * 60);

    // At or below the last checkpoint, the recorded count is returned.
    assert_eq!(data.estimated_transactions(Height(0), spacing), 104);

    // A 3-minute spacing gives 480 blocks per day, and mainnet
    // estimates 480 transactions per day: one per block.
    assert_eq!(data.estimated_transactions(Height(480), spacing), 104 + 480);
    assert_eq!(data.estimated_transactions(Height(100), spacing), 104 + 100);

    let testnet = CheckpointData::new(Network::Testnet);
    assert_eq!(testnet.transaction_count(), 0);
    assert_eq!(
        testnet.estimated_transactions(Height(960), spacing),
        960 * 250 / 480
    );
}

#[test]
fn checkpoint_metadata_matches_the_parameter_tables() {
    let data = CheckpointData::new(Network::Mainnet);
    assert_eq!(data.last_checkpoint_time().timestamp(), 1_656_967_050);
    assert_eq!(data.list().max_height(), Height(0));
}

proptest! {
    /// Heights without a checkpoint never constrain history.
    #[test]
    fn unanchored_heights_are_unconstrained(height in 1u32..=Height::MAX.0, hash: Hash) {
        let list = CheckpointList::new(Network::Mainnet);
        prop_assume!(!list.contains(Height(height)));

        prop_assert!(list.is_valid_history(Height(height), &hash));
    }

    /// At anchored heights, exactly the anchored hash is accepted.
    #[test]
    fn anchored_heights_accept_only_the_anchor(hash: Hash) {
        let list = CheckpointList::new(Network::Mainnet);
        let anchor = list.hash(Height(0)).expect("genesis checkpoint exists");

        prop_assert_eq!(list.is_valid_history(Height(0), &hash), hash == anchor);
    }
}
