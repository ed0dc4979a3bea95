//! Stake signatures over block hashes.
//!
//! A proof-of-stake block is only valid if it was signed by the private
//! key matching the public key committed in its coinstake output. That
//! binds block production rights to the key controlling the staked
//! coins rather than to any network identity: a compromised node
//! cannot produce valid blocks without the actual staking key. This is
//! the Sybil-resistance mechanism replacing proof-of-work hashpower.
//!
//! Verification is strictly fail-closed. Every malformed input — a
//! missing coinstake, an unrecognizable output script, a bad signature
//! encoding — is an ordinary `false` verdict, never a panic, because a
//! crashing verifier on attacker-controlled blocks is a
//! denial-of-service vector.

use secp256k1::{ecdsa::Signature, Message, SecretKey, SECP256K1};
use tracing::trace;

use masterstake_chain::block::Block;

use crate::error::BlockSignatureError;

/// Sign `block` with `key`, storing the DER signature in the block.
///
/// Fails if the block is malformed: signing requires a coinstake
/// transaction, since a block without one commits to no staking key
/// and can never verify.
pub fn sign_block(block: &mut Block, key: &SecretKey) -> Result<(), BlockSignatureError> {
    if block.transactions.is_empty() {
        return Err(BlockSignatureError::NoTransactions);
    }
    if block.coinstake().is_none() {
        return Err(BlockSignatureError::NoCoinstake);
    }

    let signature = SECP256K1.sign_ecdsa(&block_message(block), key);
    block.signature = signature.serialize_der().to_vec();

    Ok(())
}

/// Check `block`'s stake signature against the public key committed in
/// its coinstake output.
///
/// Returns `false` for a block with no coinstake transaction carrying
/// a non-empty signature, a coinstake output whose script is not a
/// recognizable public key, a malformed signature encoding, or a
/// signature made by a different key or over a different hash.
pub fn check_block_signature(block: &Block) -> bool {
    let coinstake = match block.coinstake() {
        Some(coinstake) => coinstake,
        // Proof-of-work blocks have nothing to sign with; they are
        // valid exactly when unsigned.
        None => return block.signature.is_empty(),
    };

    // The stake payout output, right after the empty coinstake marker,
    // commits to the staking key.
    let pubkey = match coinstake
        .outputs
        .get(1)
        .and_then(|output| output.script_pubkey.as_pubkey())
    {
        Some(pubkey) => pubkey,
        None => {
            trace!(block = %block.hash(), "coinstake output does not commit to a public key");
            return false;
        }
    };

    let signature = match Signature::from_der(&block.signature) {
        Ok(signature) => signature,
        Err(_) => {
            trace!(block = %block.hash(), "block signature is not valid DER");
            return false;
        }
    };

    SECP256K1
        .verify_ecdsa(&block_message(block), &signature, &pubkey)
        .is_ok()
}

fn block_message(block: &Block) -> Message {
    Message::from_slice(&block.hash().0).expect("block hashes are exactly 32 bytes")
}

#[cfg(test)]
mod tests {
    use secp256k1::PublicKey;

    use masterstake_chain::{
        amount::Amount,
        parameters::genesis_block,
        transaction::{self, Transaction},
        transparent::{Input, OutPoint, Output, Script},
    };

    use super::*;

    fn staking_key() -> SecretKey {
        SecretKey::from_slice(&[0x42; 32]).expect("constant key is in range")
    }

    fn p2pk_script(pubkey: &PublicKey) -> Script {
        let serialized = pubkey.serialize();
        let mut script = vec![serialized.len() as u8];
        script.extend_from_slice(&serialized);
        script.push(0xac);
        Script(script)
    }

    fn coinstake_paying_to(script_pubkey: Script) -> Transaction {
        Transaction {
            version: 1,
            inputs: vec![Input {
                outpoint: OutPoint {
                    hash: transaction::Hash([0x77; 32]),
                    index: 0,
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
                    value: Amount::try_from_coins(100).expect("in range"),
                    script_pubkey,
                },
            ],
            lock_time: 0,
        }
    }

    fn stake_block(key: &SecretKey) -> Block {
        let pubkey = key.public_key(SECP256K1);
        let mut block = genesis_block();
        block.transactions.push(coinstake_paying_to(p2pk_script(&pubkey)));
        block
    }

    #[test]
    fn sign_then_verify_round_trips() {
        let key = staking_key();
        let mut block = stake_block(&key);

        sign_block(&mut block, &key).expect("proof-of-stake block signs");
        assert!(check_block_signature(&block));
    }

    #[test]
    fn tampered_signatures_fail_without_faulting() {
        let key = staking_key();
        let mut block = stake_block(&key);
        sign_block(&mut block, &key).expect("proof-of-stake block signs");

        for byte in 0..block.signature.len() {
            let mut tampered = block.clone();
            tampered.signature[byte] ^= 0x01;
            assert!(!check_block_signature(&tampered));
        }

        // Truncated and empty signatures are also just invalid.
        let mut truncated = block.clone();
        truncated.signature.pop();
        assert!(!check_block_signature(&truncated));

        block.signature.clear();
        assert!(!check_block_signature(&block));
    }

    #[test]
    fn signatures_from_the_wrong_key_fail() {
        let key = staking_key();
        let other_key = SecretKey::from_slice(&[0x43; 32]).expect("constant key is in range");

        // The coinstake commits to `key`, but `other_key` signs.
        let mut block = stake_block(&key);
        sign_block(&mut block, &other_key).expect("signing itself succeeds");
        assert!(!check_block_signature(&block));
    }

    #[test]
    fn unrecognizable_coinstake_scripts_fail() {
        let key = staking_key();

        for script in [
            // not a script at all
            Script(vec![]),
            // P2PKH, which commits to a key hash, not a key
            Script(vec![0x76, 0xa9, 0x14]),
            // P2PK shape around bytes that are not a curve point
            {
                let mut script = vec![0x21];
                script.extend_from_slice(&[0u8; 33]);
                script.push(0xac);
                Script(script)
            },
        ] {
            let mut block = genesis_block();
            block.transactions.push(coinstake_paying_to(script));
            sign_block(&mut block, &key).expect("signing does not inspect the output script");
            assert!(!check_block_signature(&block));
        }
    }

    #[test]
    fn proof_of_work_blocks_verify_only_when_unsigned() {
        let genesis = genesis_block();
        assert!(check_block_signature(&genesis));

        // A stray signature on a proof-of-work block is invalid.
        let mut stray = genesis;
        stray.signature = vec![0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x01];
        assert!(!check_block_signature(&stray));
    }

    #[test]
    fn signing_rejects_malformed_blocks() {
        let key = staking_key();

        let mut no_transactions = genesis_block();
        no_transactions.transactions.clear();
        assert_eq!(
            sign_block(&mut no_transactions, &key),
            Err(BlockSignatureError::NoTransactions)
        );

        let mut no_coinstake = genesis_block();
        assert_eq!(
            sign_block(&mut no_coinstake, &key),
            Err(BlockSignatureError::NoCoinstake)
        );
        assert!(no_coinstake.signature.is_empty());
    }
}
