//! The network profiles and their consensus parameter records.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

use crate::{
    amount::{Amount, CENT},
    block::{merkle, Block, Height},
    work::ExpandedDifficulty,
};

use super::{
    error::ParameterError,
    genesis::{genesis_block, genesis_hash, genesis_merkle_root},
};

/// An enum describing the possible network choices.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Network {
    /// The production network.
    #[default]
    Mainnet,

    /// The public test network.
    Testnet,

    /// The private regression-test network.
    Regtest,

    /// The unit-test network, the only profile whose parameters may be
    /// adjusted after selection.
    UnitTest,
}

/// A magic number identifying the network in the message start marker.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Magic(pub [u8; 4]);

impl fmt::Debug for Magic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Magic").field(&hex::encode(self.0)).finish()
    }
}

/// Magic numbers used to identify the different MasterStake networks.
pub mod magics {
    use super::*;

    /// The production mainnet.
    pub const MAINNET: Magic = Magic([0xc2, 0x6a, 0x53, 0x6a]);
    /// The testnet.
    pub const TESTNET: Magic = Magic([0xa1, 0xdc, 0x1f, 0x48]);
    /// The regression test network.
    pub const REGTEST: Magic = Magic([0x12, 0x5c, 0xaa, 0xd4]);
}

impl From<Network> for &'static str {
    fn from(network: Network) -> &'static str {
        match network {
            Network::Mainnet => "Mainnet",
            Network::Testnet => "Testnet",
            Network::Regtest => "Regtest",
            Network::UnitTest => "UnitTest",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str((*self).into())
    }
}

impl Network {
    /// Returns an iterator over [`Network`] variants.
    pub fn iter() -> impl Iterator<Item = Self> {
        [
            Self::Mainnet,
            Self::Testnet,
            Self::Regtest,
            Self::UnitTest,
        ]
        .into_iter()
    }

    /// Get the default P2P port associated to this network.
    pub fn default_port(&self) -> u16 {
        match self {
            Network::Mainnet => 49_266,
            Network::Testnet => 27_293,
            Network::Regtest => 37_293,
            Network::UnitTest => 49_293,
        }
    }

    /// Return the network name as used in configuration and RPC,
    /// following the BIP70 convention.
    pub fn bip70_network_name(&self) -> String {
        match self {
            Network::Mainnet => "main",
            Network::Testnet => "test",
            Network::Regtest => "regtest",
            Network::UnitTest => "unittest",
        }
        .to_string()
    }

    /// Returns `true` if this network is a testing network.
    pub fn is_a_test_network(&self) -> bool {
        *self != Network::Mainnet
    }
}

impl std::str::FromStr for Network {
    type Err = InvalidNetworkError;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string.to_lowercase().as_str() {
            "mainnet" | "main" => Ok(Network::Mainnet),
            "testnet" | "test" => Ok(Network::Testnet),
            "regtest" => Ok(Network::Regtest),
            "unittest" => Ok(Network::UnitTest),
            _ => Err(InvalidNetworkError(string.to_owned())),
        }
    }
}

/// An unrecognized network name.
#[derive(Clone, Debug, Error)]
#[error("Invalid network: {0}")]
pub struct InvalidNetworkError(String);

/// The base58 version bytes used by the address and key encodings.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Base58Prefixes {
    /// Pay-to-pubkey-hash addresses.
    pub pubkey_address: u8,
    /// Pay-to-script-hash addresses.
    pub script_address: u8,
    /// WIF private keys.
    pub secret_key: u8,
    /// BIP32 extended public keys.
    pub ext_public_key: [u8; 4],
    /// BIP32 extended private keys.
    pub ext_secret_key: [u8; 4],
    /// BIP44 coin type.
    pub ext_coin_type: [u8; 4],
}

/// The zerocoin accumulator modulus literal, shared by every profile.
///
/// This is the RSA-2048 factoring challenge number. Historical chain
/// data was produced under both the hexadecimal and the decimal
/// interpretation of this literal; see
/// [`ModulusEncoding`](crate::zerocoin::ModulusEncoding).
pub const ZEROCOIN_MODULUS: &str = "25195908475657893494027183240048398571429282126204032027777137836043662020707595556264018525880784\
4069182906412495150821892985591491761845028084891200728449926873928072877767359714183472702618963750149718246911\
6507761337985909570009733045974880842840179742910064245869181719511874612151517265463228221686998754918242243363\
7259085141865462043576798423387184774447920739934236584823824281198163815010674810451660377306056201619676256133\
8441436038339044149526344321901146575444541784240209246165157233507787077498171257724679629263863563732899121548\
31438167899885040445364023527381951378636564391212010397122822120720357";

/// One immutable consensus parameter record for a network profile.
///
/// Fields never change after construction; the only sanctioned escape
/// hatch is the unit-test profile's setters on
/// [`ParameterRegistry`](super::ParameterRegistry).
#[derive(Clone, Debug)]
pub struct NetworkParameters {
    /// The network this record describes.
    pub network: Network,

    /// The message start marker, designed to be unlikely to occur in
    /// normal data.
    pub message_start: Magic,

    /// The default P2P listening port.
    pub default_port: u16,

    /// The historical proof-of-work difficulty ceiling.
    pub pow_limit: ExpandedDifficulty,

    /// The deepest chain reorganization this node will follow.
    pub max_reorg_depth: u32,

    /// The target time between blocks.
    pub target_spacing: Duration,

    /// The depth at which block rewards become spendable.
    pub maturity: u32,

    /// The maximum money supply.
    pub max_money: Amount,

    /// The height interval at which the block subsidy halves.
    pub subsidy_halving_height: Height,

    /// The collateral a masternode must lock.
    pub masternode_collateral: Amount,

    /// The address receiving the developer fee.
    pub dev_fee_address: String,

    /// The last height produced by proof of work; stake eligibility
    /// begins immediately after.
    pub last_pow_height: Height,

    /// The height of the stake-modifier algorithm update.
    pub modifier_update_height: Height,

    /// The height at which zerocoin operations activate.
    pub zerocoin_start_height: Height,

    /// The time at which zerocoin operations activate.
    pub zerocoin_start_time: DateTime<Utc>,

    /// The height at which version 2 zerocoin spends activate.
    pub zerocoin_v2_start_height: Height,

    /// The minimum block header version once zerocoin is active.
    pub zerocoin_header_version: u32,

    /// The number of mints accumulated per accumulator update.
    pub required_accumulation: u32,

    /// The security level accumulator proofs are generated at.
    pub default_security_level: u32,

    /// The confirmations a zerocoin mint needs before it can stake.
    pub zerocoin_stake_depth: u32,

    /// The maximum zerocoin spends allowed in one transaction.
    pub max_zerocoin_spends_per_tx: u32,

    /// The minimum fee for a zerocoin mint.
    pub min_zerocoin_mint_fee: Amount,

    /// The confirmations a mint needs before accumulation.
    pub mint_required_confirmations: u32,

    /// The accumulator modulus literal for this network.
    pub zerocoin_modulus: &'static str,

    /// The base58 version bytes for addresses and keys.
    pub base58_prefixes: Base58Prefixes,

    /// The DNS seeds used to bootstrap peer discovery.
    pub seeds: Vec<String>,

    /// The compiled-in genesis block, verified during construction.
    pub genesis: Block,

    /// Whether this network relays only standard transactions.
    pub require_standard: bool,

    /// Whether expensive consistency checks run by default.
    pub default_consistency_checks: bool,

    /// Whether blocks may fall back to the minimum difficulty.
    pub allow_min_difficulty_blocks: bool,

    /// Whether the historical proof-of-work check is skipped.
    pub skip_pow_check: bool,

    /// Whether blocks are only produced on demand (test networks).
    pub mine_blocks_on_demand: bool,

    /// Whether block production requires connected peers.
    pub mining_requires_peers: bool,
}

impl NetworkParameters {
    /// Build the parameter record for `network`, verifying its genesis
    /// block.
    ///
    /// A [`ParameterError`] here is fatal: the process must not run
    /// against a parameter table that fails its genesis assertions.
    pub fn new(network: Network) -> Result<NetworkParameters, ParameterError> {
        match network {
            Network::Mainnet => Self::mainnet(),
            Network::Testnet => Self::testnet(),
            Network::Regtest => Self::regtest(),
            Network::UnitTest => Self::unit_test(),
        }
    }

    fn mainnet() -> Result<NetworkParameters, ParameterError> {
        let params = NetworkParameters {
            network: Network::Mainnet,
            message_start: magics::MAINNET,
            default_port: Network::Mainnet.default_port(),
            pow_limit: ExpandedDifficulty::max_value_shifted_right(20),
            max_reorg_depth: 100,
            target_spacing: Duration::seconds(3 * 60),
            maturity: 24,
            max_money: Amount::try_from_coins(10_000_000).expect("hard-coded amount is in range"),
            subsidy_halving_height: Height(1000),
            masternode_collateral: Amount::try_from_coins(15_000)
                .expect("hard-coded amount is in range"),
            dev_fee_address: "MHrThmoWKXH9qqhVTRmnBXtPks7u2xGABe".to_string(),
            last_pow_height: Height(200),
            modifier_update_height: Height(0),
            zerocoin_start_height: Height(0),
            zerocoin_start_time: DateTime::from_timestamp(1_547_096_400, 0)
                .expect("hard-coded time is in range"),
            zerocoin_v2_start_height: Height(20),
            zerocoin_header_version: 4,
            required_accumulation: 1,
            default_security_level: 100,
            zerocoin_stake_depth: 200,
            max_zerocoin_spends_per_tx: 7,
            min_zerocoin_mint_fee: Amount::try_from_base_units(CENT)
                .expect("hard-coded amount is in range"),
            mint_required_confirmations: 20,
            zerocoin_modulus: ZEROCOIN_MODULUS,
            base58_prefixes: Base58Prefixes {
                // Addresses start with 'M'.
                pubkey_address: 50,
                // Script addresses start with 'S'.
                script_address: 63,
                // Private keys start with 'm'.
                secret_key: 110,
                ext_public_key: [0x04, 0xb2, 0x47, 0x46],
                ext_secret_key: [0x04, 0xb2, 0x43, 0x08],
                ext_coin_type: [0x80, 0x00, 0x02, 0x62],
            },
            seeds: (1..=6)
                .map(|n| format!("seed{n}.masterstake.net"))
                .chain(
                    [
                        "186.202.57.186",
                        "191.252.109.144",
                        "191.252.204.129",
                        "191.252.120.128",
                    ]
                    .into_iter()
                    .map(str::to_string),
                )
                .collect(),
            genesis: genesis_block(),
            require_standard: true,
            default_consistency_checks: false,
            allow_min_difficulty_blocks: false,
            skip_pow_check: true,
            mine_blocks_on_demand: false,
            mining_requires_peers: false,
        };

        params.verify_genesis()?;
        Ok(params)
    }

    fn testnet() -> Result<NetworkParameters, ParameterError> {
        let mut params = Self::mainnet()?;

        params.network = Network::Testnet;
        params.message_start = magics::TESTNET;
        params.default_port = Network::Testnet.default_port();
        params.last_pow_height = Height(500);
        params.zerocoin_start_height = Height(15);
        params.zerocoin_v2_start_height = Height(15);
        params.base58_prefixes = Base58Prefixes {
            // Testnet addresses start with 'b' or 'c'.
            pubkey_address: 85,
            script_address: 86,
            secret_key: 86,
            ext_public_key: [0x04, 0x35, 0x87, 0xcf],
            ext_secret_key: [0x04, 0x35, 0x83, 0x94],
            ext_coin_type: [0x80, 0x00, 0x02, 0x6e],
        };
        params.seeds.clear();
        params.mining_requires_peers = true;
        params.allow_min_difficulty_blocks = true;

        // The genesis block is shared with mainnet, but re-check it
        // against the expected hash anyway.
        params.verify_genesis()?;
        Ok(params)
    }

    fn regtest() -> Result<NetworkParameters, ParameterError> {
        let mut params = Self::testnet()?;

        params.network = Network::Regtest;
        params.message_start = magics::REGTEST;
        params.default_port = Network::Regtest.default_port();
        params.pow_limit = ExpandedDifficulty::max_value_shifted_right(1);
        params.mining_requires_peers = false;
        params.default_consistency_checks = true;
        params.require_standard = false;
        params.mine_blocks_on_demand = true;

        params.verify_genesis()?;
        Ok(params)
    }

    fn unit_test() -> Result<NetworkParameters, ParameterError> {
        let mut params = Self::mainnet()?;

        params.network = Network::UnitTest;
        params.default_port = Network::UnitTest.default_port();
        params.seeds.clear();
        params.mining_requires_peers = false;
        params.default_consistency_checks = true;
        params.allow_min_difficulty_blocks = false;
        params.mine_blocks_on_demand = true;

        params.verify_genesis()?;
        Ok(params)
    }

    /// Check the compiled-in genesis block against the expected merkle
    /// root and block hash.
    pub fn verify_genesis(&self) -> Result<(), ParameterError> {
        let computed_root = merkle::Root::from_transactions(&self.genesis.transactions);
        let expected_root = genesis_merkle_root();
        if computed_root != expected_root || self.genesis.header.merkle_root != expected_root {
            return Err(ParameterError::GenesisMerkleRootMismatch {
                computed: computed_root,
                expected: expected_root,
            });
        }

        let computed_hash = self.genesis.hash();
        let expected_hash = genesis_hash(self.network);
        if computed_hash != expected_hash {
            return Err(ParameterError::GenesisHashMismatch {
                computed: computed_hash,
                expected: expected_hash,
            });
        }

        Ok(())
    }
}
