//! Transparent transaction components: outpoints, scripts, inputs and
//! outputs.

use std::{fmt, io};

use byteorder::{LittleEndian, WriteBytesExt};
use serde::{Deserialize, Serialize};

use crate::{
    amount::Amount,
    serialization::{MasterstakeSerialize, WriteMasterstakeExt},
    transaction,
};

/// A reference to one output of an earlier transaction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct OutPoint {
    /// The hash of the transaction containing the output.
    pub hash: transaction::Hash,

    /// The index of the output within that transaction.
    pub index: u32,
}

impl OutPoint {
    /// The null outpoint, used as the previous output of coinbase inputs.
    pub fn null() -> OutPoint {
        OutPoint {
            hash: transaction::Hash([0; 32]),
            index: u32::MAX,
        }
    }

    /// Returns true if this is the null (coinbase) outpoint.
    pub fn is_null(&self) -> bool {
        *self == OutPoint::null()
    }
}

impl MasterstakeSerialize for OutPoint {
    fn masterstake_serialize<W: io::Write>(&self, mut writer: W) -> Result<(), io::Error> {
        writer.write_32_bytes(&self.hash.0)?;
        writer.write_u32::<LittleEndian>(self.index)
    }
}

/// An encoded script, either locking an output or unlocking an input.
#[derive(Clone, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Script(pub Vec<u8>);

impl fmt::Debug for Script {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("Script").field(&hex::encode(&self.0)).finish()
    }
}

/// The opcode ending a pay-to-pubkey locking script.
const OP_CHECKSIG: u8 = 0xac;

impl Script {
    /// Returns true if the script is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// If this is a pay-to-pubkey locking script, return the committed
    /// public key.
    ///
    /// Accepts exactly the two historical encodings: a pushed 33-byte
    /// compressed key or a pushed 65-byte uncompressed key, followed by
    /// `OP_CHECKSIG`. The push bytes must parse as a point on the curve;
    /// anything else returns `None`, so verification using the result
    /// fails closed.
    pub fn as_pubkey(&self) -> Option<secp256k1::PublicKey> {
        let pushed = match self.0.as_slice() {
            [0x21, key @ .., OP_CHECKSIG] if key.len() == 33 => key,
            [0x41, key @ .., OP_CHECKSIG] if key.len() == 65 => key,
            _ => return None,
        };

        secp256k1::PublicKey::from_slice(pushed).ok()
    }
}

impl MasterstakeSerialize for Script {
    fn masterstake_serialize<W: io::Write>(&self, mut writer: W) -> Result<(), io::Error> {
        writer.write_compactsize(self.0.len() as u64)?;
        writer.write_all(&self.0)
    }
}

/// A transparent transaction input.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Input {
    /// The output being spent, or the null outpoint for coinbase inputs.
    pub outpoint: OutPoint,

    /// The unlocking script, or arbitrary data for coinbase inputs.
    pub script_sig: Script,

    /// The input sequence number.
    pub sequence: u32,
}

impl MasterstakeSerialize for Input {
    fn masterstake_serialize<W: io::Write>(&self, mut writer: W) -> Result<(), io::Error> {
        self.outpoint.masterstake_serialize(&mut writer)?;
        self.script_sig.masterstake_serialize(&mut writer)?;
        writer.write_u32::<LittleEndian>(self.sequence)
    }
}

/// A transparent transaction output.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Output {
    /// The amount locked by this output.
    pub value: Amount,

    /// The locking script.
    pub script_pubkey: Script,
}

impl Output {
    /// Returns true if this output carries no value and no script.
    ///
    /// The first output of a coinstake transaction is required to be
    /// empty in this sense, which is how coinstakes are recognized.
    pub fn is_empty(&self) -> bool {
        self.value.is_zero() && self.script_pubkey.is_empty()
    }
}

impl MasterstakeSerialize for Output {
    fn masterstake_serialize<W: io::Write>(&self, mut writer: W) -> Result<(), io::Error> {
        self.value.masterstake_serialize(&mut writer)?;
        self.script_pubkey.masterstake_serialize(&mut writer)
    }
}
