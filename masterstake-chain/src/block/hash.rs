use std::{fmt, io};

use serde::{Deserialize, Serialize};

#[cfg(any(test, feature = "proptest-impl"))]
use proptest_derive::Arbitrary;

use crate::{
    serialization::{MasterstakeSerialize, SerializationError},
    sha256d_writer::Sha256dWriter,
};

use super::Header;

/// A SHA-256d hash of a block [`Header`].
///
/// This is frequently used to identify the entire block, since the hash
/// preimage includes the merkle root of the transactions in this block.
/// But technically it is only a hash of the block header, so two blocks
/// with identical headers and different transaction lists cannot both be
/// valid.
///
/// Internally this type keeps the raw digest bytes. The human-readable
/// byte-reversed hex form used by block explorers and the hard-coded
/// checkpoint tables is produced by the [`fmt::Display`] impl, and
/// accepted back by [`std::str::FromStr`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
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
        f.debug_tuple("block::Hash")
            .field(&self.to_string())
            .finish()
    }
}

impl From<&Header> for Hash {
    fn from(header: &Header) -> Self {
        let mut hash_writer = Sha256dWriter::default();
        header
            .masterstake_serialize(&mut hash_writer)
            .expect("Sha256dWriter is infallible");
        Self(hash_writer.finish())
    }
}

impl MasterstakeSerialize for Hash {
    fn masterstake_serialize<W: io::Write>(&self, mut writer: W) -> Result<(), io::Error> {
        writer.write_all(&self.0)
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_round_trips_through_from_str() {
        let hash: Hash = "0000f00ba769187169bc7e9b4fd82c73ce31d355c35915a5d999ef55d3c903fb"
            .parse()
            .expect("valid hex parses");

        // Display is byte-reversed, so the leading zero bytes of the
        // proof-of-work hash end up at the start of the string.
        assert_eq!(hash.0[31], 0x00);
        assert_eq!(
            hash.to_string(),
            "0000f00ba769187169bc7e9b4fd82c73ce31d355c35915a5d999ef55d3c903fb"
        );
    }

    #[test]
    fn from_str_rejects_bad_input() {
        assert!("".parse::<Hash>().is_err());
        assert!("0000f00b".parse::<Hash>().is_err());
        assert!("zz00f00ba769187169bc7e9b4fd82c73ce31d355c35915a5d999ef55d3c903fb"
            .parse::<Hash>()
            .is_err());
    }
}
