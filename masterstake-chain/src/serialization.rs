//! Bitcoin-style binary serialization for MasterStake chain types.
//!
//! Block and transaction hashes are defined as double-SHA256 digests of
//! this encoding, so every consensus-critical type in this crate
//! implements [`MasterstakeSerialize`] and hashes itself through a
//! [`Sha256dWriter`](crate::sha256d_writer::Sha256dWriter).

use std::io;

use byteorder::{LittleEndian, WriteBytesExt};
use thiserror::Error;

/// A serialization error.
#[derive(Error, Debug)]
pub enum SerializationError {
    /// An io error that prevented deserialization
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// The data to be deserialized was malformed.
    #[error("parse error: {0}")]
    Parse(&'static str),
}

/// Consensus-critical serialization for MasterStake.
///
/// This trait provides a generic serialization for consensus-critical
/// formats, such as transactions and block headers. It is intended for
/// use only in those formats: two distinct types with the same byte
/// encoding must never both implement it.
pub trait MasterstakeSerialize: Sized {
    /// Write `self` to the given `writer` using the canonical format.
    fn masterstake_serialize<W: io::Write>(&self, writer: W) -> Result<(), io::Error>;

    /// Helper: serialize `self` to a freshly allocated byte vector.
    fn masterstake_serialize_to_vec(&self) -> Result<Vec<u8>, io::Error> {
        let mut data = Vec::new();
        self.masterstake_serialize(&mut data)?;
        Ok(data)
    }
}

/// Extends [`Write`](io::Write) with methods for writing MasterStake types.
pub trait WriteMasterstakeExt: io::Write {
    /// Writes a `u64` using the Bitcoin `CompactSize` encoding.
    #[inline]
    fn write_compactsize(&mut self, n: u64) -> io::Result<()> {
        match n {
            0x0000_0000..=0x0000_00fc => self.write_u8(n as u8),
            0x0000_00fd..=0x0000_ffff => {
                self.write_u8(0xfd)?;
                self.write_u16::<LittleEndian>(n as u16)
            }
            0x0001_0000..=0xffff_ffff => {
                self.write_u8(0xfe)?;
                self.write_u32::<LittleEndian>(n as u32)
            }
            _ => {
                self.write_u8(0xff)?;
                self.write_u64::<LittleEndian>(n)
            }
        }
    }

    /// Convenience method to write exactly 32 u8's.
    #[inline]
    fn write_32_bytes(&mut self, bytes: &[u8; 32]) -> io::Result<()> {
        self.write_all(bytes)
    }
}

/// Mark all types implementing `Write` as implementing the extension.
impl<W: io::Write + ?Sized> WriteMasterstakeExt for W {}

#[cfg(test)]
mod tests {
    use super::*;

    fn compactsize_bytes(n: u64) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes
            .write_compactsize(n)
            .expect("writing to a Vec never fails");
        bytes
    }

    #[test]
    fn compactsize_boundaries() {
        assert_eq!(compactsize_bytes(0x12), b"\x12");
        assert_eq!(compactsize_bytes(0xfc), b"\xfc");
        assert_eq!(compactsize_bytes(0xfd), b"\xfd\xfd\x00");
        assert_eq!(compactsize_bytes(0xaafd), b"\xfd\xfd\xaa");
        assert_eq!(compactsize_bytes(0xbbaafd), b"\xfe\xfd\xaa\xbb\x00");
        assert_eq!(
            compactsize_bytes(0x22cc_bbaa_fd00),
            b"\xff\x00\xfd\xaa\xbb\xcc\x22\x00\x00"
        );
    }
}
