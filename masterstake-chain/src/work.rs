//! Proof-of-work difficulty encodings.
//!
//! The core does not re-check proof of work (stake eligibility replaced
//! it after the last PoW block), but block headers still carry the
//! compact difficulty field, and each network profile publishes its
//! historical proof-of-work ceiling.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A difficulty target threshold in the compact `nBits` format used by
/// Bitcoin-lineage headers.
///
/// For a block at height `height`, the header field MUST equal
/// `ThresholdBits(height)`. The encoding is a base-256 floating point
/// value; this core treats it as opaque header data.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CompactDifficulty(pub u32);

impl fmt::Debug for CompactDifficulty {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_tuple("CompactDifficulty")
            .field(&format_args!("{:#010x}", self.0))
            .finish()
    }
}

/// A 256-bit expanded difficulty threshold, in big-endian byte order.
///
/// Used for the per-network proof-of-work limit, which is the easiest
/// threshold a historical PoW block was allowed to meet.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct ExpandedDifficulty([u8; 32]);

impl ExpandedDifficulty {
    /// Returns the all-ones threshold shifted right by `bits`, the
    /// conventional way chain parameters express their PoW ceiling.
    pub fn max_value_shifted_right(bits: u32) -> Self {
        assert!(bits < 256, "shift must stay inside a 256-bit value");

        let mut limit = [0xffu8; 32];
        let byte_shift = (bits / 8) as usize;
        let bit_shift = bits % 8;

        // Shift whole bytes first, then the remaining bits.
        limit.copy_within(..32 - byte_shift, byte_shift);
        for byte in limit.iter_mut().take(byte_shift) {
            *byte = 0;
        }
        if bit_shift > 0 {
            let mut carry = 0u8;
            for byte in limit.iter_mut().skip(byte_shift) {
                let next_carry = *byte << (8 - bit_shift);
                *byte = (*byte >> bit_shift) | carry;
                carry = next_carry;
            }
        }

        ExpandedDifficulty(limit)
    }

    /// The threshold as big-endian bytes.
    pub fn bytes_in_display_order(&self) -> [u8; 32] {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unshifted_limit_is_all_ones() {
        let limit = ExpandedDifficulty::max_value_shifted_right(0);
        assert_eq!(limit.bytes_in_display_order(), [0xff; 32]);
    }

    #[test]
    fn mainnet_limit_has_twenty_leading_zero_bits() {
        let limit = ExpandedDifficulty::max_value_shifted_right(20);
        let bytes = limit.bytes_in_display_order();

        assert_eq!(bytes[0], 0x00);
        assert_eq!(bytes[1], 0x00);
        assert_eq!(bytes[2], 0x0f);
        assert!(bytes[3..].iter().all(|&b| b == 0xff));
    }

    #[test]
    fn regtest_limit_has_one_leading_zero_bit() {
        let limit = ExpandedDifficulty::max_value_shifted_right(1);
        let bytes = limit.bytes_in_display_order();

        assert_eq!(bytes[0], 0x7f);
        assert!(bytes[1..].iter().all(|&b| b == 0xff));
    }
}
