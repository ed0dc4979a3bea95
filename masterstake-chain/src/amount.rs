//! Monetary amounts, in the smallest on-chain unit.

use std::io;

use byteorder::{LittleEndian, WriteBytesExt};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::serialization::MasterstakeSerialize;

/// One whole coin, in base units.
pub const COIN: i64 = 100_000_000;

/// One hundredth of a coin, in base units.
pub const CENT: i64 = 1_000_000;

/// A monetary amount carried by a transaction output.
///
/// Amounts are validated against the active network's money ceiling by
/// the (external) transaction validation pipeline; this type only rules
/// out negative values.
#[derive(
    Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
pub struct Amount(i64);

/// Errors that can be returned when validating an [`Amount`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The amount is outside the valid range.
    #[error("amount {0} is outside the valid amount range")]
    OutOfRange(i64),
}

impl Amount {
    /// A zero amount.
    pub fn zero() -> Amount {
        Amount(0)
    }

    /// Create an amount from base units, rejecting negative values.
    pub fn try_from_base_units(units: i64) -> Result<Amount, Error> {
        if units < 0 {
            Err(Error::OutOfRange(units))
        } else {
            Ok(Amount(units))
        }
    }

    /// Create an amount from whole coins, rejecting negative values.
    pub fn try_from_coins(coins: i64) -> Result<Amount, Error> {
        units_checked(coins).ok_or(Error::OutOfRange(coins))
    }

    /// The amount in base units.
    pub fn base_units(&self) -> i64 {
        self.0
    }

    /// Returns true if this amount is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

fn units_checked(coins: i64) -> Option<Amount> {
    if coins < 0 {
        return None;
    }
    coins.checked_mul(COIN).map(Amount)
}

impl MasterstakeSerialize for Amount {
    fn masterstake_serialize<W: io::Write>(&self, mut writer: W) -> Result<(), io::Error> {
        writer.write_i64::<LittleEndian>(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_amounts() {
        assert!(Amount::try_from_base_units(-1).is_err());
        assert!(Amount::try_from_coins(-1).is_err());
    }

    #[test]
    fn coins_scale_by_the_base_unit() {
        let amount = Amount::try_from_coins(15_000).expect("in range");
        assert_eq!(amount.base_units(), 15_000 * COIN);
    }

    #[test]
    fn overflowing_coin_counts_are_rejected() {
        assert!(Amount::try_from_coins(i64::MAX).is_err());
    }
}
