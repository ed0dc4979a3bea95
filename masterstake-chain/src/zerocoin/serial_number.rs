use std::fmt;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::serialization::SerializationError;

/// The serial number revealed when an anonymous coin is redeemed.
///
/// Each serial uniquely identifies one redemption: revealing the same
/// serial twice is a double spend. Serials are canonical non-negative
/// big integers; the hex form used in spend proofs and the bundled
/// blacklist round-trips through [`fmt::Display`] and
/// [`std::str::FromStr`].
#[derive(Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct SerialNumber(BigUint);

impl SerialNumber {
    /// The serial as a big integer.
    pub fn as_biguint(&self) -> &BigUint {
        &self.0
    }
}

impl From<BigUint> for SerialNumber {
    fn from(value: BigUint) -> Self {
        SerialNumber(value)
    }
}

impl From<u64> for SerialNumber {
    fn from(value: u64) -> Self {
        SerialNumber(BigUint::from(value))
    }
}

impl fmt::Display for SerialNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:x}", self.0)
    }
}

impl std::str::FromStr for SerialNumber {
    type Err = SerializationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(SerializationError::Parse("empty serial number"));
        }

        BigUint::parse_bytes(s.as_bytes(), 16)
            .map(SerialNumber)
            .ok_or(SerializationError::Parse(
                "serial number is not a hex integer",
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let serial: SerialNumber = "84b519314e3e1fd4a4527a841e5a1ef7ad87b55c85f8e48cad4b16723e55edc"
            .parse()
            .expect("valid hex serial");

        assert_eq!(
            serial.to_string(),
            "84b519314e3e1fd4a4527a841e5a1ef7ad87b55c85f8e48cad4b16723e55edc"
        );
    }

    #[test]
    fn rejects_malformed_serials() {
        assert!("".parse::<SerialNumber>().is_err());
        assert!("not hex!".parse::<SerialNumber>().is_err());
        assert!("123g".parse::<SerialNumber>().is_err());
    }

    #[test]
    fn serde_round_trip() {
        let serial = SerialNumber::from(0xdead_beef_u64);

        let json = serde_json::to_string(&serial).expect("serials serialize");
        let parsed: SerialNumber = serde_json::from_str(&json).expect("serials deserialize");
        assert_eq!(parsed, serial);
    }

    #[test]
    fn leading_zeros_normalize_to_the_same_value() {
        let a: SerialNumber = "00ff".parse().expect("valid");
        let b: SerialNumber = "ff".parse().expect("valid");
        assert_eq!(a, b);
    }
}
