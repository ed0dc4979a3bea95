use num_bigint::BigUint;
use num_traits::Zero;
use thiserror::Error;

/// How a modulus literal is interpreted when building accumulator
/// parameters.
///
/// Early protocol versions read the modulus literal as hexadecimal;
/// later versions read the same literal as decimal. Both interpretations
/// produced real chain data, so both remain constructible forever, as
/// two cryptographically distinct parameter sets. Do not unify them.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum ModulusEncoding {
    /// Hexadecimal digit interpretation (the historical parser).
    Legacy,
    /// Decimal digit interpretation (the current parser).
    Current,
}

/// An error building [`AccumulatorParameters`] from a modulus literal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModulusParseError {
    /// No digit of the literal was usable under the requested encoding.
    #[error("modulus literal has no {0:?}-encoded digits")]
    NoUsableDigits(ModulusEncoding),

    /// The parsed modulus was zero.
    #[error("modulus literal parsed to zero")]
    ZeroModulus,
}

/// The parameters an anonymous-spend accumulator proof is verified
/// against.
///
/// Derived once per process from the active network's modulus literal
/// and cached by the parameter registry; shared read-only afterwards.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AccumulatorParameters {
    /// The RSA-style accumulator modulus.
    pub modulus: BigUint,

    /// The security level the accumulator witnesses are generated at.
    pub security_level: u32,

    /// The encoding the modulus literal was parsed under.
    pub encoding: ModulusEncoding,
}

impl AccumulatorParameters {
    /// Build accumulator parameters from a modulus literal.
    ///
    /// The literal is read as its longest usable digit prefix under the
    /// requested encoding, mirroring the permissive parsers the
    /// historical chain data was produced with: a literal containing a
    /// hex-only digit (`a`-`f`) parses fully under [`Legacy`] but stops
    /// at that digit under [`Current`].
    ///
    /// [`Legacy`]: ModulusEncoding::Legacy
    /// [`Current`]: ModulusEncoding::Current
    pub fn from_modulus_literal(
        literal: &str,
        encoding: ModulusEncoding,
        security_level: u32,
    ) -> Result<AccumulatorParameters, ModulusParseError> {
        let (radix, is_digit): (u32, fn(char) -> bool) = match encoding {
            ModulusEncoding::Legacy => (16, |c| c.is_ascii_hexdigit()),
            ModulusEncoding::Current => (10, |c| c.is_ascii_digit()),
        };

        let prefix_len = literal.chars().take_while(|&c| is_digit(c)).count();
        if prefix_len == 0 {
            return Err(ModulusParseError::NoUsableDigits(encoding));
        }

        let modulus = BigUint::parse_bytes(literal[..prefix_len].as_bytes(), radix)
            .expect("digit prefix parses in its own radix");

        if modulus.is_zero() {
            return Err(ModulusParseError::ZeroModulus);
        }

        Ok(AccumulatorParameters {
            modulus,
            security_level,
            encoding,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodings_of_the_same_literal_diverge() {
        // All-decimal literals are valid in both radices, but denote
        // different numbers.
        let legacy =
            AccumulatorParameters::from_modulus_literal("2519590847", ModulusEncoding::Legacy, 100)
                .expect("parses as hex");
        let current =
            AccumulatorParameters::from_modulus_literal("2519590847", ModulusEncoding::Current, 100)
                .expect("parses as decimal");

        assert_ne!(legacy.modulus, current.modulus);
        assert!(!legacy.modulus.is_zero());
        assert!(!current.modulus.is_zero());
    }

    #[test]
    fn decimal_parse_stops_at_hex_digits() {
        // `25a7` is four hex digits but only the `25` prefix is decimal.
        let legacy =
            AccumulatorParameters::from_modulus_literal("25a7", ModulusEncoding::Legacy, 100)
                .expect("parses as hex");
        let current =
            AccumulatorParameters::from_modulus_literal("25a7", ModulusEncoding::Current, 100)
                .expect("decimal prefix parses");

        assert_eq!(legacy.modulus, BigUint::from(0x25a7u32));
        assert_eq!(current.modulus, BigUint::from(25u32));
    }

    #[test]
    fn unusable_literals_are_rejected() {
        assert_eq!(
            AccumulatorParameters::from_modulus_literal("", ModulusEncoding::Legacy, 100),
            Err(ModulusParseError::NoUsableDigits(ModulusEncoding::Legacy)),
        );
        assert_eq!(
            AccumulatorParameters::from_modulus_literal("xyz", ModulusEncoding::Current, 100),
            Err(ModulusParseError::NoUsableDigits(ModulusEncoding::Current)),
        );
        assert_eq!(
            AccumulatorParameters::from_modulus_literal("000", ModulusEncoding::Current, 100),
            Err(ModulusParseError::ZeroModulus),
        );
    }
}
