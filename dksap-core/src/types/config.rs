//! Protocol parameters shared by sender and recipient.
//!
//! Both parties must agree on these values; a mismatch silently produces
//! unrelated stealth keys, which the recipient detects as a `PointMismatch`.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StealthError;

/// How a shared-secret point is folded into a scalar.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashToScalar {
    /// `(x << 256 | y) mod N`. Plain modular reduction, no mixing.
    #[default]
    Reduce,
    /// `keccak256(domain || x || y) mod N`.
    Keccak256,
}

impl HashToScalar {
    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HashToScalar::Reduce => "reduce",
            HashToScalar::Keccak256 => "keccak256",
        }
    }
}

impl FromStr for HashToScalar {
    type Err = StealthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reduce" | "mod" => Ok(HashToScalar::Reduce),
            "keccak256" | "keccak" => Ok(HashToScalar::Keccak256),
            other => Err(StealthError::ConfigError(format!(
                "unknown hash-to-scalar strategy '{other}' (expected 'reduce' or 'keccak256')"
            ))),
        }
    }
}

impl std::fmt::Display for HashToScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which chain rule turns a stealth public key into an address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressFormat {
    /// Last 20 bytes of keccak256 over the uncompressed key.
    #[default]
    Ethereum,
    /// blake2b-256 over the secp256k1 flag and compressed key.
    Sui,
}

impl AddressFormat {
    /// Returns the canonical lowercase name.
    pub fn as_str(&self) -> &'static str {
        match self {
            AddressFormat::Ethereum => "ethereum",
            AddressFormat::Sui => "sui",
        }
    }
}

impl FromStr for AddressFormat {
    type Err = StealthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ethereum" | "eth" | "evm" => Ok(AddressFormat::Ethereum),
            "sui" => Ok(AddressFormat::Sui),
            other => Err(StealthError::ConfigError(format!(
                "unknown address format '{other}' (expected 'ethereum' or 'sui')"
            ))),
        }
    }
}

impl std::fmt::Display for AddressFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("reduce", HashToScalar::Reduce ; "canonical reduce")]
    #[test_case("MOD", HashToScalar::Reduce ; "alias mod")]
    #[test_case("keccak256", HashToScalar::Keccak256 ; "canonical keccak")]
    #[test_case(" keccak ", HashToScalar::Keccak256 ; "alias keccak with spaces")]
    fn test_hash_to_scalar_from_str(input: &str, expected: HashToScalar) {
        assert_eq!(input.parse::<HashToScalar>().unwrap(), expected);
    }

    #[test_case("ethereum", AddressFormat::Ethereum ; "canonical ethereum")]
    #[test_case("EVM", AddressFormat::Ethereum ; "alias evm")]
    #[test_case("sui", AddressFormat::Sui ; "canonical sui")]
    fn test_address_format_from_str(input: &str, expected: AddressFormat) {
        assert_eq!(input.parse::<AddressFormat>().unwrap(), expected);
    }

    #[test]
    fn test_unknown_values_rejected() {
        assert!(matches!(
            "sha1".parse::<HashToScalar>(),
            Err(StealthError::ConfigError(_))
        ));
        assert!(matches!(
            "bitcoin".parse::<AddressFormat>(),
            Err(StealthError::ConfigError(_))
        ));
    }

    #[test]
    fn test_defaults_match_reference() {
        assert_eq!(HashToScalar::default(), HashToScalar::Reduce);
        assert_eq!(AddressFormat::default(), AddressFormat::Ethereum);
    }

    #[test]
    fn test_display_roundtrip() {
        for strategy in [HashToScalar::Reduce, HashToScalar::Keccak256] {
            assert_eq!(strategy.to_string().parse::<HashToScalar>().unwrap(), strategy);
        }
        for format in [AddressFormat::Ethereum, AddressFormat::Sui] {
            assert_eq!(format.to_string().parse::<AddressFormat>().unwrap(), format);
        }
    }
}
