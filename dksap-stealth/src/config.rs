//! Protocol configuration.

use serde::{Deserialize, Serialize};

use dksap_core::constants::{ENV_ADDRESS_FORMAT, ENV_HASH_TO_SCALAR};
use dksap_core::error::Result;
use dksap_core::types::{AddressFormat, HashToScalar};

/// Parameters both sides of a payment must agree on.
///
/// The default reproduces the reference derivation: plain reduction for
/// hash-to-scalar and Ethereum addresses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// How the shared secret is folded into a scalar
    #[serde(default)]
    pub hash_to_scalar: HashToScalar,
    /// Which chain address the stealth key is rendered as
    #[serde(default)]
    pub address_format: AddressFormat,
}

impl ProtocolConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the hash-to-scalar strategy.
    pub fn with_hash_to_scalar(mut self, strategy: HashToScalar) -> Self {
        self.hash_to_scalar = strategy;
        self
    }

    /// Sets the address format.
    pub fn with_address_format(mut self, format: AddressFormat) -> Self {
        self.address_format = format;
        self
    }

    /// Loads configuration from the process environment.
    ///
    /// Reads `DKSAP_HASH_TO_SCALAR` and `DKSAP_ADDRESS_FORMAT`; unset
    /// variables keep their defaults.
    ///
    /// # Errors
    /// Returns `ConfigError` if a variable holds an unknown value.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_HASH_TO_SCALAR) {
            config.hash_to_scalar = value.parse()?;
        }
        if let Some(value) = lookup(ENV_ADDRESS_FORMAT) {
            config.address_format = value.parse()?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dksap_core::error::StealthError;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = ProtocolConfig::default();
        assert_eq!(config.hash_to_scalar, HashToScalar::Reduce);
        assert_eq!(config.address_format, AddressFormat::Ethereum);
    }

    #[test]
    fn test_builder_setters() {
        let config = ProtocolConfig::new()
            .with_hash_to_scalar(HashToScalar::Keccak256)
            .with_address_format(AddressFormat::Sui);
        assert_eq!(config.hash_to_scalar, HashToScalar::Keccak256);
        assert_eq!(config.address_format, AddressFormat::Sui);
    }

    #[test]
    fn test_lookup_empty_keeps_defaults() {
        let config = ProtocolConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ProtocolConfig::default());
    }

    #[test]
    fn test_lookup_overrides() {
        let config = ProtocolConfig::from_lookup(lookup_from(&[
            ("DKSAP_HASH_TO_SCALAR", "keccak256"),
            ("DKSAP_ADDRESS_FORMAT", "sui"),
        ]))
        .unwrap();
        assert_eq!(config.hash_to_scalar, HashToScalar::Keccak256);
        assert_eq!(config.address_format, AddressFormat::Sui);
    }

    #[test]
    fn test_lookup_rejects_unknown_value() {
        let result = ProtocolConfig::from_lookup(lookup_from(&[("DKSAP_ADDRESS_FORMAT", "solana")]));
        assert!(matches!(result, Err(StealthError::ConfigError(_))));
    }

    #[test]
    fn test_serde_fills_missing_fields() {
        let config: ProtocolConfig = serde_json::from_str(r#"{"address_format":"sui"}"#).unwrap();
        assert_eq!(config.hash_to_scalar, HashToScalar::Reduce);
        assert_eq!(config.address_format, AddressFormat::Sui);
    }
}
