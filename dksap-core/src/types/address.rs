//! Address types for DKSAP.
//!
//! - [`MetaAddress`]: The recipient's published long-term public point
//! - [`EthAddress`] / [`SuiAddress`]: One-time chain addresses for a specific payment
//! - [`StealthAddress`]: Either of the above, tagged by format

use serde::{Deserialize, Serialize};

use super::{AddressFormat, EncodedPoint};
use crate::constants::{ETH_ADDRESS_SIZE, SUI_ADDRESS_SIZE};
use crate::error::{Result, StealthError};

// ═══════════════════════════════════════════════════════════════════════════════
// META-ADDRESS
// ═══════════════════════════════════════════════════════════════════════════════

/// A stealth meta-address: the encoding of the recipient's public point `M = G·m`.
///
/// Published once, out-of-band. Senders decode it back into a point to derive
/// one-time addresses for the recipient.
///
/// # Example
/// ```ignore
/// use dksap_core::MetaAddress;
///
/// let meta = MetaAddress::from_hex("d3f00f05...aedb68cc")?;
/// println!("{}", meta.to_hex());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MetaAddress {
    point: EncodedPoint,
}

impl MetaAddress {
    /// Wraps an encoded point as a meta-address.
    pub fn new(point: EncodedPoint) -> Self {
        Self { point }
    }

    /// Returns the encoded public point.
    pub fn encoded(&self) -> &EncodedPoint {
        &self.point
    }

    /// Validates the meta-address structure.
    ///
    /// Curve membership is checked when the point is decoded by a backend;
    /// this only rejects values that can never be a published key.
    pub fn validate(&self) -> Result<()> {
        if self.point.is_zero() {
            return Err(StealthError::InvalidMetaAddress(
                "encoded point is zero".into(),
            ));
        }

        Ok(())
    }

    /// Encodes to hex string (128 digits).
    pub fn to_hex(&self) -> String {
        self.point.to_hex()
    }

    /// Decodes from hex string and validates.
    pub fn from_hex(s: &str) -> Result<Self> {
        let point = EncodedPoint::from_hex(s)
            .map_err(|e| StealthError::InvalidMetaAddress(e.to_string()))?;
        let meta = Self::new(point);
        meta.validate()?;
        Ok(meta)
    }
}

impl std::fmt::Display for MetaAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// CHAIN ADDRESSES
// ═══════════════════════════════════════════════════════════════════════════════

/// Declares a fixed-width chain address: exact-length parsing, `0x` hex
/// rendering, and serde as a bare hex string.
macro_rules! chain_address {
    ($(#[$meta:meta])* $name:ident, $len:expr, $chain:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name {
            #[serde(with = "hex::serde")]
            bytes: [u8; $len],
        }

        impl $name {
            /// Parses an address from exactly the expected number of bytes.
            pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
                let bytes: [u8; $len] = bytes.try_into().map_err(|_| {
                    StealthError::InvalidStealthAddress(format!(
                        "{} address needs {} bytes, got {}",
                        $chain,
                        $len,
                        bytes.len()
                    ))
                })?;
                Ok(Self { bytes })
            }

            /// Wraps a digest that already has the right width.
            pub fn from_array(bytes: [u8; $len]) -> Self {
                Self { bytes }
            }

            /// Returns the raw bytes.
            pub fn as_bytes(&self) -> &[u8] {
                &self.bytes
            }

            /// Renders as lowercase hex with a `0x` prefix.
            pub fn to_hex_string(&self) -> String {
                format!("0x{}", hex::encode(self.bytes))
            }

            /// Parses hex in either case, `0x` optional.
            pub fn from_hex(s: &str) -> Result<Self> {
                let digits = s.trim();
                let digits = digits.strip_prefix("0x").unwrap_or(digits);
                Self::from_bytes(&hex::decode(digits)?)
            }

            /// The all-zero address, never produced by a derivation.
            pub fn zero() -> Self {
                Self { bytes: [0u8; $len] }
            }

            /// Returns true for the all-zero address.
            pub fn is_zero(&self) -> bool {
                self.bytes == [0u8; $len]
            }
        }

        impl std::fmt::Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_tuple(stringify!($name))
                    .field(&self.to_hex_string())
                    .finish()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.to_hex_string())
            }
        }
    };
}

chain_address!(
    /// A 20-byte Ethereum address: the low 20 bytes of keccak256 over the
    /// uncompressed public key.
    ///
    /// `Display` is lowercase; the mixed-case EIP-55 form needs keccak256 and
    /// lives in `dksap-crypto`.
    EthAddress,
    ETH_ADDRESS_SIZE,
    "Ethereum"
);

chain_address!(
    /// A 32-byte Sui address: blake2b-256 over the secp256k1 flag byte and
    /// the compressed public key.
    SuiAddress,
    SUI_ADDRESS_SIZE,
    "Sui"
);

// ═══════════════════════════════════════════════════════════════════════════════
// STEALTH ADDRESS
// ═══════════════════════════════════════════════════════════════════════════════

/// A one-time destination address in one of the supported chain formats.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "format", content = "address", rename_all = "lowercase")]
pub enum StealthAddress {
    /// Ethereum (and EVM chains): keccak256 of the uncompressed key.
    Ethereum(EthAddress),
    /// Sui: blake2b-256 of flag and compressed key.
    Sui(SuiAddress),
}

impl StealthAddress {
    /// Returns the format of this address.
    pub fn format(&self) -> AddressFormat {
        match self {
            StealthAddress::Ethereum(_) => AddressFormat::Ethereum,
            StealthAddress::Sui(_) => AddressFormat::Sui,
        }
    }

    /// Returns the raw address bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            StealthAddress::Ethereum(addr) => addr.as_bytes(),
            StealthAddress::Sui(addr) => addr.as_bytes(),
        }
    }

    /// Returns true if this is the zero address.
    pub fn is_zero(&self) -> bool {
        self.as_bytes().iter().all(|&b| b == 0)
    }
}

impl std::fmt::Display for StealthAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StealthAddress::Ethereum(addr) => write!(f, "{}", addr),
            StealthAddress::Sui(addr) => write!(f, "{}", addr),
        }
    }
}

impl From<EthAddress> for StealthAddress {
    fn from(addr: EthAddress) -> Self {
        StealthAddress::Ethereum(addr)
    }
}

impl From<SuiAddress> for StealthAddress {
    fn from(addr: SuiAddress) -> Self {
        StealthAddress::Sui(addr)
    }
}
