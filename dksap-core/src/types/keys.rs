//! Key types for DKSAP.
//!
//! This module defines the key structures used in the protocol:
//!
//! - [`SecretKey`]: a 32-byte secret scalar, zeroized on drop
//! - [`EncodedPoint`]: a public point as the 512-bit integer `x << 256 | y`
//! - [`EphemeralPublicKey`]: `R = G·r`, published by the sender
//! - [`StealthPublicKey`]: `P = M + G·hash(S)`, the one-time destination key

use serde::{Deserialize, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

use super::{decode_hex, left_pad};
use crate::constants::{COORDINATE_SIZE, ENCODED_POINT_SIZE, SCALAR_SIZE};
use crate::error::{Result, StealthError};

// ═══════════════════════════════════════════════════════════════════════════════
// SECRET KEY
// ═══════════════════════════════════════════════════════════════════════════════

/// A secret scalar: the recipient's meta key `m`, a sender's ephemeral key `r`,
/// or a derived one-time private key `p`.
///
/// Stored as 32 big-endian bytes. Range checks against the group order happen
/// when the key is handed to a curve backend. Never expose this key in logs or
/// error messages.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    bytes: [u8; SCALAR_SIZE],
}

impl SecretKey {
    /// Creates a secret key from big-endian bytes.
    ///
    /// Shorter input is left-padded with zeros.
    ///
    /// # Errors
    /// Returns `InvalidScalar` if the value needs more than 32 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes = left_pad::<SCALAR_SIZE>(bytes).ok_or_else(|| {
            StealthError::InvalidScalar(format!(
                "value is wider than {} bytes",
                SCALAR_SIZE
            ))
        })?;
        Ok(Self { bytes })
    }

    /// Creates a secret key from a fixed-size array.
    pub fn from_array(bytes: [u8; SCALAR_SIZE]) -> Self {
        Self { bytes }
    }

    /// Parses a hex string (with or without `0x` prefix).
    pub fn from_hex(s: &str) -> Result<Self> {
        Self::from_bytes(&decode_hex(s)?)
    }

    /// Returns the raw bytes of the secret key.
    ///
    /// # Security
    /// Handle the returned bytes carefully - do not log or expose them.
    pub fn as_bytes(&self) -> &[u8; SCALAR_SIZE] {
        &self.bytes
    }

    /// Returns the hex-encoded secret key.
    ///
    /// Intended for explicit export only.
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Returns true if every byte is zero.
    pub fn is_zero(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }
}

impl std::fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose secret key content
        write!(f, "SecretKey([REDACTED])")
    }
}

/// The recipient's long-term secret `m`.
pub type MetaSecretKey = SecretKey;

/// A sender's one-time secret `r`.
pub type EphemeralSecretKey = SecretKey;

/// The recipient's one-time spending key `p = m + hash(S)`.
pub type StealthPrivateKey = SecretKey;

// ═══════════════════════════════════════════════════════════════════════════════
// ENCODED POINT
// ═══════════════════════════════════════════════════════════════════════════════

/// A curve point encoded as the integer `x << 256 | y`.
///
/// Held as its fixed-width 64-byte big-endian representation, so the first
/// 32 bytes are `x` and the last 32 bytes are `y`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct EncodedPoint {
    bytes: [u8; ENCODED_POINT_SIZE],
}

impl EncodedPoint {
    /// Creates an encoded point from a fixed-size array.
    pub fn from_array(bytes: [u8; ENCODED_POINT_SIZE]) -> Self {
        Self { bytes }
    }

    /// Creates an encoded point from a big-endian integer.
    ///
    /// Shorter input is left-padded, so a minimal encoding whose `x` has
    /// leading zero bytes is accepted.
    ///
    /// # Errors
    /// Returns `EncodingOverflow` if the integer needs more than 64 bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let bytes = left_pad::<ENCODED_POINT_SIZE>(bytes).ok_or_else(|| {
            StealthError::EncodingOverflow {
                max: ENCODED_POINT_SIZE,
                actual: bytes.iter().skip_while(|&&b| b == 0).count(),
            }
        })?;
        Ok(Self { bytes })
    }

    /// Returns the raw 64 bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the raw bytes as a fixed-size array reference.
    pub fn as_array(&self) -> &[u8; ENCODED_POINT_SIZE] {
        &self.bytes
    }

    /// Returns the `x` half (`self >> 256`).
    pub fn x_bytes(&self) -> [u8; COORDINATE_SIZE] {
        let mut x = [0u8; COORDINATE_SIZE];
        x.copy_from_slice(&self.bytes[..COORDINATE_SIZE]);
        x
    }

    /// Returns the `y` half (`self mod 2^256`).
    pub fn y_bytes(&self) -> [u8; COORDINATE_SIZE] {
        let mut y = [0u8; COORDINATE_SIZE];
        y.copy_from_slice(&self.bytes[COORDINATE_SIZE..]);
        y
    }

    /// Returns true if the encoded integer is zero.
    pub fn is_zero(&self) -> bool {
        self.bytes.iter().all(|&b| b == 0)
    }

    /// Returns the fixed-width hex encoding (128 digits).
    pub fn to_hex(&self) -> String {
        hex::encode(self.bytes)
    }

    /// Parses from hex (with or without `0x`, minimal or fixed width).
    pub fn from_hex(s: &str) -> Result<Self> {
        let bytes = decode_hex(s)?;
        Self::from_bytes(&bytes)
    }
}

impl std::fmt::Debug for EncodedPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "EncodedPoint({}...{})",
            hex::encode(&self.bytes[..8]),
            hex::encode(&self.bytes[ENCODED_POINT_SIZE - 8..])
        )
    }
}

impl std::fmt::Display for EncodedPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Default for EncodedPoint {
    fn default() -> Self {
        Self {
            bytes: [0u8; ENCODED_POINT_SIZE],
        }
    }
}

// Serde implementation that uses hex encoding
impl Serialize for EncodedPoint {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for EncodedPoint {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_hex(&s).map_err(serde::de::Error::custom)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// PUBLIC KEYS
// ═══════════════════════════════════════════════════════════════════════════════

/// The sender's ephemeral public key `R = G·r`, published with the payment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EphemeralPublicKey(pub EncodedPoint);

/// The one-time stealth public key `P = M + G·hash(S)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StealthPublicKey(pub EncodedPoint);

impl EphemeralPublicKey {
    /// Returns the encoded point.
    pub fn encoded(&self) -> &EncodedPoint {
        &self.0
    }

    /// Parses from hex.
    pub fn from_hex(s: &str) -> Result<Self> {
        EncodedPoint::from_hex(s).map(Self)
    }
}

impl StealthPublicKey {
    /// Returns the encoded point.
    pub fn encoded(&self) -> &EncodedPoint {
        &self.0
    }
}
