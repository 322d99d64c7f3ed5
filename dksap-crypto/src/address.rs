//! Chain address schemes for stealth public keys.
//!
//! The same one-time key pair can receive funds on more than one chain, so
//! address derivation is an injected [`AddressScheme`] rather than a fixed
//! step of the protocol.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

use dksap_core::constants::{
    COMPRESSED_POINT_SIZE, COORDINATE_SIZE, ETH_ADDRESS_SIZE, KECCAK256_SIZE, SUI_SECP256K1_FLAG,
};
use dksap_core::traits::AddressScheme;
use dksap_core::types::{AddressFormat, EthAddress, StealthAddress, SuiAddress};

use crate::hash::keccak256;

type Blake2b256 = Blake2b<U32>;

// ═══════════════════════════════════════════════════════════════════════════════
// ETHEREUM
// ═══════════════════════════════════════════════════════════════════════════════

/// `address = keccak256(x || y)[12..32]`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EthereumScheme;

impl AddressScheme for EthereumScheme {
    type Address = EthAddress;

    fn name(&self) -> &'static str {
        "ethereum"
    }

    fn address_of(&self, x: &[u8; COORDINATE_SIZE], y: &[u8; COORDINATE_SIZE]) -> EthAddress {
        let mut uncompressed = [0u8; 2 * COORDINATE_SIZE];
        uncompressed[..COORDINATE_SIZE].copy_from_slice(x);
        uncompressed[COORDINATE_SIZE..].copy_from_slice(y);

        let hash = keccak256(&uncompressed);
        let mut bytes = [0u8; ETH_ADDRESS_SIZE];
        bytes.copy_from_slice(&hash[KECCAK256_SIZE - ETH_ADDRESS_SIZE..]);
        EthAddress::from_array(bytes)
    }
}

/// Formats an address with the EIP-55 mixed-case checksum.
pub fn eip55_checksum(address: &EthAddress) -> String {
    let lower = hex::encode(address.as_bytes());
    let hash = keccak256(lower.as_bytes());

    let mut out = String::with_capacity(2 + lower.len());
    out.push_str("0x");
    for (i, c) in lower.chars().enumerate() {
        let nibble = (hash[i / 2] >> (if i % 2 == 0 { 4 } else { 0 })) & 0x0f;
        if c.is_ascii_alphabetic() && nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}

// ═══════════════════════════════════════════════════════════════════════════════
// SUI
// ═══════════════════════════════════════════════════════════════════════════════

/// `address = blake2b256(0x01 || compressed(P))`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SuiScheme;

impl AddressScheme for SuiScheme {
    type Address = SuiAddress;

    fn name(&self) -> &'static str {
        "sui"
    }

    fn address_of(&self, x: &[u8; COORDINATE_SIZE], y: &[u8; COORDINATE_SIZE]) -> SuiAddress {
        let compressed = compress(x, y);

        let mut hasher = Blake2b256::new();
        hasher.update([SUI_SECP256K1_FLAG]);
        hasher.update(compressed);
        SuiAddress::from_array(hasher.finalize().into())
    }
}

/// SEC1 compressed form: parity prefix `0x02`/`0x03` followed by `x`.
pub fn compress(x: &[u8; COORDINATE_SIZE], y: &[u8; COORDINATE_SIZE]) -> [u8; COMPRESSED_POINT_SIZE] {
    let mut out = [0u8; COMPRESSED_POINT_SIZE];
    out[0] = 0x02 | (y[COORDINATE_SIZE - 1] & 1);
    out[1..].copy_from_slice(x);
    out
}

// ═══════════════════════════════════════════════════════════════════════════════
// DISPATCH
// ═══════════════════════════════════════════════════════════════════════════════

/// Derives the address of `(x, y)` in the configured format.
pub fn address_for_format(
    format: AddressFormat,
    x: &[u8; COORDINATE_SIZE],
    y: &[u8; COORDINATE_SIZE],
) -> StealthAddress {
    match format {
        AddressFormat::Ethereum => EthereumScheme.address_of(x, y).into(),
        AddressFormat::Sui => SuiScheme.address_of(x, y).into(),
    }
}
