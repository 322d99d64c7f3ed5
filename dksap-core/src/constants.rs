//! Protocol constants for DKSAP.
//!
//! Sizes follow secp256k1: 256-bit coordinates and scalars. The point
//! encoding packs both coordinates into one 512-bit integer.

// ═══════════════════════════════════════════════════════════════════════════════
// FIELD WIDTHS
// ═══════════════════════════════════════════════════════════════════════════════

/// Bit width of one affine coordinate in the point encoding.
///
/// The encoding is `x << COORDINATE_BITS | y`.
pub const COORDINATE_BITS: usize = 256;

/// Size of one affine coordinate in bytes.
pub const COORDINATE_SIZE: usize = COORDINATE_BITS / 8;

/// Size of an encoded point (`x || y`, big-endian) in bytes.
pub const ENCODED_POINT_SIZE: usize = 2 * COORDINATE_SIZE;

/// Size of a scalar (private key, ephemeral secret, hash offset) in bytes.
pub const SCALAR_SIZE: usize = 32;

/// Size of a SEC1 compressed public key (`0x02 | 0x03` prefix + x).
pub const COMPRESSED_POINT_SIZE: usize = 1 + COORDINATE_SIZE;

// ═══════════════════════════════════════════════════════════════════════════════
// DOMAIN SEPARATORS
// ═══════════════════════════════════════════════════════════════════════════════

/// Domain separator for the keccak256 hash-to-scalar strategy.
///
/// Unused by the default reduction strategy, which hashes nothing.
pub const DOMAIN_HASH_TO_SCALAR: &[u8] = b"DKSAP_HASH_TO_SCALAR_V1";

// ═══════════════════════════════════════════════════════════════════════════════
// ETHEREUM CONSTANTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of Ethereum address in bytes (20 bytes = 160 bits).
pub const ETH_ADDRESS_SIZE: usize = 20;

/// Size of keccak256 hash output.
pub const KECCAK256_SIZE: usize = 32;

// ═══════════════════════════════════════════════════════════════════════════════
// SUI CONSTANTS
// ═══════════════════════════════════════════════════════════════════════════════

/// Size of Sui address in bytes (blake2b-256 output).
pub const SUI_ADDRESS_SIZE: usize = 32;

/// Sui signature scheme flag for secp256k1 keys.
pub const SUI_SECP256K1_FLAG: u8 = 0x01;

// ═══════════════════════════════════════════════════════════════════════════════
// ENVIRONMENT
// ═══════════════════════════════════════════════════════════════════════════════

/// Environment variable selecting the hash-to-scalar strategy.
pub const ENV_HASH_TO_SCALAR: &str = "DKSAP_HASH_TO_SCALAR";

/// Environment variable selecting the stealth address format.
pub const ENV_ADDRESS_FORMAT: &str = "DKSAP_ADDRESS_FORMAT";
