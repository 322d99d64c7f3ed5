//! # DKSAP Cryptography
//!
//! Curve-level building blocks of the Dual-Key Stealth Address Protocol.
//!
//! This crate provides:
//!
//! - **Curve**: the secp256k1 [`CurveGroup`](dksap_core::CurveGroup) backend over `k256`
//! - **Codec**: points ⇄ the 512-bit integer `x << 256 | y`
//! - **Hash**: keccak256 and the shared-secret → scalar map
//! - **Address**: Ethereum and Sui address schemes
//! - **Derivation**: the individual protocol steps
//! - **Verify**: the `G·p == P` consistency oracle
//!
//! Every protocol step is generic over the curve, so the same code runs on
//! secp256k1 and on any other prime-order group behind `CurveGroup`.
//!
//! ## Example
//!
//! ```rust,ignore
//! use dksap_crypto::{Secp256k1, derive, verify};
//! use dksap_core::{CurveGroup, HashToScalar};
//!
//! let m = Secp256k1::random_scalar(&mut rng);
//! let r = Secp256k1::random_scalar(&mut rng);
//!
//! let meta = derive::meta_public_point::<Secp256k1>(&m);
//! let shared = derive::sender_shared_secret::<Secp256k1>(&meta, &r);
//! let stealth = derive::derive_stealth_public_key::<Secp256k1>(&meta, &shared, HashToScalar::Reduce)?;
//!
//! let p = derive::recipient_derive_private_key::<Secp256k1>(&m, &shared, HashToScalar::Reduce)?;
//! verify::assert_consistent::<Secp256k1>(&p, &stealth)?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod address;
pub mod codec;
pub mod curve;
pub mod derive;
pub mod hash;
pub mod verify;

#[cfg(test)]
mod test_curve;

// Re-export main items at crate root
pub use address::{address_for_format, eip55_checksum, EthereumScheme, SuiScheme};
pub use codec::{decode, decode_point, encode, encode_point};
pub use curve::{generate_secret_key, scalar_from_secret, secret_from_scalar, Secp256k1};
pub use hash::{hash_to_scalar, keccak256};
pub use verify::{assert_consistent, verify_key_pair};
