//! Hashing: keccak256 and the shared-secret → scalar map.
//!
//! ## Hash-to-scalar
//!
//! Both parties fold the shared secret `S` into a scalar `h` the same way:
//!
//! ```text
//! Reduce:    h = (S.x << 256 | S.y) mod N
//! Keccak256: h = keccak256(len(domain) || domain || S.x || S.y) mod N
//! ```
//!
//! `Reduce` is the plain reduction every existing deployment uses. `Keccak256`
//! mixes the encoding through a domain-separated hash first; the length prefix
//! is a 4-byte little-endian `u32`.

use sha3::{Digest, Keccak256};
use tracing::trace;

use dksap_core::constants::{COORDINATE_SIZE, DOMAIN_HASH_TO_SCALAR, ENCODED_POINT_SIZE, KECCAK256_SIZE};
use dksap_core::error::{Result, StealthError};
use dksap_core::traits::CurveGroup;
use dksap_core::types::{EncodedPoint, HashToScalar};

use crate::codec::encode_coordinates;

// ═══════════════════════════════════════════════════════════════════════════════
// KECCAK256
// ═══════════════════════════════════════════════════════════════════════════════

/// Computes Keccak256 hash (used for Ethereum addresses).
///
/// Note: Keccak256 is NOT SHA3-256. They use different padding.
pub fn keccak256(input: &[u8]) -> [u8; KECCAK256_SIZE] {
    let mut hasher = Keccak256::new();
    hasher.update(input);
    hasher.finalize().into()
}

/// Keccak256 with a length-prefixed domain separator.
pub fn keccak256_domain(domain: &[u8], input: &[u8]) -> [u8; KECCAK256_SIZE] {
    let mut hasher = Keccak256::new();
    hasher.update((domain.len() as u32).to_le_bytes());
    hasher.update(domain);
    hasher.update(input);
    hasher.finalize().into()
}

// ═══════════════════════════════════════════════════════════════════════════════
// HASH-TO-SCALAR
// ═══════════════════════════════════════════════════════════════════════════════

/// Maps an encoded point to a scalar of `C` with the given strategy.
pub fn hash_encoded_to_scalar<C: CurveGroup>(
    encoded: &EncodedPoint,
    strategy: HashToScalar,
) -> C::Scalar {
    match strategy {
        HashToScalar::Reduce => C::reduce_wide(encoded.as_array()),
        HashToScalar::Keccak256 => {
            let digest = keccak256_domain(DOMAIN_HASH_TO_SCALAR, encoded.as_bytes());
            let mut wide = [0u8; ENCODED_POINT_SIZE];
            wide[ENCODED_POINT_SIZE - KECCAK256_SIZE..].copy_from_slice(&digest);
            C::reduce_wide(&wide)
        }
    }
}

/// Maps affine coordinates to a scalar of `C`.
pub fn hash_coordinates_to_scalar<C: CurveGroup>(
    x: &[u8; COORDINATE_SIZE],
    y: &[u8; COORDINATE_SIZE],
    strategy: HashToScalar,
) -> C::Scalar {
    hash_encoded_to_scalar::<C>(&encode_coordinates(x, y), strategy)
}

/// Maps a shared-secret point to a scalar of `C`.
///
/// # Errors
/// Returns `IdentityPoint` if `point` is the point at infinity.
pub fn hash_to_scalar<C: CurveGroup>(point: &C::Point, strategy: HashToScalar) -> Result<C::Scalar> {
    let (x, y) = C::to_affine(point).ok_or(StealthError::IdentityPoint)?;
    trace!(curve = C::NAME, %strategy, "hashing shared secret");
    Ok(hash_coordinates_to_scalar::<C>(&x, &y, strategy))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Secp256k1;
    use crate::test_curve::{ToyCurve, ToyPoint, ToyScalar};

    const SHARED_X: &str = "450da8a94a94e04e30458fa83e4323669bef338d6aec659a63ea86aa032a3483";
    const SHARED_Y: &str = "34180cb1cdd01059f334070c981014cec9255a882ae22da1a3969efe04ed8f04";

    fn be32(s: &str) -> [u8; 32] {
        let mut out = [0u8; 32];
        out.copy_from_slice(&hex::decode(s).unwrap());
        out
    }

    fn scalar_hex(s: &k256::Scalar) -> String {
        hex::encode(Secp256k1::scalar_to_be_bytes(s))
    }

    #[test]
    fn test_keccak256_known_vector() {
        let hash = keccak256(b"hello");
        assert_eq!(
            hex::encode(hash),
            "1c8aff950685c2ed4bc3174f3472287b56d9517b9c948127319a09a7a36deac8"
        );
    }

    #[test]
    fn test_keccak256_domain_separates() {
        assert_ne!(keccak256_domain(b"a", b"bc"), keccak256_domain(b"ab", b"c"));
        assert_ne!(keccak256_domain(b"a", b"bc"), keccak256(b"abc"));
    }

    #[test]
    fn test_reduce_reference_vector() {
        let h = hash_coordinates_to_scalar::<Secp256k1>(
            &be32(SHARED_X),
            &be32(SHARED_Y),
            HashToScalar::Reduce,
        );
        assert_eq!(
            scalar_hex(&h),
            "ad767dddf31e64fc963aa74ace998826792e5dc98da66594ec8cdb33cab0afa4"
        );
    }

    #[test]
    fn test_keccak_reference_vector() {
        let h = hash_coordinates_to_scalar::<Secp256k1>(
            &be32(SHARED_X),
            &be32(SHARED_Y),
            HashToScalar::Keccak256,
        );
        assert_eq!(
            scalar_hex(&h),
            "b4ecdff9755d25b72bc49fd84d0cce209f3c37beff28f99e9179781133b7792b"
        );
    }

    #[test]
    fn test_toy_hand_checked_hash() {
        // (548 << 256 | 498) mod 1093 = 874
        let h = hash_to_scalar::<ToyCurve>(&ToyPoint::Affine(548, 498), HashToScalar::Reduce).unwrap();
        assert_eq!(h, ToyScalar(874));
    }

    #[test]
    fn test_identity_cannot_be_hashed() {
        assert!(matches!(
            hash_to_scalar::<ToyCurve>(&ToyPoint::Infinity, HashToScalar::Reduce),
            Err(StealthError::IdentityPoint)
        ));
    }

    #[test]
    fn test_strategies_disagree() {
        let g = k256::ProjectivePoint::GENERATOR;
        assert_ne!(
            hash_to_scalar::<Secp256k1>(&g, HashToScalar::Reduce).unwrap(),
            hash_to_scalar::<Secp256k1>(&g, HashToScalar::Keccak256).unwrap()
        );
    }
}
