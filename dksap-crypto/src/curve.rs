//! secp256k1 backend for [`CurveGroup`].
//!
//! All arithmetic is delegated to `k256`, which provides constant-time field
//! and scalar operations. Nothing in this module re-derives modular
//! arithmetic; it only adapts `k256` types to the protocol's byte-level
//! conventions (32-byte big-endian scalars and coordinates).

use k256::elliptic_curve::bigint::U512;
use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::elliptic_curve::{Field, PrimeField};
use k256::{AffinePoint, FieldBytes, ProjectivePoint, Scalar};
use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use dksap_core::constants::{COORDINATE_SIZE, ENCODED_POINT_SIZE, SCALAR_SIZE};
use dksap_core::error::{Result, StealthError};
use dksap_core::traits::{AffineCoordinates, CurveGroup};
use dksap_core::types::SecretKey;

/// The secp256k1 curve (`y² = x³ + 7`), as used by Bitcoin and Ethereum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Secp256k1;

impl CurveGroup for Secp256k1 {
    type Scalar = Scalar;
    type Point = ProjectivePoint;

    const NAME: &'static str = "secp256k1";

    fn scalar_from_be_bytes(bytes: &[u8; SCALAR_SIZE]) -> Result<Scalar> {
        let scalar: Option<Scalar> = Scalar::from_repr(FieldBytes::from(*bytes)).into();
        let scalar = scalar.ok_or_else(|| {
            StealthError::InvalidScalar("value is not below the secp256k1 group order".into())
        })?;

        if bool::from(scalar.is_zero()) {
            return Err(StealthError::InvalidScalar("scalar is zero".into()));
        }

        Ok(scalar)
    }

    fn scalar_to_be_bytes(scalar: &Scalar) -> [u8; SCALAR_SIZE] {
        scalar.to_bytes().into()
    }

    fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Scalar {
        loop {
            let scalar = <Scalar as Field>::random(&mut *rng);
            if !bool::from(scalar.is_zero()) {
                return scalar;
            }
        }
    }

    fn scalar_add(a: &Scalar, b: &Scalar) -> Scalar {
        a + b
    }

    fn reduce_wide(bytes: &[u8; ENCODED_POINT_SIZE]) -> Scalar {
        <Scalar as Reduce<U512>>::reduce(U512::from_be_slice(bytes))
    }

    fn scalar_base_mult(k: &Scalar) -> ProjectivePoint {
        ProjectivePoint::GENERATOR * k
    }

    fn scalar_mult(point: &ProjectivePoint, k: &Scalar) -> ProjectivePoint {
        point * k
    }

    fn point_add(p: &ProjectivePoint, q: &ProjectivePoint) -> ProjectivePoint {
        p + q
    }

    fn to_affine(point: &ProjectivePoint) -> Option<AffineCoordinates> {
        let encoded = point.to_affine().to_encoded_point(false);
        let (x, y) = (encoded.x()?, encoded.y()?);

        let mut x_bytes = [0u8; COORDINATE_SIZE];
        let mut y_bytes = [0u8; COORDINATE_SIZE];
        x_bytes.copy_from_slice(x);
        y_bytes.copy_from_slice(y);
        Some((x_bytes, y_bytes))
    }

    fn from_affine(
        x: &[u8; COORDINATE_SIZE],
        y: &[u8; COORDINATE_SIZE],
    ) -> Result<ProjectivePoint> {
        let encoded =
            k256::EncodedPoint::from_affine_coordinates(&FieldBytes::from(*x), &FieldBytes::from(*y), false);
        let affine: Option<AffinePoint> = AffinePoint::from_encoded_point(&encoded).into();

        affine
            .map(ProjectivePoint::from)
            .ok_or_else(|| StealthError::InvalidPoint("coordinates are not on secp256k1".into()))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// SECRET KEY CONVERSION
// ═══════════════════════════════════════════════════════════════════════════════

/// Parses a [`SecretKey`] into a scalar of `C`.
///
/// # Errors
/// Returns `InvalidScalar` if the key is zero or not below the group order.
pub fn scalar_from_secret<C: CurveGroup>(secret: &SecretKey) -> Result<C::Scalar> {
    C::scalar_from_be_bytes(secret.as_bytes())
}

/// Wraps a scalar of `C` as a zeroize-on-drop [`SecretKey`].
pub fn secret_from_scalar<C: CurveGroup>(scalar: &C::Scalar) -> SecretKey {
    let mut bytes = C::scalar_to_be_bytes(scalar);
    let secret = SecretKey::from_array(bytes);
    bytes.zeroize();
    secret
}

/// Generates a fresh random secret key for `C`.
pub fn generate_secret_key<C: CurveGroup, R: RngCore + CryptoRng>(rng: &mut R) -> SecretKey {
    secret_from_scalar::<C>(&C::random_scalar(rng))
}
