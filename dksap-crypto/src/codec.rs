//! Point codec: affine coordinates ⇄ the 512-bit integer `x << 256 | y`.
//!
//! The wire form is fixed-width big-endian, so `x` always occupies the high
//! 32 bytes and `y` the low 32 bytes. Coordinates shorter than 32 bytes are
//! left-padded; coordinates wider than 256 bits are rejected instead of being
//! folded into the other half.

use tracing::trace;

use dksap_core::constants::{COORDINATE_SIZE, ENCODED_POINT_SIZE};
use dksap_core::error::{Result, StealthError};
use dksap_core::traits::CurveGroup;
use dksap_core::types::EncodedPoint;

/// Packs `(x, y)` as `x << 256 | y`.
///
/// Each coordinate is a big-endian integer of at most 256 bits. Leading zero
/// bytes are ignored, so minimal encodings are accepted.
///
/// # Errors
/// Returns `EncodingOverflow` if either coordinate is 2^256 or larger.
pub fn encode(x: &[u8], y: &[u8]) -> Result<EncodedPoint> {
    let x = fit_coordinate(x)?;
    let y = fit_coordinate(y)?;
    Ok(encode_coordinates(&x, &y))
}

/// Packs two fixed-width coordinates. Cannot overflow.
pub fn encode_coordinates(x: &[u8; COORDINATE_SIZE], y: &[u8; COORDINATE_SIZE]) -> EncodedPoint {
    let mut bytes = [0u8; ENCODED_POINT_SIZE];
    bytes[..COORDINATE_SIZE].copy_from_slice(x);
    bytes[COORDINATE_SIZE..].copy_from_slice(y);
    EncodedPoint::from_array(bytes)
}

/// Splits an encoded point into `(x, y) = (v >> 256, v mod 2^256)`.
///
/// The inverse of [`encode`] for any coordinates below 2^256. No curve
/// membership check happens here; see [`decode_point`].
pub fn decode(encoded: &EncodedPoint) -> ([u8; COORDINATE_SIZE], [u8; COORDINATE_SIZE]) {
    (encoded.x_bytes(), encoded.y_bytes())
}

/// Encodes a curve point.
///
/// # Errors
/// Returns `IdentityPoint` for the point at infinity, which has no affine
/// coordinates.
pub fn encode_point<C: CurveGroup>(point: &C::Point) -> Result<EncodedPoint> {
    let (x, y) = C::to_affine(point).ok_or(StealthError::IdentityPoint)?;
    Ok(encode_coordinates(&x, &y))
}

/// Decodes an encoding and checks that it lies on the curve.
///
/// # Errors
/// Returns `InvalidPoint` if `(x, y)` is not a point of `C`.
pub fn decode_point<C: CurveGroup>(encoded: &EncodedPoint) -> Result<C::Point> {
    let (x, y) = decode(encoded);
    let point = C::from_affine(&x, &y)?;
    trace!(curve = C::NAME, "decoded point");
    Ok(point)
}

fn fit_coordinate(bytes: &[u8]) -> Result<[u8; COORDINATE_SIZE]> {
    let significant: &[u8] = match bytes.iter().position(|&b| b != 0) {
        Some(start) => &bytes[start..],
        None => &[],
    };

    if significant.len() > COORDINATE_SIZE {
        return Err(StealthError::EncodingOverflow {
            max: COORDINATE_SIZE,
            actual: significant.len(),
        });
    }

    let mut out = [0u8; COORDINATE_SIZE];
    out[COORDINATE_SIZE - significant.len()..].copy_from_slice(significant);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::Secp256k1;
    use crate::test_curve::{ToyCurve, ToyPoint};
    use k256::elliptic_curve::bigint::U512;
    use proptest::prelude::*;

    fn to_uint(encoded: &EncodedPoint) -> U512 {
        U512::from_be_slice(encoded.as_bytes())
    }

    fn widen(coordinate: &[u8; COORDINATE_SIZE]) -> U512 {
        let mut wide = [0u8; ENCODED_POINT_SIZE];
        wide[COORDINATE_SIZE..].copy_from_slice(coordinate);
        U512::from_be_slice(&wide)
    }

    #[test]
    fn test_encode_places_x_in_high_half() {
        let encoded = encode(&[0x01], &[0x02]).unwrap();
        assert_eq!(encoded.as_bytes()[COORDINATE_SIZE - 1], 0x01);
        assert_eq!(encoded.as_bytes()[ENCODED_POINT_SIZE - 1], 0x02);
        assert_eq!(encoded.as_bytes().iter().filter(|&&b| b != 0).count(), 2);
    }

    #[test]
    fn test_encode_matches_shift_and_or() {
        let encoded = encode(&[0x01], &[0x02]).unwrap();
        let expected = U512::ONE.shl_vartime(256).wrapping_add(&U512::from_u8(2));
        assert_eq!(to_uint(&encoded), expected);
    }

    #[test]
    fn test_encode_rejects_wide_coordinate() {
        let wide = [0x01u8; COORDINATE_SIZE + 1];
        assert!(matches!(
            encode(&wide, &[0x01]),
            Err(StealthError::EncodingOverflow { max: 32, actual: 33 })
        ));
        assert!(matches!(
            encode(&[0x01], &wide),
            Err(StealthError::EncodingOverflow { .. })
        ));
    }

    #[test]
    fn test_encode_accepts_padded_coordinate() {
        // 33 bytes with a leading zero still fits in 256 bits
        let mut padded = [0u8; COORDINATE_SIZE + 1];
        padded[COORDINATE_SIZE] = 0x09;
        let encoded = encode(&padded, &padded).unwrap();
        assert_eq!(encoded.x_bytes()[COORDINATE_SIZE - 1], 0x09);
        assert_eq!(encoded.y_bytes()[COORDINATE_SIZE - 1], 0x09);
    }

    #[test]
    fn test_decode_matches_shift_and_mask() {
        let encoded = encode(&[0xAB; 32], &[0xCD; 32]).unwrap();
        let value = to_uint(&encoded);
        let high = value.shr_vartime(256);
        let low = value.wrapping_sub(&high.shl_vartime(256));

        let (x, y) = decode(&encoded);
        assert_eq!(high, widen(&x));
        assert_eq!(low, widen(&y));
    }

    #[test]
    fn test_encode_identity_fails() {
        assert!(matches!(
            encode_point::<ToyCurve>(&ToyPoint::Infinity),
            Err(StealthError::IdentityPoint)
        ));
        assert!(matches!(
            encode_point::<Secp256k1>(&k256::ProjectivePoint::IDENTITY),
            Err(StealthError::IdentityPoint)
        ));
    }

    #[test]
    fn test_decode_point_rejects_off_curve() {
        let encoded = encode(&[3], &[4]).unwrap();
        assert!(matches!(
            decode_point::<ToyCurve>(&encoded),
            Err(StealthError::InvalidPoint(_))
        ));
        assert!(matches!(
            decode_point::<Secp256k1>(&encoded),
            Err(StealthError::InvalidPoint(_))
        ));
    }

    #[test]
    fn test_toy_generator_roundtrip() {
        let encoded = encode_point::<ToyCurve>(&ToyCurve::GENERATOR).unwrap();
        assert_eq!(&encoded.x_bytes()[30..], &[0x00u8, 0x03][..]);
        assert_eq!(&encoded.y_bytes()[30..], &[0x01u8, 0x81][..]); // 385
        assert_eq!(decode_point::<ToyCurve>(&encoded).unwrap(), ToyCurve::GENERATOR);
    }

    proptest! {
        #[test]
        fn prop_decode_inverts_encode(x in any::<[u8; 32]>(), y in any::<[u8; 32]>()) {
            let encoded = encode(&x, &y).unwrap();
            prop_assert_eq!(decode(&encoded), (x, y));
        }

        #[test]
        fn prop_secp256k1_point_roundtrip(k in 1u64..u64::MAX) {
            let mut bytes = [0u8; 32];
            bytes[24..].copy_from_slice(&k.to_be_bytes());
            let scalar = Secp256k1::scalar_from_be_bytes(&bytes).unwrap();
            let point = Secp256k1::scalar_base_mult(&scalar);

            let encoded = encode_point::<Secp256k1>(&point).unwrap();
            prop_assert_eq!(decode_point::<Secp256k1>(&encoded).unwrap(), point);
        }
    }
}
