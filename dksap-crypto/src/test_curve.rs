//! A tiny prime-order curve for exercising the protocol by hand.
//!
//! `y² = x³ + 7` over `F_1051` has 1093 points, a prime, so every non-identity
//! point generates the group. Numbers stay small enough to check on paper.

use rand::{CryptoRng, RngCore};

use dksap_core::constants::{COORDINATE_SIZE, ENCODED_POINT_SIZE, SCALAR_SIZE};
use dksap_core::error::{Result, StealthError};
use dksap_core::traits::{AffineCoordinates, CurveGroup};

const FIELD_PRIME: u64 = 1051;
const ORDER: u64 = 1093;
const B: u64 = 7;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct ToyCurve;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ToyScalar(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ToyPoint {
    Infinity,
    Affine(u64, u64),
}

impl ToyCurve {
    pub(crate) const GENERATOR: ToyPoint = ToyPoint::Affine(3, 385);

    pub(crate) fn scalar(value: u64) -> ToyScalar {
        ToyScalar(value % ORDER)
    }
}

fn pow_mod(mut base: u64, mut exp: u64, modulus: u64) -> u64 {
    let mut acc = 1;
    base %= modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            acc = acc * base % modulus;
        }
        base = base * base % modulus;
        exp >>= 1;
    }
    acc
}

fn inv(a: u64) -> u64 {
    pow_mod(a, FIELD_PRIME - 2, FIELD_PRIME)
}

fn add(p: ToyPoint, q: ToyPoint) -> ToyPoint {
    let (x1, y1, x2, y2) = match (p, q) {
        (ToyPoint::Infinity, other) | (other, ToyPoint::Infinity) => return other,
        (ToyPoint::Affine(x1, y1), ToyPoint::Affine(x2, y2)) => (x1, y1, x2, y2),
    };

    if x1 == x2 && (y1 + y2) % FIELD_PRIME == 0 {
        return ToyPoint::Infinity;
    }

    let lambda = if x1 == x2 {
        3 * x1 % FIELD_PRIME * x1 % FIELD_PRIME * inv(2 * y1 % FIELD_PRIME) % FIELD_PRIME
    } else {
        (y2 + FIELD_PRIME - y1) % FIELD_PRIME * inv((x2 + FIELD_PRIME - x1) % FIELD_PRIME) % FIELD_PRIME
    };

    let x3 = (lambda * lambda % FIELD_PRIME + 2 * FIELD_PRIME - x1 - x2) % FIELD_PRIME;
    let y3 = (lambda * ((x1 + FIELD_PRIME - x3) % FIELD_PRIME) % FIELD_PRIME + FIELD_PRIME - y1)
        % FIELD_PRIME;
    ToyPoint::Affine(x3, y3)
}

fn mul(point: ToyPoint, mut k: u64) -> ToyPoint {
    let mut acc = ToyPoint::Infinity;
    let mut base = point;
    while k > 0 {
        if k & 1 == 1 {
            acc = add(acc, base);
        }
        base = add(base, base);
        k >>= 1;
    }
    acc
}

fn to_be32(value: u64) -> [u8; COORDINATE_SIZE] {
    let mut out = [0u8; COORDINATE_SIZE];
    out[COORDINATE_SIZE - 8..].copy_from_slice(&value.to_be_bytes());
    out
}

fn from_be32(bytes: &[u8; COORDINATE_SIZE]) -> Option<u64> {
    if bytes[..COORDINATE_SIZE - 8].iter().any(|&b| b != 0) {
        return None;
    }
    let mut low = [0u8; 8];
    low.copy_from_slice(&bytes[COORDINATE_SIZE - 8..]);
    Some(u64::from_be_bytes(low))
}

impl CurveGroup for ToyCurve {
    type Scalar = ToyScalar;
    type Point = ToyPoint;

    const NAME: &'static str = "toy-1051";

    fn scalar_from_be_bytes(bytes: &[u8; SCALAR_SIZE]) -> Result<ToyScalar> {
        match from_be32(bytes) {
            Some(v) if v != 0 && v < ORDER => Ok(ToyScalar(v)),
            _ => Err(StealthError::InvalidScalar("scalar out of range".into())),
        }
    }

    fn scalar_to_be_bytes(scalar: &ToyScalar) -> [u8; SCALAR_SIZE] {
        to_be32(scalar.0)
    }

    fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> ToyScalar {
        ToyScalar(rng.next_u64() % (ORDER - 1) + 1)
    }

    fn scalar_add(a: &ToyScalar, b: &ToyScalar) -> ToyScalar {
        ToyScalar((a.0 + b.0) % ORDER)
    }

    fn reduce_wide(bytes: &[u8; ENCODED_POINT_SIZE]) -> ToyScalar {
        ToyScalar(bytes.iter().fold(0u64, |acc, &b| (acc * 256 + u64::from(b)) % ORDER))
    }

    fn scalar_base_mult(k: &ToyScalar) -> ToyPoint {
        mul(Self::GENERATOR, k.0)
    }

    fn scalar_mult(point: &ToyPoint, k: &ToyScalar) -> ToyPoint {
        mul(*point, k.0)
    }

    fn point_add(p: &ToyPoint, q: &ToyPoint) -> ToyPoint {
        add(*p, *q)
    }

    fn to_affine(point: &ToyPoint) -> Option<AffineCoordinates> {
        match point {
            ToyPoint::Infinity => None,
            ToyPoint::Affine(x, y) => Some((to_be32(*x), to_be32(*y))),
        }
    }

    fn from_affine(x: &[u8; COORDINATE_SIZE], y: &[u8; COORDINATE_SIZE]) -> Result<ToyPoint> {
        let off_curve = || StealthError::InvalidPoint("coordinates are not on the toy curve".into());
        let (x, y) = match (from_be32(x), from_be32(y)) {
            (Some(x), Some(y)) if x < FIELD_PRIME && y < FIELD_PRIME => (x, y),
            _ => return Err(off_curve()),
        };

        if y * y % FIELD_PRIME != (pow_mod(x, 3, FIELD_PRIME) + B) % FIELD_PRIME {
            return Err(off_curve());
        }
        Ok(ToyPoint::Affine(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_has_prime_order() {
        assert_eq!(mul(ToyCurve::GENERATOR, ORDER), ToyPoint::Infinity);
        assert_ne!(mul(ToyCurve::GENERATOR, ORDER - 1), ToyPoint::Infinity);
    }

    #[test]
    fn test_hand_checked_multiples() {
        assert_eq!(ToyCurve::scalar_base_mult(&ToyScalar(123)), ToyPoint::Affine(805, 391));
        assert_eq!(ToyCurve::scalar_base_mult(&ToyScalar(456)), ToyPoint::Affine(1005, 272));
    }

    #[test]
    fn test_doubling_matches_addition_chain() {
        let g = ToyCurve::GENERATOR;
        assert_eq!(add(g, g), mul(g, 2));
        assert_eq!(add(add(g, g), g), mul(g, 3));
    }
}
