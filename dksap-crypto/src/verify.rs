//! Key-pair verification.
//!
//! `G·p == P` is the end-to-end oracle of the protocol: if it fails, the
//! `(m, r, R, M)` inputs were mismatched or a step was computed with a
//! different hash-to-scalar strategy. Callers must treat a failure as fatal.

use subtle::{Choice, ConstantTimeEq};
use tracing::warn;

use dksap_core::error::{Result, StealthError};
use dksap_core::traits::CurveGroup;

/// Compares two points by their affine coordinates in constant time.
///
/// Two points at infinity are equal; infinity never equals an affine point.
pub fn points_equal<C: CurveGroup>(a: &C::Point, b: &C::Point) -> bool {
    match (C::to_affine(a), C::to_affine(b)) {
        (Some((ax, ay)), Some((bx, by))) => {
            let eq: Choice = ax[..].ct_eq(&bx[..]) & ay[..].ct_eq(&by[..]);
            eq.into()
        }
        (None, None) => true,
        _ => false,
    }
}

/// Returns true if `G·p == P`.
pub fn verify_key_pair<C: CurveGroup>(p: &C::Scalar, stealth: &C::Point) -> bool {
    points_equal::<C>(&C::scalar_base_mult(p), stealth)
}

/// Checks `G·p == P`.
///
/// # Errors
/// Returns `PointMismatch` if the private key does not control `stealth`.
pub fn assert_consistent<C: CurveGroup>(p: &C::Scalar, stealth: &C::Point) -> Result<()> {
    if verify_key_pair::<C>(p, stealth) {
        return Ok(());
    }

    warn!(curve = C::NAME, "derived private key does not match stealth public key");
    Err(StealthError::PointMismatch(
        "G·p does not equal the stealth public key".into(),
    ))
}

/// Checks that both sides of the ECDH agreement produced the same point.
///
/// # Errors
/// Returns `PointMismatch` if the shared secrets differ.
pub fn assert_shared_secrets_agree<C: CurveGroup>(
    sender: &C::Point,
    recipient: &C::Point,
) -> Result<()> {
    if points_equal::<C>(sender, recipient) {
        return Ok(());
    }

    warn!(curve = C::NAME, "sender and recipient shared secrets differ");
    Err(StealthError::PointMismatch(
        "sender and recipient shared secrets differ".into(),
    ))
}
