//! Stealth key and address derivation.
//!
//! Each protocol step is a stateless function over its inputs, generic over
//! the curve backend.
//!
//! ## Derivation Flow
//!
//! ```text
//! Recipient                         Sender
//! ─────────                         ──────
//! m ← random
//! M = G·m  ── meta-address ──────►  r ← random
//!                                   R = G·r
//!          ◄────── announcement ──  S = M·r
//! S = R·m                           h = hash(S)
//! h = hash(S)                       P = M + G·h
//! p = m + h mod N                   address = addressOf(P)
//! assert G·p == P
//! ```

use tracing::debug;
use zeroize::Zeroize;

use dksap_core::error::{Result, StealthError};
use dksap_core::traits::{AddressScheme, CurveGroup};
use dksap_core::types::{EphemeralPublicKey, HashToScalar, MetaAddress, StealthPublicKey};

use crate::codec::encode_point;
use crate::hash::hash_to_scalar;

// ═══════════════════════════════════════════════════════════════════════════════
// PUBLICATION
// ═══════════════════════════════════════════════════════════════════════════════

/// Computes the recipient's public point `M = G·m`.
pub fn meta_public_point<C: CurveGroup>(m: &C::Scalar) -> C::Point {
    C::scalar_base_mult(m)
}

/// Computes and encodes the meta-address `encode(G·m)`.
///
/// # Errors
/// Returns `IdentityPoint` only if the backend hands out a zero scalar.
pub fn generate_meta_address<C: CurveGroup>(m: &C::Scalar) -> Result<MetaAddress> {
    let encoded = encode_point::<C>(&meta_public_point::<C>(m))?;
    debug!(curve = C::NAME, "generated meta-address");
    Ok(MetaAddress::new(encoded))
}

/// Computes the sender's ephemeral public point `R = G·r`.
///
/// `r` must be fresh for every payment. Reusing it against the same
/// meta-address reproduces the same stealth address.
pub fn publish_ephemeral<C: CurveGroup>(r: &C::Scalar) -> C::Point {
    C::scalar_base_mult(r)
}

/// Computes and encodes `R = G·r` for publication.
pub fn ephemeral_public_key<C: CurveGroup>(r: &C::Scalar) -> Result<EphemeralPublicKey> {
    encode_point::<C>(&publish_ephemeral::<C>(r)).map(EphemeralPublicKey)
}

// ═══════════════════════════════════════════════════════════════════════════════
// SHARED SECRET
// ═══════════════════════════════════════════════════════════════════════════════

/// Sender side of the ECDH agreement: `S = M·r`.
pub fn sender_shared_secret<C: CurveGroup>(meta: &C::Point, r: &C::Scalar) -> C::Point {
    C::scalar_mult(meta, r)
}

/// Recipient side of the ECDH agreement: `S = R·m`.
///
/// Equals [`sender_shared_secret`] for the matching `(m, r)` pair.
pub fn recipient_shared_secret<C: CurveGroup>(ephemeral: &C::Point, m: &C::Scalar) -> C::Point {
    C::scalar_mult(ephemeral, m)
}

// ═══════════════════════════════════════════════════════════════════════════════
// ONE-TIME KEYS
// ═══════════════════════════════════════════════════════════════════════════════

/// Derives the stealth public key `P = M + G·hash(S)`.
///
/// Computable by anyone holding `M` and `S`.
///
/// # Errors
/// Returns `IdentityPoint` if `shared` is the point at infinity.
pub fn derive_stealth_public_key<C: CurveGroup>(
    meta: &C::Point,
    shared: &C::Point,
    strategy: HashToScalar,
) -> Result<C::Point> {
    let h = hash_to_scalar::<C>(shared, strategy)?;
    let stealth = C::point_add(meta, &C::scalar_base_mult(&h));
    debug!(curve = C::NAME, %strategy, "derived stealth public key");
    Ok(stealth)
}

/// Encodes a stealth public key for the wire.
pub fn encode_stealth_public_key<C: CurveGroup>(point: &C::Point) -> Result<StealthPublicKey> {
    encode_point::<C>(point).map(StealthPublicKey)
}

/// Derives the chain address of a stealth public key with `scheme`.
///
/// # Errors
/// Returns `IdentityPoint` if `stealth` is the point at infinity.
pub fn derive_stealth_address<C: CurveGroup, A: AddressScheme>(
    stealth: &C::Point,
    scheme: &A,
) -> Result<A::Address> {
    let (x, y) = C::to_affine(stealth).ok_or(StealthError::IdentityPoint)?;
    debug!(curve = C::NAME, scheme = scheme.name(), "derived stealth address");
    Ok(scheme.address_of(&x, &y))
}

/// Derives the stealth private key `p = m + hash(S) mod N`.
///
/// Only the recipient can compute this; it requires `m`.
///
/// # Errors
/// - `IdentityPoint` if `shared` is the point at infinity.
/// - `InvalidScalar` if `m + hash(S) ≡ 0 (mod N)`.
pub fn recipient_derive_private_key<C: CurveGroup>(
    m: &C::Scalar,
    shared: &C::Point,
    strategy: HashToScalar,
) -> Result<C::Scalar> {
    let h = hash_to_scalar::<C>(shared, strategy)?;
    let p = C::scalar_add(m, &h);

    let mut p_bytes = C::scalar_to_be_bytes(&p);
    let mut m_bytes = C::scalar_to_be_bytes(m);
    let is_zero = p_bytes.iter().all(|&b| b == 0);
    // h < N, so the sum wrapped exactly when the result fell below m
    let wrapped = p_bytes < m_bytes;
    p_bytes.zeroize();
    m_bytes.zeroize();

    if is_zero {
        return Err(StealthError::InvalidScalar(
            "derived private key is zero".into(),
        ));
    }
    if wrapped {
        debug!(curve = C::NAME, "private key sum wrapped modulo group order");
    }

    debug!(curve = C::NAME, %strategy, "derived stealth private key");
    Ok(p)
}
