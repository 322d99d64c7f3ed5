//! Common traits for DKSAP.
//!
//! These traits define the seams where the protocol delegates to external
//! collaborators: the elliptic-curve arithmetic provider and the chain-specific
//! address rule. Both are injected so the protocol can run against a toy curve
//! in tests as well as against secp256k1.

use std::fmt;

use rand::{CryptoRng, RngCore};

use crate::constants::{COORDINATE_SIZE, ENCODED_POINT_SIZE, SCALAR_SIZE};
use crate::error::Result;

// ═══════════════════════════════════════════════════════════════════════════════
// CURVE ARITHMETIC
// ═══════════════════════════════════════════════════════════════════════════════

/// Affine coordinates of a curve point, big-endian, fixed width.
pub type AffineCoordinates = ([u8; COORDINATE_SIZE], [u8; COORDINATE_SIZE]);

/// Interface to a prime-order elliptic curve group.
///
/// Implementations delegate to a vetted arithmetic library; nothing here
/// re-derives modular arithmetic. Scalars handed out by an implementation are
/// always reduced modulo the group order `N`.
pub trait CurveGroup: Send + Sync + 'static {
    /// Element of the scalar field `Z/NZ`.
    type Scalar: Clone + PartialEq + fmt::Debug + Send + Sync;
    /// Group element, including the point at infinity.
    type Point: Clone + PartialEq + fmt::Debug + Send + Sync;

    /// Human-readable curve name for logs.
    const NAME: &'static str;

    /// Parses a big-endian scalar, rejecting zero and values `>= N`.
    ///
    /// # Errors
    /// Returns `InvalidScalar`; out-of-range input is never clamped or reduced.
    fn scalar_from_be_bytes(bytes: &[u8; SCALAR_SIZE]) -> Result<Self::Scalar>;

    /// Serializes a scalar as 32 big-endian bytes.
    fn scalar_to_be_bytes(scalar: &Self::Scalar) -> [u8; SCALAR_SIZE];

    /// Samples a uniformly random nonzero scalar.
    fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> Self::Scalar;

    /// Returns `a + b mod N`.
    fn scalar_add(a: &Self::Scalar, b: &Self::Scalar) -> Self::Scalar;

    /// Reduces a 512-bit big-endian integer modulo `N`.
    fn reduce_wide(bytes: &[u8; ENCODED_POINT_SIZE]) -> Self::Scalar;

    /// Returns `G·k`.
    fn scalar_base_mult(k: &Self::Scalar) -> Self::Point;

    /// Returns `point·k`.
    fn scalar_mult(point: &Self::Point, k: &Self::Scalar) -> Self::Point;

    /// Returns `p + q`.
    fn point_add(p: &Self::Point, q: &Self::Point) -> Self::Point;

    /// Returns the affine coordinates, or `None` for the point at infinity.
    fn to_affine(point: &Self::Point) -> Option<AffineCoordinates>;

    /// Builds a point from affine coordinates.
    ///
    /// # Errors
    /// Returns `InvalidPoint` if `(x, y)` is not on the curve.
    fn from_affine(x: &[u8; COORDINATE_SIZE], y: &[u8; COORDINATE_SIZE]) -> Result<Self::Point>;
}

// ═══════════════════════════════════════════════════════════════════════════════
// ADDRESS DERIVATION
// ═══════════════════════════════════════════════════════════════════════════════

/// A chain-specific rule turning a public key into an address.
///
/// The rule sees only the affine coordinates, so it is independent of the
/// curve backend.
pub trait AddressScheme: Send + Sync {
    /// The address produced by this scheme.
    type Address: Clone + PartialEq + fmt::Debug;

    /// Short name of the scheme (e.g. `"ethereum"`).
    fn name(&self) -> &'static str;

    /// Derives the address of the public key `(x, y)`.
    fn address_of(&self, x: &[u8; COORDINATE_SIZE], y: &[u8; COORDINATE_SIZE]) -> Self::Address;
}
