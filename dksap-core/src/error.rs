//! Error types for DKSAP.
//!
//! This module provides the protocol error hierarchy using `thiserror`.
//! Every operation is deterministic, so none of these errors is retryable:
//! the same input always fails the same way.

use thiserror::Error;

/// Result type alias using `StealthError`.
pub type Result<T> = std::result::Result<T, StealthError>;

/// Main error type for all DKSAP operations.
#[derive(Debug, Error)]
pub enum StealthError {
    // ═══════════════════════════════════════════════════════════════════════════
    // CRYPTOGRAPHIC ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// A secret or ephemeral scalar is zero, not below the group order, or too wide.
    #[error("Invalid scalar: {0}")]
    InvalidScalar(String),

    /// An algebraic invariant of the protocol does not hold.
    ///
    /// Raised when the two shared secrets differ, when `G·p != P`, or when a
    /// recovered address differs from the announced one. Always indicates a
    /// mismatched `m`/`r`/`M`/`R` pairing or a broken implementation.
    #[error("Point mismatch: {0}")]
    PointMismatch(String),

    /// A coordinate does not fit the fixed field width of the point encoding.
    #[error("Encoding overflow: coordinate needs {actual} bytes, at most {max} allowed")]
    EncodingOverflow {
        /// Maximum number of bytes the encoding allows
        max: usize,
        /// Number of significant bytes supplied
        actual: usize,
    },

    /// Coordinates do not describe a point on the curve.
    #[error("Invalid curve point: {0}")]
    InvalidPoint(String),

    /// The point at infinity has no affine encoding.
    #[error("Point at infinity cannot be encoded")]
    IdentityPoint,

    // ═══════════════════════════════════════════════════════════════════════════
    // STEALTH ADDRESS ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Invalid meta-address format or content.
    #[error("Invalid meta-address: {0}")]
    InvalidMetaAddress(String),

    /// Invalid stealth address format.
    #[error("Invalid stealth address: {0}")]
    InvalidStealthAddress(String),

    /// Invalid announcement content.
    #[error("Invalid announcement: {0}")]
    InvalidAnnouncement(String),

    // ═══════════════════════════════════════════════════════════════════════════
    // SERIALIZATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Invalid hex encoding.
    #[error("Invalid hex encoding: {0}")]
    HexError(#[from] hex::FromHexError),

    /// File I/O error.
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    // ═══════════════════════════════════════════════════════════════════════════
    // VALIDATION ERRORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Input validation failed.
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl StealthError {
    /// Returns true if this is a cryptographic error.
    pub fn is_crypto_error(&self) -> bool {
        matches!(
            self,
            StealthError::InvalidScalar(_)
                | StealthError::PointMismatch(_)
                | StealthError::EncodingOverflow { .. }
                | StealthError::InvalidPoint(_)
                | StealthError::IdentityPoint
        )
    }

    /// Returns true if this is a validation error.
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            StealthError::ValidationError(_)
                | StealthError::InvalidScalar(_)
                | StealthError::InvalidMetaAddress(_)
                | StealthError::InvalidStealthAddress(_)
                | StealthError::InvalidAnnouncement(_)
        )
    }

    /// Returns true if this error means a cryptographic guarantee is broken.
    ///
    /// Callers must stop using the keys involved rather than carry on.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            StealthError::PointMismatch(_) | StealthError::EncodingOverflow { .. }
        )
    }
}
