//! # DKSAP Core
//!
//! Core types, errors, and traits for the dual-key stealth address protocol.
//!
//! This crate provides the foundational building blocks used by all other DKSAP crates:
//!
//! - **Types**: Wire types for secret keys, encoded points, addresses, and announcements
//! - **Errors**: The protocol error taxonomy
//! - **Constants**: Field widths, domain separators, and address sizes
//! - **Traits**: The curve-arithmetic capability and chain address schemes
//!
//! ## Example
//!
//! ```rust
//! use dksap_core::{MetaAddress, EncodedPoint};
//!
//! // Meta-addresses are the 512-bit integer `x << 256 | y`, published as hex
//! let mut bytes = [0u8; 64];
//! bytes[31] = 1;
//! bytes[63] = 2;
//! let meta = MetaAddress::new(EncodedPoint::from_array(bytes));
//! let json = serde_json::to_string(&meta).unwrap();
//! assert!(json.contains("01"));
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{Result, StealthError};
pub use traits::*;
pub use types::*;
