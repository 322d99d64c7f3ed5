//! # DKSAP Stealth Payments
//!
//! High-level API for sending to and receiving at stealth addresses on
//! secp256k1.
//!
//! This crate provides:
//!
//! - **Wallet**: holds the meta secret, publishes the meta-address, recovers one-time keys
//! - **Payment**: sender-side creation of stealth payments and announcements
//! - **Config**: the parameters both sides must agree on
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use dksap_stealth::{StealthWallet, create_stealth_payment, ProtocolConfig};
//!
//! // Recipient: generate a wallet and publish the meta-address
//! let wallet = StealthWallet::generate()?;
//! let meta_address = wallet.meta_address();
//!
//! // Sender: create a stealth payment
//! let payment = create_stealth_payment(meta_address, &ProtocolConfig::default())?;
//! // Send funds to payment.stealth_address
//! // Publish payment.announcement
//!
//! // Recipient: recover the spending key
//! if let Some(key) = wallet.recover(&payment.announcement)? {
//!     println!("Found payment at: {}", key.address);
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

pub mod config;
pub mod payment;
pub mod wallet;

pub use config::ProtocolConfig;
pub use payment::{
    create_stealth_payment, create_stealth_payment_with_ephemeral, verify_payment,
    PaymentMetadata, StealthPayment, StealthPaymentBuilder,
};
pub use wallet::{RecoveredKey, RecoveredKeyExport, StealthWallet};
