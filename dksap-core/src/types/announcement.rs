//! Announcement published alongside a stealth payment.
//!
//! The sender publishes the ephemeral public key `R` next to the transaction
//! so the recipient can recompute the shared secret. The stealth address is
//! included so the recipient can confirm the payment is theirs.

use serde::{Deserialize, Serialize};

use super::{EphemeralPublicKey, StealthAddress};
use crate::error::{Result, StealthError};

/// Data a sender publishes with a stealth payment.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    /// Ephemeral public key `R = G·r`
    pub ephemeral_key: EphemeralPublicKey,
    /// One-time address the funds were sent to
    pub stealth_address: StealthAddress,
    /// Unix timestamp when the announcement was created
    pub timestamp: u64,
}

impl Announcement {
    /// Creates a new announcement stamped with the current time.
    pub fn new(ephemeral_key: EphemeralPublicKey, stealth_address: StealthAddress) -> Self {
        Self {
            ephemeral_key,
            stealth_address,
            timestamp: Self::current_timestamp(),
        }
    }

    /// Validates the announcement structure.
    pub fn validate(&self) -> Result<()> {
        if self.ephemeral_key.encoded().is_zero() {
            return Err(StealthError::InvalidAnnouncement(
                "ephemeral key is zero".into(),
            ));
        }

        if self.stealth_address.is_zero() {
            return Err(StealthError::InvalidAnnouncement(
                "stealth address is the zero address".into(),
            ));
        }

        // Not in the future by more than 1 hour
        let now = Self::current_timestamp();
        if self.timestamp > now + 3600 {
            return Err(StealthError::InvalidAnnouncement(
                "timestamp is too far in the future".into(),
            ));
        }

        Ok(())
    }

    /// Serializes to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Deserializes from JSON and validates.
    pub fn from_json(s: &str) -> Result<Self> {
        let announcement: Self = serde_json::from_str(s)?;
        announcement.validate()?;
        Ok(announcement)
    }

    fn current_timestamp() -> u64 {
        chrono::Utc::now().timestamp().max(0) as u64
    }
}
