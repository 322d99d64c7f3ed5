//! Stealth payment creation (sender side).

use rand::rngs::OsRng;
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::{debug, instrument, warn};
use zeroize::Zeroizing;

use dksap_core::error::{Result, StealthError};
use dksap_core::types::{
    AddressFormat, Announcement, EphemeralSecretKey, HashToScalar, MetaAddress, StealthAddress,
    StealthPublicKey,
};
use dksap_crypto::derive::{
    derive_stealth_public_key, encode_stealth_public_key, ephemeral_public_key,
    sender_shared_secret,
};
use dksap_crypto::{address_for_format, decode_point, generate_secret_key, scalar_from_secret, Secp256k1};

use crate::config::ProtocolConfig;

/// Stealth payment: address to send to and announcement to publish.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StealthPayment {
    /// The one-time address to send funds to
    pub stealth_address: StealthAddress,
    /// The one-time public key `P` behind the address
    pub stealth_public_key: StealthPublicKey,
    /// The announcement to publish (ephemeral key + stealth address)
    pub announcement: Announcement,
    /// Parameters the recipient needs to recover the key
    pub config: ProtocolConfig,
    /// Metadata about the payment
    #[serde(default)]
    pub metadata: PaymentMetadata,
}

/// Metadata about a stealth payment.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMetadata {
    /// Payment amount (informational only)
    pub amount: Option<String>,
    /// Payment token (e.g., "ETH", "SUI")
    pub token: Option<String>,
    /// Optional memo (not stored on-chain)
    pub memo: Option<String>,
}

/// Creates a stealth payment with a fresh ephemeral key from the OS RNG.
///
/// # Example
///
/// ```rust,ignore
/// use dksap_stealth::{create_stealth_payment, ProtocolConfig};
///
/// let payment = create_stealth_payment(&meta_address, &ProtocolConfig::default())?;
/// // Send funds to payment.stealth_address
/// // Publish payment.announcement
/// ```
pub fn create_stealth_payment(
    meta_address: &MetaAddress,
    config: &ProtocolConfig,
) -> Result<StealthPayment> {
    let ephemeral_secret = generate_secret_key::<Secp256k1, _>(&mut OsRng);
    create_stealth_payment_with_ephemeral(meta_address, &ephemeral_secret, config)
}

/// Creates a stealth payment with a caller-supplied ephemeral secret `r`.
///
/// `r` must never be reused: the same `(M, r)` always yields the same
/// stealth address.
///
/// # Errors
/// - `InvalidMetaAddress` / `InvalidPoint` if the meta-address is malformed.
/// - `InvalidScalar` if `r` is zero or not below the group order.
#[instrument(skip_all, fields(format = %config.address_format, hash = %config.hash_to_scalar))]
pub fn create_stealth_payment_with_ephemeral(
    meta_address: &MetaAddress,
    ephemeral_secret: &EphemeralSecretKey,
    config: &ProtocolConfig,
) -> Result<StealthPayment> {
    meta_address.validate()?;
    let meta = decode_point::<Secp256k1>(meta_address.encoded())?;
    let r = Zeroizing::new(scalar_from_secret::<Secp256k1>(ephemeral_secret)?);

    let ephemeral_key = ephemeral_public_key::<Secp256k1>(&r)?;
    let shared = sender_shared_secret::<Secp256k1>(&meta, &r);
    let stealth = derive_stealth_public_key::<Secp256k1>(&meta, &shared, config.hash_to_scalar)?;
    let stealth_public_key = encode_stealth_public_key::<Secp256k1>(&stealth)?;

    let stealth_address = address_for_format(
        config.address_format,
        &stealth_public_key.encoded().x_bytes(),
        &stealth_public_key.encoded().y_bytes(),
    );
    debug!(address = %stealth_address, "created stealth payment");

    Ok(StealthPayment {
        stealth_address,
        stealth_public_key,
        announcement: Announcement::new(ephemeral_key, stealth_address),
        config: *config,
        metadata: PaymentMetadata::default(),
    })
}

/// Builder for stealth payments with metadata and explicit parameters.
#[derive(Default)]
pub struct StealthPaymentBuilder {
    meta_address: Option<MetaAddress>,
    ephemeral_secret: Option<EphemeralSecretKey>,
    config: ProtocolConfig,
    amount: Option<String>,
    token: Option<String>,
    memo: Option<String>,
}

impl StealthPaymentBuilder {
    /// Creates an empty builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the recipient's meta-address (required).
    pub fn recipient(mut self, meta_address: MetaAddress) -> Self {
        self.meta_address = Some(meta_address);
        self
    }

    /// Uses a fixed ephemeral secret instead of a random one.
    pub fn ephemeral_secret(mut self, secret: EphemeralSecretKey) -> Self {
        self.ephemeral_secret = Some(secret);
        self
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ProtocolConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the hash-to-scalar strategy.
    pub fn hash_to_scalar(mut self, strategy: HashToScalar) -> Self {
        self.config.hash_to_scalar = strategy;
        self
    }

    /// Sets the address format.
    pub fn address_format(mut self, format: AddressFormat) -> Self {
        self.config.address_format = format;
        self
    }

    /// Sets the informational amount.
    pub fn amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = Some(amount.into());
        self
    }

    /// Sets the informational token symbol.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sets an off-chain memo.
    pub fn memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = Some(memo.into());
        self
    }

    /// Builds the payment.
    ///
    /// # Errors
    /// Returns `ValidationError` if no recipient was set, plus any error of
    /// [`create_stealth_payment_with_ephemeral`].
    pub fn build(self) -> Result<StealthPayment> {
        let meta_address = self.meta_address.ok_or_else(|| {
            StealthError::ValidationError("recipient meta-address is required".into())
        })?;

        let mut payment = match &self.ephemeral_secret {
            Some(secret) => create_stealth_payment_with_ephemeral(&meta_address, secret, &self.config)?,
            None => create_stealth_payment(&meta_address, &self.config)?,
        };

        payment.metadata = PaymentMetadata {
            amount: self.amount,
            token: self.token,
            memo: self.memo,
        };
        Ok(payment)
    }
}

/// Sender-side self-check of a payment.
///
/// Re-derives the payment from `meta_address` and the ephemeral secret it was
/// created with, using the payment's own configuration.
///
/// # Returns
///
/// `Ok(true)` if the ephemeral key, stealth key, and address all match,
/// `Ok(false)` if any of them differs.
#[instrument(skip_all)]
pub fn verify_payment(
    payment: &StealthPayment,
    meta_address: &MetaAddress,
    ephemeral_secret: &EphemeralSecretKey,
) -> Result<bool> {
    payment.announcement.validate()?;

    let expected = create_stealth_payment_with_ephemeral(meta_address, ephemeral_secret, &payment.config)?;

    let matches = expected
        .announcement
        .ephemeral_key
        .encoded()
        .as_bytes()
        .ct_eq(payment.announcement.ephemeral_key.encoded().as_bytes())
        & expected
            .stealth_public_key
            .encoded()
            .as_bytes()
            .ct_eq(payment.stealth_public_key.encoded().as_bytes())
        & expected
            .stealth_address
            .as_bytes()
            .ct_eq(payment.stealth_address.as_bytes())
        & expected
            .stealth_address
            .as_bytes()
            .ct_eq(payment.announcement.stealth_address.as_bytes());

    let ok = bool::from(matches);
    if !ok {
        warn!("stealth payment does not match its ephemeral secret");
    }
    Ok(ok)
}
