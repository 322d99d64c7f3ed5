//! DKSAP wallet implementation.
//!
//! The wallet holds the recipient's meta secret `m` and provides the
//! recipient-side operations: publishing the meta-address and recovering the
//! one-time spending key for an announced payment.

use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use subtle::ConstantTimeEq;
use tracing::{debug, instrument};
use zeroize::{ZeroizeOnDrop, Zeroizing};

use dksap_core::error::{Result, StealthError};
use dksap_core::types::{
    Announcement, EphemeralPublicKey, MetaAddress, MetaSecretKey, StealthAddress,
    StealthPrivateKey, StealthPublicKey,
};
use dksap_crypto::derive::{
    derive_stealth_public_key, encode_stealth_public_key, generate_meta_address,
    meta_public_point, recipient_derive_private_key, recipient_shared_secret,
};
use dksap_crypto::{
    address_for_format, assert_consistent, decode_point, generate_secret_key, scalar_from_secret,
    secret_from_scalar, Secp256k1,
};

use crate::config::ProtocolConfig;

/// A DKSAP wallet containing the key for receiving stealth payments.
#[derive(ZeroizeOnDrop)]
pub struct StealthWallet {
    /// The meta secret `m`
    meta_secret: MetaSecretKey,
    /// Cached meta-address `encode(G·m)`
    #[zeroize(skip)]
    meta_address: MetaAddress,
    /// Protocol parameters used for recovery
    #[zeroize(skip)]
    config: ProtocolConfig,
}

impl StealthWallet {
    /// Generates a new wallet with a random meta secret from the OS RNG.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use dksap_stealth::StealthWallet;
    ///
    /// let wallet = StealthWallet::generate()?;
    /// println!("Meta-address: {}", wallet.meta_address().to_hex());
    /// ```
    pub fn generate() -> Result<Self> {
        Self::generate_with_rng(&mut OsRng)
    }

    /// Generates a new wallet from the given RNG.
    pub fn generate_with_rng<R: RngCore + CryptoRng>(rng: &mut R) -> Result<Self> {
        Self::from_secret_key(generate_secret_key::<Secp256k1, _>(rng))
    }

    /// Creates a wallet from an existing meta secret.
    ///
    /// # Errors
    /// Returns `InvalidScalar` if the key is zero or not below the group order.
    pub fn from_secret_key(meta_secret: MetaSecretKey) -> Result<Self> {
        let m = Zeroizing::new(scalar_from_secret::<Secp256k1>(&meta_secret)?);
        let meta_address = generate_meta_address::<Secp256k1>(&m)?;

        Ok(Self {
            meta_secret,
            meta_address,
            config: ProtocolConfig::default(),
        })
    }

    /// Replaces the protocol configuration.
    pub fn with_config(mut self, config: ProtocolConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the meta-address for publishing.
    pub fn meta_address(&self) -> &MetaAddress {
        &self.meta_address
    }

    /// Returns the protocol configuration.
    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    /// Returns the meta secret.
    ///
    /// # Security
    /// Intended for explicit backup only.
    pub fn meta_secret(&self) -> &MetaSecretKey {
        &self.meta_secret
    }

    /// Derives the one-time key pair for an ephemeral public key.
    ///
    /// Always succeeds for a valid `R`, whether or not the payment was meant
    /// for this wallet; use [`recover`](Self::recover) to check ownership.
    ///
    /// # Errors
    /// - `InvalidPoint` if `R` is not on secp256k1.
    /// - `PointMismatch` if the derived key fails the `G·p == P` check.
    #[instrument(skip_all, fields(format = %self.config.address_format))]
    pub fn recover_from_ephemeral(&self, ephemeral: &EphemeralPublicKey) -> Result<RecoveredKey> {
        let strategy = self.config.hash_to_scalar;
        let m = Zeroizing::new(scalar_from_secret::<Secp256k1>(&self.meta_secret)?);
        let r_point = decode_point::<Secp256k1>(ephemeral.encoded())?;

        let shared = recipient_shared_secret::<Secp256k1>(&r_point, &m);
        let meta = meta_public_point::<Secp256k1>(&m);
        let stealth = derive_stealth_public_key::<Secp256k1>(&meta, &shared, strategy)?;
        let p = Zeroizing::new(recipient_derive_private_key::<Secp256k1>(&m, &shared, strategy)?);
        assert_consistent::<Secp256k1>(&p, &stealth)?;

        let public_key = encode_stealth_public_key::<Secp256k1>(&stealth)?;
        let address = address_for_format(
            self.config.address_format,
            &public_key.encoded().x_bytes(),
            &public_key.encoded().y_bytes(),
        );

        debug!(%address, "recovered stealth key");
        Ok(RecoveredKey {
            address,
            public_key,
            private_key: secret_from_scalar::<Secp256k1>(&p),
        })
    }

    /// Recovers the spending key for an announcement addressed to this wallet.
    ///
    /// # Returns
    ///
    /// `Ok(Some(key))` if the announced address is ours,
    /// `Ok(None)` if it belongs to someone else.
    ///
    /// # Errors
    /// Fails if the announcement is malformed or uses a different address
    /// format than this wallet.
    #[instrument(skip_all)]
    pub fn recover(&self, announcement: &Announcement) -> Result<Option<RecoveredKey>> {
        announcement.validate()?;

        let announced = announcement.stealth_address;
        if announced.format() != self.config.address_format {
            return Err(StealthError::InvalidAnnouncement(format!(
                "announcement uses {} addresses, wallet is configured for {}",
                announced.format(),
                self.config.address_format
            )));
        }

        let recovered = self.recover_from_ephemeral(&announcement.ephemeral_key)?;
        if !bool::from(recovered.address.as_bytes().ct_eq(announced.as_bytes())) {
            debug!("announcement is not addressed to this wallet");
            return Ok(None);
        }

        Ok(Some(recovered))
    }
}

impl std::fmt::Debug for StealthWallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StealthWallet")
            .field("meta_address", &self.meta_address)
            .field("config", &self.config)
            .field("meta_secret", &"[REDACTED]")
            .finish()
    }
}

/// The one-time key pair controlling a stealth address.
#[derive(Debug)]
pub struct RecoveredKey {
    /// The stealth address funds were sent to
    pub address: StealthAddress,
    /// The stealth public key `P`
    pub public_key: StealthPublicKey,
    /// The stealth private key `p` (zeroized on drop)
    pub private_key: StealthPrivateKey,
}

impl RecoveredKey {
    /// Exports the public half for display or storage.
    pub fn export(&self) -> RecoveredKeyExport {
        RecoveredKeyExport {
            address: self.address,
            public_key: self.public_key,
        }
    }
}

/// Public information about a recovered key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecoveredKeyExport {
    /// The stealth address
    pub address: StealthAddress,
    /// The stealth public key
    pub public_key: StealthPublicKey,
}

#[cfg(test)]
mod tests {
    use super::*;
    use dksap_core::types::{AddressFormat, EncodedPoint, HashToScalar, SecretKey};
    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    const M_HEX: &str = "3b3b08bba24858f7ab8b302428379198e521359b19784a40aeb4daddf4ad911c";
    const META_HEX: &str = "d3f00f05369ac51ac36d7014a53f63aaf307fa5bce8955ba282284861c2a1200\
                            fe80b6724ca8a6108c7184b2ccb7023c71603f94020809193e4526eaaedb68cc";
    const EPHEMERAL_HEX: &str = "e86e0414d08afcf944b0b195f260e34fee9050238b6875ab23f8c6a78bcafadf\
                                 78030d4068cbab05235e1da611ff8057e07a761a1f45090739c12603ae462038";
    const PRIVATE_HEX: &str = "e8b186999566bdf441c5d76ef6d119bf5e4f9364a71eafd59b41b611bf5e40c0";

    fn reference_wallet() -> StealthWallet {
        StealthWallet::from_secret_key(SecretKey::from_hex(M_HEX).unwrap()).unwrap()
    }

    #[test]
    fn test_recovery_scalars_wipe_to_zero() {
        use dksap_core::traits::CurveGroup;
        use zeroize::Zeroize;

        let wallet = reference_wallet();
        let mut m = scalar_from_secret::<Secp256k1>(wallet.meta_secret()).unwrap();
        assert_eq!(secret_from_scalar::<Secp256k1>(&m).to_hex(), M_HEX);

        m.zeroize();
        assert_eq!(Secp256k1::scalar_to_be_bytes(&m), [0u8; 32]);
    }

    #[test]
    fn test_wallet_generation() {
        let wallet = StealthWallet::generate().unwrap();
        assert!(wallet.meta_address().validate().is_ok());
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let a = StealthWallet::generate_with_rng(&mut ChaCha20Rng::seed_from_u64(9)).unwrap();
        let b = StealthWallet::generate_with_rng(&mut ChaCha20Rng::seed_from_u64(9)).unwrap();
        assert_eq!(a.meta_address(), b.meta_address());
    }

    #[test]
    fn test_reference_meta_address() {
        assert_eq!(reference_wallet().meta_address().to_hex(), META_HEX);
    }

    #[test]
    fn test_zero_secret_rejected() {
        let result = StealthWallet::from_secret_key(SecretKey::from_array([0u8; 32]));
        assert!(matches!(result, Err(StealthError::InvalidScalar(_))));
    }

    #[test]
    fn test_recover_reference_key() {
        let wallet = reference_wallet();
        let ephemeral = EphemeralPublicKey::from_hex(EPHEMERAL_HEX).unwrap();

        let key = wallet.recover_from_ephemeral(&ephemeral).unwrap();
        assert_eq!(key.private_key.to_hex(), PRIVATE_HEX);
        assert_eq!(
            key.address.to_string(),
            "0xd5f139dc411fab3642ba81014df124216f41e5c7"
        );
    }

    #[test]
    fn test_recover_announcement_for_us() {
        let wallet = reference_wallet();
        let ephemeral = EphemeralPublicKey::from_hex(EPHEMERAL_HEX).unwrap();
        let address = wallet.recover_from_ephemeral(&ephemeral).unwrap().address;

        let announcement = Announcement::new(ephemeral, address);
        let key = wallet.recover(&announcement).unwrap().unwrap();
        assert_eq!(key.address, address);
    }

    #[test]
    fn test_recover_announcement_for_someone_else() {
        let wallet = reference_wallet();
        let other = StealthWallet::generate_with_rng(&mut ChaCha20Rng::seed_from_u64(3)).unwrap();
        let ephemeral = EphemeralPublicKey::from_hex(EPHEMERAL_HEX).unwrap();
        let address = wallet.recover_from_ephemeral(&ephemeral).unwrap().address;

        let announcement = Announcement::new(ephemeral, address);
        assert!(other.recover(&announcement).unwrap().is_none());
    }

    #[test]
    fn test_recover_rejects_format_mismatch() {
        let wallet = reference_wallet();
        let sui_wallet = reference_wallet()
            .with_config(ProtocolConfig::new().with_address_format(AddressFormat::Sui));
        let ephemeral = EphemeralPublicKey::from_hex(EPHEMERAL_HEX).unwrap();
        let address = wallet.recover_from_ephemeral(&ephemeral).unwrap().address;

        let announcement = Announcement::new(ephemeral, address);
        assert!(matches!(
            sui_wallet.recover(&announcement),
            Err(StealthError::InvalidAnnouncement(_))
        ));
    }

    #[test]
    fn test_recover_rejects_off_curve_ephemeral() {
        let wallet = reference_wallet();
        let bogus = EphemeralPublicKey(EncodedPoint::from_array([0x11; 64]));
        assert!(matches!(
            wallet.recover_from_ephemeral(&bogus),
            Err(StealthError::InvalidPoint(_))
        ));
    }

    #[test]
    fn test_strategy_changes_recovered_key() {
        let ephemeral = EphemeralPublicKey::from_hex(EPHEMERAL_HEX).unwrap();
        let reduce = reference_wallet().recover_from_ephemeral(&ephemeral).unwrap();
        let keccak = reference_wallet()
            .with_config(ProtocolConfig::new().with_hash_to_scalar(HashToScalar::Keccak256))
            .recover_from_ephemeral(&ephemeral)
            .unwrap();
        assert_ne!(reduce.public_key, keccak.public_key);
    }

    #[test]
    fn test_wallet_debug_redacted() {
        let debug = format!("{:?}", reference_wallet());
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains(M_HEX));
    }

    #[test]
    fn test_export_serializes() {
        let ephemeral = EphemeralPublicKey::from_hex(EPHEMERAL_HEX).unwrap();
        let export = reference_wallet().recover_from_ephemeral(&ephemeral).unwrap().export();
        let json = serde_json::to_string(&export).unwrap();
        let restored: RecoveredKeyExport = serde_json::from_str(&json).unwrap();
        assert_eq!(export, restored);
    }
}
