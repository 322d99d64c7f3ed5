//! DKSAP CLI
//!
//! Command-line interface for the Dual-Key Stealth Address Protocol.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use dksap_core::types::{
    AddressFormat, Announcement, EphemeralPublicKey, HashToScalar, MetaAddress, SecretKey,
    StealthAddress,
};
use dksap_core::CurveGroup;
use dksap_crypto::codec::{decode_point, encode_point};
use dksap_crypto::derive;
use dksap_crypto::{eip55_checksum, hash_to_scalar, scalar_from_secret, verify, Secp256k1};
use dksap_stealth::{
    create_stealth_payment, create_stealth_payment_with_ephemeral, ProtocolConfig,
    StealthPaymentBuilder, StealthWallet,
};

/// Meta secret of the reference walk-through.
const DEMO_META_SECRET: &str = "3b3b08bba24858f7ab8b302428379198e521359b19784a40aeb4daddf4ad911c";
/// Ephemeral secret of the reference walk-through.
const DEMO_EPHEMERAL_SECRET: &str =
    "9d23679323734fdf371017048b4a73cf160566a0ccd69fa087299888d9fbc59f";

/// DKSAP - Dual-Key Stealth Address Protocol
#[derive(Parser)]
#[command(name = "dksap")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Hash-to-scalar strategy: reduce | keccak256 (overrides DKSAP_HASH_TO_SCALAR)
    #[arg(long, global = true)]
    hash_to_scalar: Option<HashToScalar>,

    /// Address format: ethereum | sui (overrides DKSAP_ADDRESS_FORMAT)
    #[arg(long, global = true)]
    address_format: Option<AddressFormat>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new meta secret and meta-address
    Keygen {
        /// Output file for keys (JSON)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Create a stealth payment to a meta-address
    Send {
        /// Recipient's meta-address (hex)
        recipient: String,
        /// Fixed ephemeral secret (hex); random if omitted
        #[arg(long)]
        ephemeral: Option<String>,
        /// Informational amount
        #[arg(long)]
        amount: Option<String>,
        /// Informational token symbol
        #[arg(long)]
        token: Option<String>,
        /// Off-chain memo
        #[arg(long)]
        memo: Option<String>,
        /// Write the announcement (JSON) to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Recover the spending key of a stealth payment
    Recover {
        /// Keys file written by `keygen`, takes precedence over `--secret`
        #[arg(short, long)]
        keys: Option<PathBuf>,
        /// Meta secret (hex)
        #[arg(long, env = "DKSAP_META_SECRET", hide_env_values = true)]
        secret: Option<String>,
        /// Announcement file (JSON)
        #[arg(short, long, conflicts_with = "ephemeral")]
        announcement: Option<PathBuf>,
        /// Ephemeral public key (hex), skips the ownership check
        #[arg(short, long)]
        ephemeral: Option<String>,
    },

    /// Walk through the protocol with fixed scalars, printing every value
    Demo,
}

/// Contents of a keys file.
#[derive(Serialize, Deserialize)]
struct KeysFile {
    meta_secret: String,
    meta_address: String,
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "dksap=debug,info"
    } else {
        "dksap=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = ProtocolConfig::from_env().context("Invalid DKSAP_* environment")?;
    if let Some(strategy) = cli.hash_to_scalar {
        config = config.with_hash_to_scalar(strategy);
    }
    if let Some(format) = cli.address_format {
        config = config.with_address_format(format);
    }
    debug!(?config, "loaded protocol configuration");

    let out = Output { json: cli.json };
    match cli.command {
        Commands::Keygen { output } => cmd_keygen(&out, output.as_deref()),
        Commands::Send {
            recipient,
            ephemeral,
            amount,
            token,
            memo,
            output,
        } => cmd_send(
            &out,
            &config,
            &recipient,
            ephemeral.as_deref(),
            PaymentInfo { amount, token, memo },
            output.as_deref(),
        ),
        Commands::Recover {
            keys,
            secret,
            announcement,
            ephemeral,
        } => cmd_recover(
            &out,
            &config,
            keys.as_deref(),
            secret.as_deref(),
            announcement.as_deref(),
            ephemeral.as_deref(),
        ),
        Commands::Demo => cmd_demo(&out, &config),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// OUTPUT
// ═══════════════════════════════════════════════════════════════════════════════

struct Output {
    json: bool,
}

impl Output {
    fn header(&self, text: &str) {
        if !self.json {
            println!("{}", text.cyan().bold());
        }
    }

    fn field(&self, label: &str, value: impl std::fmt::Display) {
        if !self.json {
            println!("   {} {}", format!("{label}:").dimmed(), value);
        }
    }

    fn success(&self, text: &str) {
        if !self.json {
            println!("\n{}", text.green().bold());
        }
    }

    fn emit(&self, value: &serde_json::Value) -> Result<()> {
        if self.json {
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        Ok(())
    }
}

/// Renders an address the way its chain's wallets show it.
fn display_address(address: &StealthAddress) -> String {
    match address {
        StealthAddress::Ethereum(eth) => eip55_checksum(eth),
        StealthAddress::Sui(sui) => sui.to_hex_string(),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// COMMANDS
// ═══════════════════════════════════════════════════════════════════════════════

/// Generate a new meta secret
fn cmd_keygen(out: &Output, output: Option<&Path>) -> Result<()> {
    out.header("🔑 Generating DKSAP keys...");

    let wallet = StealthWallet::generate().context("Failed to generate wallet")?;
    let keys = KeysFile {
        meta_secret: wallet.meta_secret().to_hex(),
        meta_address: wallet.meta_address().to_hex(),
    };

    if let Some(path) = output {
        std::fs::write(path, serde_json::to_string_pretty(&keys)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        out.success(&format!("✅ Keys saved to: {}", path.display()));
        out.field("Meta-address", &keys.meta_address);
        return out.emit(&json!({
            "meta_address": keys.meta_address,
            "keys_file": path.display().to_string(),
        }));
    }

    out.success("✅ Keys generated:");
    out.field("Meta-address", &keys.meta_address);
    out.field("Meta secret", &keys.meta_secret);
    if !out.json {
        println!("\n{}", "⚠️  IMPORTANT: Keep your meta secret safe!".red().bold());
        println!("   Anyone holding it can spend every payment sent to you.");
    }
    out.emit(&serde_json::to_value(&keys)?)
}

/// Informational fields attached to a payment.
struct PaymentInfo {
    amount: Option<String>,
    token: Option<String>,
    memo: Option<String>,
}

/// Create a stealth payment
fn cmd_send(
    out: &Output,
    config: &ProtocolConfig,
    recipient: &str,
    ephemeral: Option<&str>,
    info: PaymentInfo,
    output: Option<&Path>,
) -> Result<()> {
    let preview: String = recipient.chars().take(16).collect();
    out.header(&format!("💸 Creating stealth payment to: {preview}..."));

    let meta = MetaAddress::from_hex(recipient).context("Invalid meta-address hex")?;

    let mut builder = StealthPaymentBuilder::new().recipient(meta).config(*config);
    if let Some(hex) = ephemeral {
        builder = builder.ephemeral_secret(SecretKey::from_hex(hex).context("Invalid ephemeral secret hex")?);
    }
    if let Some(amount) = info.amount {
        builder = builder.amount(amount);
    }
    if let Some(token) = info.token {
        builder = builder.token(token);
    }
    if let Some(memo) = info.memo {
        builder = builder.memo(memo);
    }

    let payment = builder.build().context("Failed to create stealth payment")?;

    out.success("✅ Stealth payment created:");
    out.field("Address", display_address(&payment.stealth_address));
    out.field("Format", payment.stealth_address.format());
    out.field("Ephemeral key", payment.announcement.ephemeral_key.encoded());

    if let Some(path) = output {
        std::fs::write(path, payment.announcement.to_json()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        out.field("Announcement saved to", path.display());
    } else if !out.json {
        println!("\n{}", "📋 Announcement (JSON):".yellow().bold());
        println!("{}", serde_json::to_string_pretty(&payment.announcement)?);
    }

    if !out.json {
        println!("\n{}", "ℹ️  Next steps:".cyan());
        println!("   1. Send funds to the stealth address above");
        println!("   2. Publish the announcement for the recipient");
    }

    out.emit(&serde_json::to_value(&payment)?)
}

/// Picks the meta secret, a keys file winning over `--secret` or `DKSAP_META_SECRET`
fn resolve_meta_secret(keys: Option<&Path>, secret: Option<&str>) -> Result<SecretKey> {
    match (keys, secret) {
        (Some(path), _) => {
            let file = std::fs::File::open(path).context("Failed to open keys file")?;
            let keys: KeysFile = serde_json::from_reader(file).context("Malformed keys file")?;
            SecretKey::from_hex(&keys.meta_secret).context("Invalid meta secret in keys file")
        }
        (None, Some(hex)) => SecretKey::from_hex(hex).context("Invalid meta secret hex"),
        (None, None) => bail!("provide --keys or --secret"),
    }
}

/// Recover the spending key for a payment
fn cmd_recover(
    out: &Output,
    config: &ProtocolConfig,
    keys: Option<&Path>,
    secret: Option<&str>,
    announcement: Option<&Path>,
    ephemeral: Option<&str>,
) -> Result<()> {
    out.header("🔎 Recovering stealth key...");

    let meta_secret = resolve_meta_secret(keys, secret)?;
    let wallet = StealthWallet::from_secret_key(meta_secret)
        .context("Invalid meta secret")?
        .with_config(*config);

    let key = match (announcement, ephemeral) {
        (Some(path), _) => {
            let text = std::fs::read_to_string(path).context("Failed to read announcement file")?;
            let announcement = Announcement::from_json(&text).context("Invalid announcement")?;
            match wallet.recover(&announcement)? {
                Some(key) => key,
                None => {
                    if !out.json {
                        println!("\n{}", "No payment for this wallet in the announcement.".yellow());
                    }
                    return out.emit(&json!({ "found": false }));
                }
            }
        }
        (None, Some(hex)) => {
            let ephemeral = EphemeralPublicKey::from_hex(hex).context("Invalid ephemeral key hex")?;
            wallet.recover_from_ephemeral(&ephemeral)?
        }
        (None, None) => bail!("provide --announcement or --ephemeral"),
    };

    out.success("✅ Stealth key recovered:");
    out.field("Address", display_address(&key.address));
    out.field("Public key", key.public_key.encoded());
    out.field("Private key", key.private_key.to_hex());
    if !out.json {
        println!("\n{}", "⚠️  The private key above spends the funds. Handle with care.".red().bold());
    }

    out.emit(&json!({
        "found": true,
        "address": key.address,
        "public_key": key.public_key,
        "private_key": key.private_key.to_hex(),
    }))
}

/// Reference walk-through with fixed scalars
fn cmd_demo(out: &Output, config: &ProtocolConfig) -> Result<()> {
    out.header("🧪 DKSAP walk-through (secp256k1)");
    let strategy = config.hash_to_scalar;

    // Recipient publishes M = G·m
    let m = scalar_from_secret::<Secp256k1>(&SecretKey::from_hex(DEMO_META_SECRET)?)?;
    let meta_address = derive::generate_meta_address::<Secp256k1>(&m)?;
    let meta = decode_point::<Secp256k1>(meta_address.encoded())?;
    out.field("m", DEMO_META_SECRET);
    out.field("M", meta_address);

    // Sender publishes R = G·r
    let r = scalar_from_secret::<Secp256k1>(&SecretKey::from_hex(DEMO_EPHEMERAL_SECRET)?)?;
    let ephemeral = derive::ephemeral_public_key::<Secp256k1>(&r)?;
    out.field("r", DEMO_EPHEMERAL_SECRET);
    out.field("R", ephemeral.encoded());

    // Both sides agree on S
    let r_point = decode_point::<Secp256k1>(ephemeral.encoded())?;
    let shared_sender = derive::sender_shared_secret::<Secp256k1>(&meta, &r);
    let shared_recipient = derive::recipient_shared_secret::<Secp256k1>(&r_point, &m);
    verify::assert_shared_secrets_agree::<Secp256k1>(&shared_sender, &shared_recipient)?;
    let shared = encode_point::<Secp256k1>(&shared_sender)?;
    out.field("S = M·r = R·m", shared);

    let h = hash_to_scalar::<Secp256k1>(&shared_sender, strategy)?;
    let h_hex = hex::encode(Secp256k1::scalar_to_be_bytes(&h));
    out.field(&format!("hash(S) [{strategy}]"), &h_hex);

    // One-time keys
    let stealth = derive::derive_stealth_public_key::<Secp256k1>(&meta, &shared_sender, strategy)?;
    let stealth_public_key = derive::encode_stealth_public_key::<Secp256k1>(&stealth)?;
    out.field("P = M + G·hash(S)", stealth_public_key.encoded());

    let p = derive::recipient_derive_private_key::<Secp256k1>(&m, &shared_recipient, strategy)?;
    let p_hex = hex::encode(Secp256k1::scalar_to_be_bytes(&p));
    out.field("p = m + hash(S)", &p_hex);

    verify::assert_consistent::<Secp256k1>(&p, &stealth)?;
    out.field("G·p == P", "true".green());

    let payment = create_stealth_payment_with_ephemeral(
        &meta_address,
        &SecretKey::from_hex(DEMO_EPHEMERAL_SECRET)?,
        config,
    )?;
    out.field("Address", display_address(&payment.stealth_address));

    // A second payment with fresh randomness lands elsewhere
    let fresh = create_stealth_payment(&meta_address, config)?;
    if fresh.stealth_address == payment.stealth_address {
        bail!("fresh ephemeral key produced the same stealth address");
    }
    out.field("Fresh payment", display_address(&fresh.stealth_address));
    out.success("✅ Sender and recipient agree.");

    out.emit(&json!({
        "config": config,
        "meta_secret": DEMO_META_SECRET,
        "meta_address": meta_address,
        "ephemeral_secret": DEMO_EPHEMERAL_SECRET,
        "ephemeral_public_key": ephemeral,
        "shared_secret": shared,
        "hash_to_scalar": h_hex,
        "stealth_public_key": stealth_public_key,
        "stealth_private_key": p_hex,
        "stealth_address": payment.stealth_address,
        "verified": true,
    }))
}
