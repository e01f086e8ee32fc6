//! peerid — command-line interface for peer identities.
//!
//! Generates fresh identities and inspects existing ones in any of the
//! supported text forms.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use peer_identity::{KeyType, PeerId};

/// peerid — generate and inspect self-certifying peer identities.
#[derive(Parser, Debug)]
#[command(name = "peerid", about = "Peer identity CLI", version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a new identity and print its JSON form
    Generate {
        /// Key algorithm: rsa, ed25519 or secp256k1
        #[arg(long, default_value = "rsa")]
        key_type: String,

        /// Key size in bits (RSA only)
        #[arg(long, default_value_t = 2048)]
        bits: usize,

        /// Omit the private key from the output
        #[arg(long)]
        exclude_private: bool,
    },

    /// Parse an identity from any text form and print its renderings
    Inspect {
        /// Identity text: base58, hex, or a CID string
        id: String,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            key_type,
            bits,
            exclude_private,
        } => generate(&key_type, bits, exclude_private),
        Commands::Inspect { id } => inspect(&id),
    }
}

fn generate(key_type: &str, bits: usize, exclude_private: bool) -> Result<()> {
    let key_type: KeyType = key_type.parse().context("unsupported key type")?;
    let peer = PeerId::generate(key_type, bits).context("key generation failed")?;

    let mut json = peer.to_json().context("serialization failed")?;
    if exclude_private {
        json.priv_key = None;
    }
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}

fn inspect(text: &str) -> Result<()> {
    // Try the self-describing forms first, then bare hex.
    let peer = text
        .parse::<PeerId>()
        .or_else(|_| PeerId::from_hex(text))
        .context("unrecognized identity text")?;

    println!("base58:  {}", peer.to_base58());
    println!("hex:     {}", peer.to_hex());
    println!("cid:     {}", peer.to_cid_string());
    println!("short:   {}", peer.to_printable());
    println!("inline:  {}", peer.has_inline_public_key());
    Ok(())
}
