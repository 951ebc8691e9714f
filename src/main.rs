use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};

use rsa_blockcrypt::rsa::bigint::to_bytes;
use rsa_blockcrypt::rsa::BlockLayout;
use rsa_blockcrypt::transport::{load_private_key, load_public_key};
use rsa_blockcrypt::{CryptConfig, Error, Outcome, PublicKey, Session};

/// Hex digits of the modulus shown by `inspect`
const MODULUS_PREFIX_LEN: usize = 32;

#[derive(Parser)]
#[command(name = "rsa-blockcrypt")]
#[command(version)]
#[command(about = "RSA key generation and block-framed text encryption", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a key pair and save PublicKey.pem and PrivateKey.pem
    Keygen {
        /// Modulus size in bits
        #[arg(long, default_value_t = 2048)]
        bits: u32,
        /// Miller-Rabin rounds per prime candidate
        #[arg(long, default_value_t = 20)]
        rounds: u32,
        /// Directory the key files are written to
        #[arg(long)]
        out: PathBuf,
    },

    /// Encrypt a file or a string with a public key
    Encrypt {
        /// Public key PEM file
        #[arg(long)]
        key: PathBuf,
        /// Plaintext file
        #[arg(long, conflicts_with = "text")]
        input: Option<PathBuf>,
        /// Plaintext given on the command line
        #[arg(long)]
        text: Option<String>,
        /// Where the base64 ciphertext is written
        #[arg(long)]
        output: PathBuf,
        /// Use the legacy block layout that skips a byte per block
        #[arg(long)]
        legacy_layout: bool,
    },

    /// Decrypt a file with a private key
    Decrypt {
        /// Private key PEM file
        #[arg(long)]
        key: PathBuf,
        /// Base64 ciphertext file
        #[arg(long)]
        input: PathBuf,
        /// Where the plaintext is written
        #[arg(long)]
        output: PathBuf,
        /// Remove the space padding of the final block
        #[arg(long)]
        trim_padding: bool,
        /// Use the legacy block layout that skips a byte per block
        #[arg(long)]
        legacy_layout: bool,
    },

    /// Show the size and modulus prefix of a key file
    Inspect {
        /// Public or private key PEM file
        #[arg(long)]
        key: PathBuf,
    },
}

fn layout(legacy: bool) -> BlockLayout {
    if legacy {
        BlockLayout::Legacy
    } else {
        BlockLayout::Contiguous
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(outcome) => {
            println!("{}: {}", outcome.title, outcome.message);
            ExitCode::SUCCESS
        }
        Err(err) => {
            match err.downcast_ref::<Error>() {
                Some(session_err) => eprintln!("{}: {}", session_err.title(), session_err),
                None => eprintln!("Error!: {:#}", err),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<Outcome> {
    let outcome = match cli.command {
        Commands::Keygen { bits, rounds, out } => {
            let config = CryptConfig::default()
                .with_key_bits(bits)
                .with_rounds(rounds);
            Session::new(config).with_key_dir(out).generate_keys()?
        }
        Commands::Encrypt {
            key,
            input,
            text,
            output,
            legacy_layout,
        } => {
            let config = CryptConfig::default().with_block_layout(layout(legacy_layout));
            let mut session = Session::new(config)
                .with_key_file(key)
                .with_output_file(output);
            if let Some(input) = input {
                session = session.with_input_file(input);
            }
            if let Some(text) = text {
                session = session.with_plaintext(text);
            }
            session.encrypt_file()?
        }
        Commands::Decrypt {
            key,
            input,
            output,
            trim_padding,
            legacy_layout,
        } => {
            let config = CryptConfig::default()
                .with_block_layout(layout(legacy_layout))
                .with_trim_padding(trim_padding);
            Session::new(config)
                .with_key_file(key)
                .with_input_file(input)
                .with_output_file(output)
                .decrypt_file()?
        }
        Commands::Inspect { key } => inspect(&key)?,
    };
    Ok(outcome)
}

fn inspect(path: &Path) -> anyhow::Result<Outcome> {
    let (kind, public_key) = match load_public_key(path) {
        Ok(key) => ("Public key", key),
        Err(_) => {
            let key = load_private_key(path)
                .with_context(|| format!("{} is neither a public nor a private key", path.display()))?;
            ("Private key", key.public_key())
        }
    };

    Ok(Outcome {
        title: kind.to_string(),
        message: describe(&public_key),
    })
}

fn describe(key: &PublicKey) -> String {
    let modulus_hex = hex::encode(to_bytes(&key.modulus));
    let prefix = &modulus_hex[..modulus_hex.len().min(MODULUS_PREFIX_LEN)];
    format!(
        "{} bits, exponent {}, modulus {}...",
        key.bit_length(),
        key.public_exponent,
        prefix
    )
}
