// Session
// Holds the paths chosen for one round of key generation, encryption or
// decryption and reports each result as a titled message

use std::path::{Path, PathBuf};

use log::info;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::config::CryptConfig;
use crate::error::{Error, Result};
use crate::rsa::{
    decode_bytes, encode_bytes, generate_keypair_with, trim_trailing_padding, KeyPair,
    PrivateKey, PublicKey, RsaError,
};
use crate::transport::{armor, load_private_key, load_public_key, save_key_pair, unarmor};
use crate::util::file_ops::{
    ensure_dir, format_file_size, get_file_size, read_bytes, read_text, write_bytes, write_text,
};

/// Title of every successful outcome
pub const SUCCESS_TITLE: &str = "Success!";

/// A titled confirmation for the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub title: String,
    pub message: String,
}

impl Outcome {
    fn success(message: String) -> Self {
        Self {
            title: SUCCESS_TITLE.to_string(),
            message,
        }
    }
}

impl From<&Error> for Outcome {
    fn from(err: &Error) -> Self {
        Self {
            title: err.title().to_string(),
            message: err.to_string(),
        }
    }
}

/// Encrypt text for transport: '/'-joined decimal blocks wrapped in base64.
///
/// Empty plaintext is rejected.
pub fn encrypt(plaintext: &str, public_key: &PublicKey) -> Result<String> {
    encrypt_bytes(plaintext.as_bytes(), public_key, &CryptConfig::default())
}

/// Reverse of [`encrypt`]. The final block's space padding is kept.
pub fn decrypt(ciphertext: &str, private_key: &PrivateKey) -> Result<String> {
    let plaintext = decrypt_bytes(ciphertext, private_key, &CryptConfig::default())?;
    String::from_utf8(plaintext).map_err(|_| Error::Rsa(RsaError::InvalidUtf8))
}

fn encrypt_bytes(plaintext: &[u8], public_key: &PublicKey, config: &CryptConfig) -> Result<String> {
    if plaintext.is_empty() {
        return Err(Error::EmptyPlaintext);
    }
    let message = encode_bytes(plaintext, public_key, config.block_layout)?;
    Ok(armor(&message))
}

fn decrypt_bytes(
    ciphertext: &str,
    private_key: &PrivateKey,
    config: &CryptConfig,
) -> Result<Vec<u8>> {
    let message = unarmor(ciphertext)?;
    let mut plaintext = decode_bytes(message.as_str(), private_key, config.block_layout)?;

    if config.trim_padding {
        let keep =
            trim_trailing_padding(&plaintext, &private_key.modulus, config.block_layout)?.len();
        plaintext.truncate(keep);
    }
    Ok(plaintext)
}

/// Paths and settings for one user session
#[derive(Debug, Clone, Default)]
pub struct Session {
    config: CryptConfig,
    key_dir: Option<PathBuf>,
    key_file: Option<PathBuf>,
    input_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
    plaintext: Option<String>,
    keypair: Option<KeyPair>,
}

impl Session {
    pub fn new(config: CryptConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &CryptConfig {
        &self.config
    }

    /// Directory new key files are written to
    pub fn with_key_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.key_dir = Some(dir.into());
        self
    }

    /// Public key for encryption or private key for decryption
    pub fn with_key_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.key_file = Some(path.into());
        self
    }

    pub fn with_input_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_file = Some(path.into());
        self
    }

    pub fn with_output_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_file = Some(path.into());
        self
    }

    /// Typed plaintext, used instead of an input file when encrypting
    pub fn with_plaintext(mut self, text: impl Into<String>) -> Self {
        self.plaintext = Some(text.into());
        self
    }

    /// Key pair produced by the last successful generation
    pub fn keypair(&self) -> Option<&KeyPair> {
        self.keypair.as_ref()
    }

    fn selected<'a>(path: &'a Option<PathBuf>, what: &'static str) -> Result<&'a Path> {
        path.as_deref().ok_or(Error::MissingSelection(what))
    }

    /// Generate a key pair and save it into the key directory
    pub fn generate_keys(&mut self) -> Result<Outcome> {
        self.generate_keys_with(&mut OsRng)
    }

    pub fn generate_keys_with<R: RngCore + CryptoRng>(&mut self, rng: &mut R) -> Result<Outcome> {
        let dir = Self::selected(&self.key_dir, "key directory")?.to_path_buf();
        self.config.validate()?;
        ensure_dir(&dir)?;

        info!("generating {}-bit key pair", self.config.key_bits);
        let pair = generate_keypair_with(rng, &self.config.to_keygen_config())?;
        save_key_pair(&pair, &dir)?;
        self.keypair = Some(pair);

        Ok(Outcome::success(format!(
            "Keys generated successfully and saved to: {}",
            dir.display()
        )))
    }

    fn plaintext_to_encrypt(&self) -> Result<Vec<u8>> {
        let text = match (&self.plaintext, &self.input_file) {
            (Some(text), _) => text.clone().into_bytes(),
            (None, Some(path)) => read_bytes(path)?,
            (None, None) => return Err(Error::MissingSelection("input file")),
        };
        if text.is_empty() {
            return Err(Error::EmptyPlaintext);
        }
        Ok(text)
    }

    /// Encrypt the input file or typed plaintext into the output file
    pub fn encrypt_file(&self) -> Result<Outcome> {
        let key_path = Self::selected(&self.key_file, "key file")?;
        let output = Self::selected(&self.output_file, "output file")?;
        let plaintext = self.plaintext_to_encrypt()?;

        let public_key = load_public_key(key_path)?;
        let armored = encrypt_bytes(&plaintext, &public_key, &self.config)?;
        write_text(output, &armored)?;

        info!(
            "encrypted {} bytes into {} ({})",
            plaintext.len(),
            output.display(),
            format_file_size(get_file_size(output)?)
        );
        Ok(Outcome::success(format!(
            "File encrypted and written to {} successfully!",
            output.display()
        )))
    }

    /// Decrypt the input file into the output file
    pub fn decrypt_file(&self) -> Result<Outcome> {
        let key_path = Self::selected(&self.key_file, "key file")?;
        let input = Self::selected(&self.input_file, "input file")?;
        let output = Self::selected(&self.output_file, "output file")?;

        let ciphertext = read_text(input)?;
        let private_key = load_private_key(key_path)?;
        let plaintext = decrypt_bytes(&ciphertext, &private_key, &self.config)?;
        write_bytes(output, &plaintext)?;

        info!("decrypted {} into {}", input.display(), output.display());
        Ok(Outcome::success(format!(
            "File decrypted and written to {} successfully!",
            output.display()
        )))
    }
}
