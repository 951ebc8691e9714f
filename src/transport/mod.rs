//! Key files and ciphertext transport encoding
//!
//! Key material leaves the crate as PEM (SubjectPublicKeyInfo for the public
//! key, PKCS#1 for the private key) and ciphertext leaves it as base64.

pub mod armor;
pub mod pem;

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub use armor::{armor, unarmor};
pub use pem::{
    load_private_key, load_public_key, save_key_pair, save_private_key, save_public_key,
    PRIVATE_KEY_FILE, PUBLIC_KEY_FILE,
};

/// Errors raised while moving keys or ciphertext in and out of text form
#[derive(Debug, Error)]
pub enum TransportError {
    /// The key file could not be read
    #[error("Could not read key file {}: {source}", .path.display())]
    KeyRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The key file could not be written
    #[error("Could not write key file {}: {source}", .path.display())]
    KeyWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The key encoding could not be produced or parsed
    #[error("Malformed key: {0}")]
    MalformedKey(String),

    /// The ciphertext is not valid base64 text
    #[error("Invalid base64 ciphertext: {0}")]
    InvalidBase64(String),
}

/// Result type for transport operations
pub type TransportResult<T> = Result<T, TransportError>;
