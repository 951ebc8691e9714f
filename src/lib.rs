//! RSA key generation and block-framed text encryption
//!
//! Keys are generated from Miller-Rabin tested primes, text is cut into
//! space-padded blocks that are each raised to the public exponent, and the
//! '/'-joined decimal results travel as base64. Keys are stored as PEM files.

pub mod config;
pub mod error;
pub mod rsa;
pub mod session;
pub mod transport;
pub mod util;

pub use crate::config::CryptConfig;
pub use crate::error::{Error, Result};
pub use crate::rsa::{generate_keypair, KeyPair, PrivateKey, PublicKey};
pub use crate::session::{decrypt, encrypt, Outcome, Session};
pub use crate::transport::{load_private_key, load_public_key, save_private_key, save_public_key};
