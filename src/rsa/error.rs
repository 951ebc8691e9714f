//! Errors raised by the RSA core

use thiserror::Error;

/// Errors that can occur during key generation, encoding or decoding
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RsaError {
    /// Key size outside the supported range or not a multiple of 16
    #[error("Invalid key size: {bits} bits (expected a multiple of 16 between {min} and {max})")]
    InvalidKeySize { bits: u32, min: u32, max: u32 },

    /// Prime size too small or not a whole number of bytes
    #[error("Invalid prime size: {0} bits (expected a multiple of 8, at least 16)")]
    InvalidPrimeSize(u32),

    /// Public exponent must be odd and within 3..=2^33 - 1
    #[error("Invalid public exponent: {0}")]
    InvalidPublicExponent(u64),

    /// Miller-Rabin needs at least one round
    #[error("Miller-Rabin round count must be at least 1")]
    InvalidRoundCount,

    /// The two primes of a key pair must differ
    #[error("Key primes must be distinct")]
    EqualPrimes,

    /// The public exponent has no inverse modulo phi(n)
    #[error("Public exponent is not invertible modulo phi(n)")]
    NoModularInverse,

    /// Modulus too short to hold a single plaintext byte per block
    #[error("Modulus of {0} bits is too small for block encryption")]
    ModulusTooSmall(u64),

    /// A ciphertext token is empty or not a decimal number
    #[error("Malformed ciphertext: block {index} is not a decimal number")]
    MalformedCiphertext { index: usize },

    /// A ciphertext block is not smaller than the modulus
    #[error("Ciphertext block {index} is out of range for this key")]
    BlockOutOfRange { index: usize },

    /// A decrypted block is wider than the block layout allows
    #[error("Decrypted block {index} is {actual} bytes, expected at most {expected} (wrong key?)")]
    BlockOverflow {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// Decrypted bytes are not valid UTF-8 text
    #[error("Decrypted data is not valid UTF-8 text")]
    InvalidUtf8,

    /// Key components do not satisfy the RSA relations
    #[error("Inconsistent key: {0}")]
    InconsistentKey(&'static str),
}

/// Result type for RSA core operations
pub type RsaResult<T> = Result<T, RsaError>;
