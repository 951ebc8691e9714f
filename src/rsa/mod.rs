// RSA Module - Main module file
// Exports all RSA-related functionality

pub mod bigint;
pub mod decrypt;
pub mod encrypt;
pub mod error;
pub mod keygen;
pub mod padding;
pub mod prime;

#[cfg(test)]
pub(crate) mod fixtures;

pub use decrypt::{decode, decode_bytes, decode_with, decrypt_block};
pub use encrypt::{encode, encode_bytes, encode_with, encrypt_block, EncryptedMessage};
pub use error::{RsaError, RsaResult};
pub use keygen::{
    generate_keypair, generate_keypair_with, KeyGenConfig, KeyPair, PrivateKey, PublicKey,
    DEFAULT_PUBLIC_EXPONENT,
};
pub use padding::{
    block_char_len, padding_len, strip_padding, trim_trailing_padding, BlockLayout, DELIMITER,
};
pub use prime::{generate_candidate, generate_prime, is_probable_prime, DEFAULT_MR_ROUNDS};
