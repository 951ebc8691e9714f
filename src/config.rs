// Crypt Configuration
// Key generation and block codec settings shared by the session and CLI

use crate::rsa::keygen::{KeyGenConfig, DEFAULT_PUBLIC_EXPONENT};
use crate::rsa::{BlockLayout, RsaResult, DEFAULT_MR_ROUNDS};

/// Settings for key generation and the block codec
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CryptConfig {
    /// Modulus size in bits
    pub key_bits: u32,
    pub public_exponent: u64,
    /// Miller-Rabin witnesses per candidate
    pub miller_rabin_rounds: u32,
    pub block_layout: BlockLayout,
    /// Remove the space padding of the final block after decryption
    pub trim_padding: bool,
}

impl Default for CryptConfig {
    fn default() -> Self {
        Self {
            key_bits: 2048,
            public_exponent: DEFAULT_PUBLIC_EXPONENT,
            miller_rabin_rounds: DEFAULT_MR_ROUNDS,
            block_layout: BlockLayout::default(),
            trim_padding: false,
        }
    }
}

impl CryptConfig {
    pub fn with_key_bits(mut self, bits: u32) -> Self {
        self.key_bits = bits;
        self
    }

    pub fn with_public_exponent(mut self, e: u64) -> Self {
        self.public_exponent = e;
        self
    }

    pub fn with_rounds(mut self, rounds: u32) -> Self {
        self.miller_rabin_rounds = rounds;
        self
    }

    pub fn with_block_layout(mut self, layout: BlockLayout) -> Self {
        self.block_layout = layout;
        self
    }

    pub fn with_trim_padding(mut self, trim: bool) -> Self {
        self.trim_padding = trim;
        self
    }

    /// Key generation parameters for this configuration
    pub fn to_keygen_config(&self) -> KeyGenConfig {
        KeyGenConfig::new(self.key_bits)
            .with_public_exponent(self.public_exponent)
            .with_rounds(self.miller_rabin_rounds)
    }

    pub fn validate(&self) -> RsaResult<()> {
        self.to_keygen_config().validate()
    }
}
