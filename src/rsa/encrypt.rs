// RSA Block Encryption
// Encrypts space-padded plaintext blocks into '/'-delimited decimal integers

use std::fmt;

use log::debug;

use super::bigint::{from_bytes, mod_pow, to_decimal, RsaBigInt};
use super::error::RsaResult;
use super::keygen::PublicKey;
use super::padding::{split_ciphertext, BlockLayout, BlockPlan, DELIMITER};

/// Encrypted blocks rendered as decimal integers, each followed by '/'
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EncryptedMessage(String);

impl EncryptedMessage {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Decimal tokens in block order, without the trailing empty token
    pub fn blocks(&self) -> impl Iterator<Item = &str> {
        split_ciphertext(&self.0)
    }

    pub fn block_count(&self) -> usize {
        self.blocks().count()
    }

    fn push_block(&mut self, c: &RsaBigInt) {
        self.0.push_str(&to_decimal(c));
        self.0.push(DELIMITER);
    }
}

impl From<String> for EncryptedMessage {
    fn from(text: String) -> Self {
        Self(text)
    }
}

impl fmt::Display for EncryptedMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Encrypt one block: read it as a big-endian integer m and return m^e mod n
pub fn encrypt_block(block: &[u8], public_key: &PublicKey) -> RsaBigInt {
    let m = from_bytes(block);
    mod_pow(&m, &public_key.public_exponent, &public_key.modulus)
}

/// Encrypt raw bytes with an explicit block layout
pub fn encode_bytes(
    plaintext: &[u8],
    public_key: &PublicKey,
    layout: BlockLayout,
) -> RsaResult<EncryptedMessage> {
    let plan = BlockPlan::new(&public_key.modulus, layout)?;
    let blocks = plan.split(plaintext);

    let mut message = EncryptedMessage::default();
    for block in &blocks {
        message.push_block(&encrypt_block(block, public_key));
    }

    debug!(
        "encrypted {} bytes into {} blocks ({:?} layout, {} padding bytes)",
        plaintext.len(),
        blocks.len(),
        layout,
        plan.padding_len(plaintext.len())
    );
    Ok(message)
}

/// Encrypt text with the default block layout
pub fn encode(plaintext: &str, public_key: &PublicKey) -> RsaResult<EncryptedMessage> {
    encode_bytes(plaintext.as_bytes(), public_key, BlockLayout::default())
}

/// Encrypt text with an explicit block layout
pub fn encode_with(
    plaintext: &str,
    public_key: &PublicKey,
    layout: BlockLayout,
) -> RsaResult<EncryptedMessage> {
    encode_bytes(plaintext.as_bytes(), public_key, layout)
}
