// RSA Block Decryption
// Reverses the block encryption: decimal tokens back to plaintext bytes

use log::debug;

use super::bigint::{from_decimal, mod_pow, to_bytes};
use super::error::{RsaError, RsaResult};
use super::keygen::PrivateKey;
use super::padding::{split_ciphertext, BlockLayout, BlockPlan};

fn decrypt_indexed(
    index: usize,
    token: &str,
    private_key: &PrivateKey,
    plan: &BlockPlan,
) -> RsaResult<Vec<u8>> {
    let c = from_decimal(token).ok_or(RsaError::MalformedCiphertext { index })?;
    if c >= private_key.modulus {
        return Err(RsaError::BlockOutOfRange { index });
    }

    // m = c^d mod n; to_bytes drops leading zero bytes, so only the
    // zero bits inside the first byte are restored here
    let m = mod_pow(&c, &private_key.private_exponent, &private_key.modulus);
    let bytes = to_bytes(&m);

    let Some(width) = plan.decoded_width() else {
        return Ok(bytes);
    };
    if bytes.len() > width {
        return Err(RsaError::BlockOverflow {
            index,
            expected: width,
            actual: bytes.len(),
        });
    }

    let mut block = vec![0u8; width - bytes.len()];
    block.extend_from_slice(&bytes);
    Ok(block)
}

/// Decrypt a single decimal ciphertext token
pub fn decrypt_block(
    token: &str,
    private_key: &PrivateKey,
    layout: BlockLayout,
) -> RsaResult<Vec<u8>> {
    let plan = BlockPlan::new(&private_key.modulus, layout)?;
    decrypt_indexed(0, token, private_key, &plan)
}

/// Decrypt '/'-delimited ciphertext into raw bytes.
///
/// Space padding added to the final block at encryption time is kept.
pub fn decode_bytes(
    ciphertext: &str,
    private_key: &PrivateKey,
    layout: BlockLayout,
) -> RsaResult<Vec<u8>> {
    let plan = BlockPlan::new(&private_key.modulus, layout)?;

    let mut plaintext = Vec::new();
    let mut blocks = 0usize;
    for (index, token) in split_ciphertext(ciphertext.trim()).enumerate() {
        plaintext.extend(decrypt_indexed(index, token, private_key, &plan)?);
        blocks += 1;
    }

    debug!(
        "decrypted {} blocks into {} bytes ({:?} layout)",
        blocks,
        plaintext.len(),
        layout
    );
    Ok(plaintext)
}

/// Decrypt ciphertext to text with the default block layout
pub fn decode(ciphertext: &str, private_key: &PrivateKey) -> RsaResult<String> {
    decode_with(ciphertext, private_key, BlockLayout::default())
}

/// Decrypt ciphertext to text with an explicit block layout
pub fn decode_with(
    ciphertext: &str,
    private_key: &PrivateKey,
    layout: BlockLayout,
) -> RsaResult<String> {
    let bytes = decode_bytes(ciphertext, private_key, layout)?;
    String::from_utf8(bytes).map_err(|_| RsaError::InvalidUtf8)
}
