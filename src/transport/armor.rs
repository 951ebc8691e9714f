// Ciphertext Armor
// Base64 wrapping of the '/'-delimited block text for storage

use base64::{engine::general_purpose::STANDARD, Engine};

use super::{TransportError, TransportResult};
use crate::rsa::EncryptedMessage;

/// Encode ciphertext as padded standard base64
pub fn armor(message: &EncryptedMessage) -> String {
    STANDARD.encode(message.as_str())
}

/// Decode base64 text back into ciphertext. Surrounding whitespace is ignored.
pub fn unarmor(text: &str) -> TransportResult<EncryptedMessage> {
    let bytes = STANDARD
        .decode(text.trim())
        .map_err(|e| TransportError::InvalidBase64(e.to_string()))?;
    let decoded = String::from_utf8(bytes)
        .map_err(|_| TransportError::InvalidBase64("payload is not UTF-8".to_string()))?;
    Ok(EncryptedMessage::from(decoded))
}
