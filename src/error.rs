//! Top-level error type for sessions and the command line

use thiserror::Error;

use crate::rsa::RsaError;
use crate::transport::TransportError;
use crate::util::file_ops::FileError;

/// Every failure a session operation can report
#[derive(Debug, Error)]
pub enum Error {
    /// A required path was not chosen
    #[error("No {0} selected")]
    MissingSelection(&'static str),

    #[error("Nothing to encrypt: the plaintext is empty")]
    EmptyPlaintext,

    #[error(transparent)]
    Rsa(#[from] RsaError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    File(#[from] FileError),
}

impl Error {
    /// Short heading shown above the message
    pub fn title(&self) -> &'static str {
        match self {
            Error::MissingSelection(_) | Error::EmptyPlaintext => "Invalid input",
            Error::Rsa(RsaError::MalformedCiphertext { .. })
            | Error::Rsa(RsaError::BlockOutOfRange { .. })
            | Error::Rsa(RsaError::BlockOverflow { .. })
            | Error::Rsa(RsaError::InvalidUtf8)
            | Error::Transport(TransportError::InvalidBase64(_)) => "Decryption error",
            Error::Rsa(RsaError::ModulusTooSmall(_)) => "Encryption error",
            Error::Rsa(_) => "Key generation error",
            Error::Transport(_) => "Key file error",
            Error::File(_) => "File error",
        }
    }
}

/// Result type for session operations
pub type Result<T> = std::result::Result<T, Error>;
