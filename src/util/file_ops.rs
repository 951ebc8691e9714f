// File Operations for RSA Encryption/Decryption
// Reads plaintext, writes armored ciphertext and decrypted text

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur during file operations
#[derive(Debug, Error)]
pub enum FileError {
    #[error("Could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} is not a directory", .0.display())]
    NotADirectory(PathBuf),

    #[error("{} is not valid UTF-8 text", .0.display())]
    NotText(PathBuf),
}

/// Result type for file operations
pub type FileResult<T> = Result<T, FileError>;

/// Read entire file into memory
pub fn read_bytes(path: &Path) -> FileResult<Vec<u8>> {
    fs::read(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Write data to file, replacing any existing contents
pub fn write_bytes(path: &Path, data: &[u8]) -> FileResult<()> {
    fs::write(path, data).map_err(|source| FileError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Read entire file as UTF-8 text
pub fn read_text(path: &Path) -> FileResult<String> {
    let data = read_bytes(path)?;
    String::from_utf8(data).map_err(|_| FileError::NotText(path.to_path_buf()))
}

/// Write text to file, replacing any existing contents
pub fn write_text(path: &Path, text: &str) -> FileResult<()> {
    write_bytes(path, text.as_bytes())
}

/// Create a directory (and parents) if missing
pub fn ensure_dir(path: &Path) -> FileResult<()> {
    if path.exists() && !path.is_dir() {
        return Err(FileError::NotADirectory(path.to_path_buf()));
    }
    fs::create_dir_all(path).map_err(|source| FileError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Get file size in bytes
pub fn get_file_size(path: &Path) -> FileResult<u64> {
    let metadata = fs::metadata(path).map_err(|source| FileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(metadata.len())
}

/// Format file size for display
pub fn format_file_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    if bytes >= GB {
        format!("{:.2} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
