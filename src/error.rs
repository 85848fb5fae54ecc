//! Centralized error types for mimetree.
//!
//! Decoding itself never fails: malformed tokens, unknown charsets and broken
//! multipart structure are all recovered locally. These errors cover the
//! surfaces around the decoder (reading files, configuration, rendering).

use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the mimetree library.
#[derive(Error, Debug)]
pub enum MimeError {
    /// I/O error with the associated file path.
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The specified file does not exist.
    #[error("Message file not found: {0}")]
    FileNotFound(PathBuf),

    /// The file exists but contains no bytes.
    #[error("Message file is empty: {0}")]
    EmptyMessage(PathBuf),

    /// The configuration file could not be read or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Rendering the decoded tree failed.
    #[error("Output error: {0}")]
    Output(String),
}

/// Convenience alias for `Result<T, MimeError>`.
pub type Result<T> = std::result::Result<T, MimeError>;

impl MimeError {
    /// Create an `Io` variant from a path and an `io::Error`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Allow `?` on `std::io::Error` when no path context is available
/// (reading stdin, writing stdout).
impl From<std::io::Error> for MimeError {
    fn from(source: std::io::Error) -> Self {
        Self::Io {
            path: PathBuf::from("<stdio>"),
            source,
        }
    }
}

impl From<serde_json::Error> for MimeError {
    fn from(e: serde_json::Error) -> Self {
        Self::Output(e.to_string())
    }
}
