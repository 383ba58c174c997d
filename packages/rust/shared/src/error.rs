//! Error types for Awesauce.
//!
//! Library crates use [`AwesauceError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! A non-2xx response from the CMS is *not* an error: content operations
//! report it as `None` or an empty list. Errors are reserved for transport
//! failures and bodies that cannot be decoded.

use std::path::PathBuf;

/// Top-level error type for all Awesauce operations.
#[derive(Debug, thiserror::Error)]
pub enum AwesauceError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Network/HTTP failure raised by the transport (DNS, connect, timeout).
    #[error("transport error: {0}")]
    Transport(String),

    /// A request was issued before any transport was configured.
    #[error("no transport configured; supply one before issuing requests")]
    MissingTransport,

    /// A successful response whose body does not have the expected shape.
    #[error("decode error: {message}")]
    Decode { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Data validation error (bad URL, invalid argument, etc.).
    #[error("validation error: {message}")]
    Validation { message: String },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, AwesauceError>;

impl AwesauceError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a decode error from any displayable message.
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode {
            message: msg.into(),
        }
    }

    /// Create a validation error from any displayable message.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
