//! Error types for kbkdf-core operations.
//!
//! Wraps engine failures and adds the errors of the layers around the
//! engine: hex decoding, configuration validation and JSON loading.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

use kbkdf_primitives::KdfError;
use thiserror::Error;

/// Errors that can occur in kbkdf-core operations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The derivation itself failed.
    #[error(transparent)]
    Kdf(#[from] KdfError),

    /// An input was not valid hexadecimal.
    #[error("Invalid hex in {field}: {source}")]
    HexDecode {
        /// Which input failed to decode
        field: &'static str,
        /// Underlying decode error
        #[source]
        source: hex::FromHexError,
    },

    /// Configuration validation error.
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Configuration could not be read from disk.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration or request JSON was malformed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for kbkdf-core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
