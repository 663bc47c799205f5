//! Error types for CAVP validation.

use kbkdf_primitives::KdfError;
use thiserror::Error;

/// Errors from loading or running CAVP vectors.
#[derive(Debug, Error)]
pub enum CavpError {
    /// The response file could not be parsed.
    #[error("Parse error at line {line}: {message}")]
    Parse {
        /// 1-based line number
        line: usize,
        /// What was wrong
        message: String,
    },

    /// An embedded or serialized vector had invalid hex.
    #[error("Invalid hex in vector {vector_id}: {source}")]
    Hex {
        /// Vector identifier
        vector_id: String,
        /// Underlying decode error
        #[source]
        source: hex::FromHexError,
    },

    /// The engine rejected the vector's parameters.
    #[error(transparent)]
    Kdf(#[from] KdfError),

    /// Vector JSON was malformed.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A vector file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CavpError {
    pub(crate) fn parse(line: usize, message: impl Into<String>) -> Self {
        CavpError::Parse { line, message: message.into() }
    }
}

/// Result type alias for CAVP validation.
pub type Result<T> = std::result::Result<T, CavpError>;
