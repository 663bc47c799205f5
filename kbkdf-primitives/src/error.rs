//! Error types for kbkdf-primitives crate.

/// Errors that can occur during a counter-mode key derivation.
///
/// Every variant is terminal for the call that produced it: no key material
/// was derived and nothing is retried internally.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KdfError {
    /// The key-derivation key was empty or rejected by the PRF.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// The requested output length is zero or cannot be encoded.
    #[error("Invalid length: {0}")]
    InvalidLength(String),

    /// The derivation needs more PRF invocations than the counter can number.
    #[error(
        "Counter overflow: {required} PRF blocks required, a {counter_bits}-bit counter allows at most {max}"
    )]
    CounterOverflow {
        /// Number of PRF blocks the request needs
        required: u64,
        /// Largest counter value representable at the configured width
        max: u64,
        /// Configured counter width in bits
        counter_bits: u32,
    },

    /// The underlying MAC computation failed.
    #[error("PRF failure: {0}")]
    PrfFailure(String),

    /// A configuration value is outside the supported set.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A power-up known answer test did not reproduce its expected output.
    #[error("Self-test failed: {0}")]
    SelfTestFailed(String),
}

/// Result type alias for kbkdf-primitives operations.
pub type Result<T> = std::result::Result<T, KdfError>;
