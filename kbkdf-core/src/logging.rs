//! # Logging Utilities
//!
//! Structured logging via `tracing` that never prints key material.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use kbkdf_core::logging::{init_tracing, sanitize_data};
//!
//! // Sets the global subscriber, call once per process
//! init_tracing().expect("Failed to init tracing");
//!
//! let ki = [0u8; 32];
//! tracing::info!("Derivation key loaded: {}", sanitize_data(&ki));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

use sha2::{Digest, Sha256};
use std::fmt;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter directive used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "kbkdf=info";

/// Initialize tracing for the process.
///
/// Filtering comes from `RUST_LOG`, falling back to [`DEFAULT_FILTER`].
/// Output goes to stderr so stdout stays reserved for results.
///
/// # Errors
///
/// Returns an error if the tracing subscriber cannot be initialized,
/// typically due to a subscriber already being set.
pub fn init_tracing() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_thread_names(false)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init()?;

    info!("kbkdf logging initialized");
    Ok(())
}

/// Wrap bytes so they can be logged without revealing their content.
#[must_use]
pub fn sanitize_data(data: &[u8]) -> SanitizedData<'_> {
    SanitizedData(data)
}

/// Wrapper type for sanitized data display
pub struct SanitizedData<'a>(&'a [u8]);

impl fmt::Display for SanitizedData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short inputs are likely secrets themselves, show length only
        if self.0.len() <= 32 {
            write!(f, "[{} bytes]", self.0.len())
        } else {
            let hash = sha256_fingerprint(self.0);
            write!(f, "[{} bytes, hash: {}]", self.0.len(), &hash[..16])
        }
    }
}

impl fmt::Debug for SanitizedData<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

fn sha256_fingerprint(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Tests use unwrap for simplicity
mod tests {
    use super::*;

    #[test]
    fn test_short_data_shows_length_only() {
        let secret = [0x42u8; 32];
        let shown = sanitize_data(&secret).to_string();
        assert_eq!(shown, "[32 bytes]");
    }

    #[test]
    fn test_long_data_shows_fingerprint() {
        let data = [0x42u8; 33];
        let shown = sanitize_data(&data).to_string();
        assert!(shown.starts_with("[33 bytes, hash: "));
        assert!(!shown.contains("4242"));
        // 16 hex chars of fingerprint
        let hash = shown.trim_start_matches("[33 bytes, hash: ").trim_end_matches(']');
        assert_eq!(hash.len(), 16);
        assert!(hash.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let data = vec![7u8; 64];
        assert_eq!(sanitize_data(&data).to_string(), sanitize_data(&data).to_string());
        assert_eq!(format!("{:?}", sanitize_data(&data)), sanitize_data(&data).to_string());
    }

    #[test]
    fn test_empty_data() {
        assert_eq!(sanitize_data(&[]).to_string(), "[0 bytes]");
    }
}
