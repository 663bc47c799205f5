//! # kbkdf-core
//!
//! Configuration, logging and convenience layer over
//! [`kbkdf_primitives`]' SP 800-108 counter-mode KDF.
//!
//! ## Quick Start
//!
//! ```rust
//! use kbkdf_core::{KbkdfConfig, logging::sanitize_data};
//!
//! let config = KbkdfConfig::new().build()?;
//! let key = config.derive(&[0x0b; 32], b"encryption", b"session-42", 256)?;
//! tracing::debug!("derived {}", sanitize_data(key.key()));
//! assert_eq!(key.len(), 32);
//! # Ok::<(), kbkdf_core::CoreError>(())
//! ```
//!
//! ## Modules
//!
//! - [`config`]: validated [`KbkdfConfig`], JSON loading and presets
//! - [`convenience`]: hex-string entry points and [`DerivationRequest`]
//! - [`logging`]: tracing setup and [`sanitize_data`](logging::sanitize_data)
//! - [`error`]: [`CoreError`]

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

pub mod config;
pub mod convenience;
pub mod error;
pub mod logging;

pub use config::KbkdfConfig;
pub use convenience::{DerivationRequest, decode_hex, derive_hex, to_colon_hex};
pub use error::{CoreError, Result};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
