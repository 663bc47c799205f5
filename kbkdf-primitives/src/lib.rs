#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]
// JUSTIFICATION: Glob re-exports are intentional for module convenience API.
// This allows `use kbkdf_primitives::*` to bring in all public types.
#![allow(ambiguous_glob_reexports)]

//! # KBKDF Primitives
//!
//! NIST SP 800-108 Key-Based Key Derivation in Counter Mode, built on an
//! HMAC pseudorandom function.
//!
//! ## Modules
//!
//! - **kdf::counter**: the counter-mode engine ([`CounterKdf`], [`derive`])
//! - **kdf::fixed_input**: `Label || 0x00 || Context || [L]_2` encoding
//! - **kdf::params**: counter and length field widths
//! - **mac**: the [`Prf`] capability trait and HMAC-SHA2 implementations
//! - **security**: zeroizing byte containers
//! - **self_test**: power-up known answer tests
//!
//! ## Example
//!
//! ```rust
//! use kbkdf_primitives::{FieldWidth, PrfAlgorithm, derive};
//!
//! let ki = [0x42u8; 32];
//! let key = derive(&ki, &PrfAlgorithm::HmacSha256, b"label", b"context", 128, FieldWidth::Bits8)
//!     .expect("derivation succeeds");
//! assert_eq!(key.len(), 16);
//! ```

pub mod error;
pub mod kdf;
pub mod mac;
pub mod security;

pub use error::{KdfError, Result};
pub use kdf::*;
pub use mac::*;
pub use security::SecureBytes;
