//! Convenience API for hex-in, hex-out derivations
//!
//! Wraps the engine for callers that hold their inputs as hex strings, such
//! as test-vector files, JSON requests and the demo binary.
//!
//! ```rust
//! use kbkdf_core::{KbkdfConfig, derive_hex};
//! use kbkdf_primitives::FieldWidth;
//!
//! let config = KbkdfConfig::new().with_counter_width(FieldWidth::Bits8);
//! let ko = derive_hex(
//!     "3edc6b5b8f7aadbd713732b482b8f979286e1ea3b8f8f99c30c884cfe3349b83",
//!     "deadbeef",
//!     "deadbeef",
//!     128,
//!     &config,
//! )?;
//! assert_eq!(&*ko, "CAA07B1B05AB7C8D26CBF18DE433BFA9");
//! # Ok::<(), kbkdf_core::CoreError>(())
//! ```

mod hex_api;
mod request;

pub use hex_api::{decode_hex, derive_hex, to_colon_hex};
pub use request::DerivationRequest;
