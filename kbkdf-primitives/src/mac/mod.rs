#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Pseudorandom Functions
//!
//! The counter-mode engine reaches its PRF only through the [`Prf`] trait.
//! HMAC over SHA-256, SHA-384 and SHA-512 is provided by [`PrfAlgorithm`].

pub mod hmac_sha2;
pub mod prf;

pub use self::hmac_sha2::*;
pub use self::prf::*;
