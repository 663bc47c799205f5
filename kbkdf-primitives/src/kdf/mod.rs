#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! Key Derivation Functions
//!
//! ## Supported Algorithms
//!
//! - **SP 800-108 Counter KDF**: KBKDF in counter mode, counter before the
//!   fixed input, HMAC-SHA256/384/512 as PRF

pub mod counter;
pub mod fixed_input;
pub mod params;

pub use counter::*;
pub use fixed_input::*;
pub use params::*;
