//! # kbkdf-validation
//!
//! NIST CAVP validation for the SP 800-108 counter-mode KDF.
//!
//! - [`cavp::parse_rsp`] reads `KDFCTR_gen.rsp`-style response files
//! - [`cavp::official_vectors`] returns the vectors embedded in this crate
//! - [`cavp::CavpRunner`] runs vectors against the engine and produces a
//!   [`cavp::CavpReport`]
//!
//! ```rust
//! use kbkdf_validation::cavp::{CavpRunner, official_vectors};
//!
//! let report = CavpRunner::new().run(&official_vectors()?);
//! assert!(report.all_passed());
//! # Ok::<(), kbkdf_validation::CavpError>(())
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

pub mod cavp;
pub mod error;

pub use error::{CavpError, Result};
