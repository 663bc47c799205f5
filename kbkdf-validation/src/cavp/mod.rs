//! CAVP (Cryptographic Algorithm Validation Program) support for KDFCTR
//!
//! SP 800-108 counter-mode vectors are published as `.rsp` text files
//! grouped into sections by PRF, counter location and counter width.
//! Only `CTRLOCATION=BEFORE_FIXED` sections with an HMAC-SHA2 PRF are
//! loaded, the rest are skipped.

pub mod rsp;
pub mod runner;
pub mod types;
pub mod vectors;

pub use rsp::{parse_rsp, parse_rsp_file};
pub use runner::CavpRunner;
pub use types::{CavpKbkdfVector, CavpReport, CavpTestResult};
pub use vectors::official_vectors;
