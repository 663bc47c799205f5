#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! CAVP test runner
//!
//! Runs vectors through [`CounterKdf::derive_with_fixed_input`] and records
//! a [`CavpTestResult`] per vector.
//!
//! [`CounterKdf::derive_with_fixed_input`]: kbkdf_primitives::CounterKdf::derive_with_fixed_input

use chrono::Utc;
use kbkdf_primitives::Prf;
use std::time::Instant;
use tracing::{info, warn};

use crate::cavp::rsp::parse_rsp;
use crate::cavp::types::{CavpKbkdfVector, CavpReport, CavpTestResult};
use crate::error::Result;

/// Runs CAVP KDFCTR vectors.
#[derive(Debug, Clone, Copy, Default)]
pub struct CavpRunner {
    stop_on_failure: bool,
}

impl CavpRunner {
    /// Create a runner that runs every vector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stop at the first failing vector.
    #[must_use]
    pub fn with_stop_on_failure(mut self, stop: bool) -> Self {
        self.stop_on_failure = stop;
        self
    }

    /// Run a single vector.
    #[must_use]
    pub fn run_vector(&self, vector: &CavpKbkdfVector) -> CavpTestResult {
        let timestamp = Utc::now();
        let start = Instant::now();
        let outcome =
            vector.kdf().derive_with_fixed_input(&vector.ki, &vector.fixed_input, vector.l_bits);
        let execution_time = start.elapsed();

        let (passed, actual_result, error_message) = match outcome {
            Ok(key) if key.ct_eq(&vector.expected_ko) => (true, key.key().to_vec(), None),
            Ok(key) => {
                (false, key.key().to_vec(), Some("Derived key does not match KO".to_string()))
            }
            Err(e) => (false, Vec::new(), Some(e.to_string())),
        };

        if !passed {
            warn!(vector = %vector.id, error = ?error_message, "CAVP vector failed");
        }

        CavpTestResult {
            vector_id: vector.id.clone(),
            algorithm: vector.prf.name().to_string(),
            passed,
            execution_time,
            timestamp,
            actual_result,
            expected_result: vector.expected_ko.clone(),
            error_message,
        }
    }

    /// Run every vector in order.
    #[must_use]
    pub fn run(&self, vectors: &[CavpKbkdfVector]) -> CavpReport {
        let started_at = Utc::now();
        let start = Instant::now();
        let mut results = Vec::with_capacity(vectors.len());

        for vector in vectors {
            let result = self.run_vector(vector);
            let failed = !result.passed;
            results.push(result);
            if failed && self.stop_on_failure {
                break;
            }
        }

        let report = CavpReport { started_at, total_duration: start.elapsed(), results };
        info!(
            total = report.total(),
            passed = report.passed(),
            failed = report.failed(),
            "CAVP run complete"
        );
        report
    }

    /// Parse a response file and run its vectors.
    ///
    /// # Errors
    /// Returns the parse error if `text` is not a valid response file.
    pub fn run_rsp(&self, text: &str) -> Result<CavpReport> {
        let vectors = parse_rsp(text)?;
        Ok(self.run(&vectors))
    }
}
