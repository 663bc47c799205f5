#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! CAVP vector and result types

use chrono::{DateTime, Utc};
use kbkdf_primitives::{CounterKdf, FieldWidth, PrfAlgorithm};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::Result;

/// Serde adapter storing byte fields as lower-case hex strings.
mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        bytes: impl AsRef<[u8]>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let s = String::deserialize(deserializer)?;
        hex::decode(s.trim()).map_err(serde::de::Error::custom)
    }
}

/// One KDFCTR vector with the counter before the fixed input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CavpKbkdfVector {
    /// Vector identifier, e.g. `HMAC_SHA256/RLEN=8/COUNT=0`
    pub id: String,
    /// PRF from the `[PRF=...]` section
    pub prf: PrfAlgorithm,
    /// Counter width from the `[RLEN=..._BITS]` section
    pub counter_width: FieldWidth,
    /// Output length `L` in bits
    pub l_bits: u32,
    /// Key-derivation key
    #[serde(with = "hex_bytes")]
    pub ki: Vec<u8>,
    /// Fixed input data, used verbatim
    #[serde(with = "hex_bytes")]
    pub fixed_input: Vec<u8>,
    /// Expected derived key
    #[serde(with = "hex_bytes")]
    pub expected_ko: Vec<u8>,
}

impl CavpKbkdfVector {
    /// Build the vector identifier used by the parser and the embedded set.
    #[must_use]
    pub fn make_id(prf: PrfAlgorithm, counter_width: FieldWidth, count: u32) -> String {
        format!("{}/RLEN={}/COUNT={}", prf.cavp_name(), counter_width.bits(), count)
    }

    /// Engine configured for this vector.
    #[must_use]
    pub fn kdf(&self) -> CounterKdf<PrfAlgorithm> {
        CounterKdf::new(self.prf).with_counter_width(self.counter_width)
    }

    /// Parse a list of vectors from JSON.
    ///
    /// # Errors
    /// Returns `CavpError::Serialization` for malformed JSON or hex.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Outcome of one vector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CavpTestResult {
    /// Vector identifier
    pub vector_id: String,
    /// PRF name
    pub algorithm: String,
    /// Whether the derived key matched
    pub passed: bool,
    /// Execution time
    pub execution_time: Duration,
    /// Test timestamp
    pub timestamp: DateTime<Utc>,
    /// Key produced, empty if the engine returned an error
    pub actual_result: Vec<u8>,
    /// Expected key from CAVP
    pub expected_result: Vec<u8>,
    /// Error message if the test failed
    pub error_message: Option<String>,
}

/// Results of a CAVP run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CavpReport {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// Wall-clock time of the run
    pub total_duration: Duration,
    /// Per-vector results, in input order
    pub results: Vec<CavpTestResult>,
}

impl CavpReport {
    /// Number of vectors run.
    #[must_use]
    pub fn total(&self) -> usize {
        self.results.len()
    }

    /// Number of vectors that passed.
    #[must_use]
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    /// Number of vectors that failed.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.total().saturating_sub(self.passed())
    }

    /// Pass rate as a percentage, `0.0` for an empty run.
    #[must_use]
    #[allow(clippy::cast_precision_loss)] // Precision loss acceptable for percentage display
    pub fn pass_rate(&self) -> f64 {
        if self.results.is_empty() {
            0.0
        } else {
            (self.passed() as f64 / self.total() as f64) * 100.0
        }
    }

    /// True if at least one vector ran and none failed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        !self.results.is_empty() && self.failed() == 0
    }

    /// Results of failed vectors.
    pub fn failures(&self) -> impl Iterator<Item = &CavpTestResult> {
        self.results.iter().filter(|r| !r.passed)
    }

    /// Serialize the report to pretty-printed JSON.
    ///
    /// # Errors
    /// Returns `CavpError::Serialization` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
