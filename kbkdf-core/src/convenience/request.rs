//! Serializable derivation requests.

use std::fmt;

use kbkdf_primitives::DerivedKey;
use serde::{Deserialize, Serialize};
use tracing::instrument;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::config::KbkdfConfig;
use crate::convenience::hex_api::decode_hex;
use crate::error::Result;

/// One derivation with hex-encoded inputs, as read from JSON.
///
/// ```json
/// { "ki": "3edc...9b83", "label": "deadbeef", "context": "deadbeef", "requested_bits": 128 }
/// ```
///
/// `label` and `context` default to empty. The key field is wiped on drop.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(deny_unknown_fields)]
pub struct DerivationRequest {
    /// Key-derivation key, hex
    pub ki: String,
    /// Label, hex
    #[serde(default)]
    pub label: String,
    /// Context, hex
    #[serde(default)]
    pub context: String,
    /// Output length in bits
    pub requested_bits: u32,
}

impl DerivationRequest {
    /// Create a request from hex inputs.
    #[must_use]
    pub fn new(
        ki: impl Into<String>,
        label: impl Into<String>,
        context: impl Into<String>,
        requested_bits: u32,
    ) -> Self {
        Self { ki: ki.into(), label: label.into(), context: context.into(), requested_bits }
    }

    /// Parse a request from JSON.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Serialization` for malformed JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Decode the inputs and derive under `config`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::HexDecode` for a malformed field, otherwise the
    /// error from [`KbkdfConfig::derive`].
    #[instrument(level = "debug", skip_all, fields(requested_bits = self.requested_bits))]
    pub fn derive_key(&self, config: &KbkdfConfig) -> Result<DerivedKey> {
        let ki = Zeroizing::new(decode_hex("KI", &self.ki)?);
        let label = decode_hex("Label", &self.label)?;
        let context = decode_hex("Context", &self.context)?;
        config.derive(&ki, &label, &context, self.requested_bits)
    }

    /// Derive and return the key as upper-case hex.
    ///
    /// # Errors
    ///
    /// Same as [`DerivationRequest::derive_key`].
    pub fn execute(&self, config: &KbkdfConfig) -> Result<Zeroizing<String>> {
        let key = self.derive_key(config)?;
        Ok(Zeroizing::new(hex::encode_upper(key.key())))
    }
}

impl fmt::Debug for DerivationRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivationRequest")
            .field("ki", &"[REDACTED]")
            .field("label", &self.label)
            .field("context", &self.context)
            .field("requested_bits", &self.requested_bits)
            .finish()
    }
}
