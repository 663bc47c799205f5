//! Configuration types for counter-mode key derivation.
//!
//! A [`KbkdfConfig`] is built once, validated, and then turned into an
//! immutable [`CounterKdf`]. Nothing about a derivation is configured by
//! mutating shared state between calls.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

use crate::error::{CoreError, Result};
use kbkdf_primitives::{
    CounterKdf, DerivedKey, FieldWidth, FixedInputEncoding, KdfError, PrfAlgorithm,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Largest accepted value for [`KbkdfConfig::min_key_length`].
pub const MAX_MIN_KEY_LENGTH: usize = 4096;

/// Key derivation settings.
///
/// # Examples
/// ```rust
/// use kbkdf_core::config::KbkdfConfig;
/// use kbkdf_primitives::{FieldWidth, PrfAlgorithm};
///
/// let config = KbkdfConfig::new()
///     .with_prf(PrfAlgorithm::HmacSha384)
///     .with_counter_width(FieldWidth::Bits8)
///     .with_min_key_length(16)
///     .build()
///     .expect("valid configuration");
///
/// let key = config.derive(&[7u8; 32], b"label", b"context", 256).expect("derivation");
/// assert_eq!(key.len(), 32);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KbkdfConfig {
    /// PRF used for every block.
    ///
    /// Default: `PrfAlgorithm::HmacSha256`
    pub prf: PrfAlgorithm,

    /// Width of the `[i]_2` counter.
    ///
    /// Default: 32 bits
    pub counter_width: FieldWidth,

    /// Whether a `0x00` byte separates label and context.
    ///
    /// Default: `true`
    pub separator: bool,

    /// Width of the trailing `[L]_2` field, `None` to omit it.
    ///
    /// Default: 32 bits
    pub length_width: Option<FieldWidth>,

    /// Shortest key-derivation key accepted, in bytes.
    ///
    /// Default: `1`
    pub min_key_length: usize,

    /// Whether strict validation is enabled.
    ///
    /// Rejects layouts where label and context cannot be told apart.
    /// Default: `true`
    pub strict_validation: bool,
}

impl Default for KbkdfConfig {
    fn default() -> Self {
        Self {
            prf: PrfAlgorithm::HmacSha256,
            counter_width: FieldWidth::Bits32,
            separator: true,
            length_width: Some(FieldWidth::Bits32),
            min_key_length: 1,
            strict_validation: true,
        }
    }
}

impl KbkdfConfig {
    /// Create a new configuration with the SP 800-108 defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration for NIST CAVP counter-mode vectors.
    ///
    /// CAVP supplies the fixed input as one opaque blob, so the label/context
    /// layout is switched off and only the counter width matters. Use with
    /// [`KbkdfConfig::derive_with_fixed_input`].
    #[must_use]
    pub fn for_cavp_counter(counter_width: FieldWidth) -> Self {
        Self::default()
            .with_counter_width(counter_width)
            .with_separator(false)
            .with_length_width(None)
            .with_strict_validation(false)
    }

    /// Configuration matching the OpenSSL KBKDF counter-mode defaults:
    /// HMAC-SHA256, 32-bit counter, separator, 32-bit `[L]_2`.
    #[must_use]
    pub fn for_openssl_compat() -> Self {
        Self::default()
    }

    /// Set the PRF and return self for method chaining.
    #[must_use]
    pub fn with_prf(mut self, prf: PrfAlgorithm) -> Self {
        self.prf = prf;
        self
    }

    /// Set the counter width and return self for method chaining.
    #[must_use]
    pub fn with_counter_width(mut self, counter_width: FieldWidth) -> Self {
        self.counter_width = counter_width;
        self
    }

    /// Set the separator flag and return self for method chaining.
    #[must_use]
    pub fn with_separator(mut self, separator: bool) -> Self {
        self.separator = separator;
        self
    }

    /// Set the `[L]_2` width and return self for method chaining.
    #[must_use]
    pub fn with_length_width(mut self, length_width: Option<FieldWidth>) -> Self {
        self.length_width = length_width;
        self
    }

    /// Set the minimum key length and return self for method chaining.
    #[must_use]
    pub fn with_min_key_length(mut self, min_key_length: usize) -> Self {
        self.min_key_length = min_key_length;
        self
    }

    /// Set strict validation and return self for method chaining.
    #[must_use]
    pub fn with_strict_validation(mut self, enabled: bool) -> Self {
        self.strict_validation = enabled;
        self
    }

    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// See [`KbkdfConfig::validate`].
    pub fn build(self) -> Result<Self> {
        self.validate()?;
        Ok(self)
    }

    /// Validates the configuration settings.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ConfigurationError` if:
    /// - `min_key_length` exceeds [`MAX_MIN_KEY_LENGTH`]
    /// - strict validation is on and `min_key_length` is zero
    /// - strict validation is on and both the separator and `[L]_2` are omitted
    pub fn validate(&self) -> Result<()> {
        if self.min_key_length > MAX_MIN_KEY_LENGTH {
            return Err(CoreError::ConfigurationError(format!(
                "min_key_length {} exceeds maximum of {}",
                self.min_key_length, MAX_MIN_KEY_LENGTH
            )));
        }

        if self.strict_validation {
            if self.min_key_length == 0 {
                return Err(CoreError::ConfigurationError(
                    "Strict validation requires min_key_length of at least 1".to_string(),
                ));
            }

            if !self.separator && self.length_width.is_none() {
                return Err(CoreError::ConfigurationError(
                    "Strict validation requires a separator or an [L]_2 field".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Fixed input layout described by this configuration.
    #[must_use]
    pub fn encoding(&self) -> FixedInputEncoding {
        FixedInputEncoding { separator: self.separator, length_width: self.length_width }
    }

    /// Immutable engine instance for this configuration.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ConfigurationError` if [`KbkdfConfig::validate`] fails.
    pub fn to_kdf(&self) -> Result<CounterKdf<PrfAlgorithm>> {
        self.validate()?;
        Ok(CounterKdf::new(self.prf)
            .with_counter_width(self.counter_width)
            .with_encoding(self.encoding()))
    }

    /// Derive key material under this configuration.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::ConfigurationError` if the configuration does not
    /// validate, `CoreError::Kdf` wrapping the engine error, or
    /// `KdfError::InvalidKey` if `ki` is shorter than `min_key_length`.
    pub fn derive(
        &self,
        ki: &[u8],
        label: &[u8],
        context: &[u8],
        requested_bits: u32,
    ) -> Result<DerivedKey> {
        let kdf = self.to_kdf()?;
        self.check_key_length(ki)?;
        Ok(kdf.derive(ki, label, context, requested_bits)?)
    }

    /// Derive key material from a verbatim fixed input under this configuration.
    ///
    /// # Errors
    ///
    /// Same as [`KbkdfConfig::derive`].
    pub fn derive_with_fixed_input(
        &self,
        ki: &[u8],
        fixed_input: &[u8],
        requested_bits: u32,
    ) -> Result<DerivedKey> {
        let kdf = self.to_kdf()?;
        self.check_key_length(ki)?;
        Ok(kdf.derive_with_fixed_input(ki, fixed_input, requested_bits)?)
    }

    fn check_key_length(&self, ki: &[u8]) -> Result<()> {
        if !ki.is_empty() && ki.len() < self.min_key_length {
            return Err(KdfError::InvalidKey(format!(
                "Key-derivation key is {} bytes, configuration requires at least {}",
                ki.len(),
                self.min_key_length
            ))
            .into());
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration.
    ///
    /// Missing fields take their default values.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Serialization` for malformed JSON and
    /// `CoreError::ConfigurationError` if validation fails.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.build()
    }

    /// Load and validate a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Io` if the file cannot be read, otherwise as
    /// [`KbkdfConfig::from_json_str`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Serialize to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Serialization` if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
