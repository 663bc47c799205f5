//! Fixed input data encoding
//!
//! The non-counter part of every PRF input:
//!
//! ```text
//! FixedInput = Label || 0x00 || Context || [L]_2
//! ```
//!
//! The separator byte and the `[L]_2` field are both optional in SP 800-108,
//! and `[L]_2` may be narrower than 32 bits. CAVP vectors ship the whole
//! fixed input as one opaque blob, which the engine accepts verbatim through
//! [`CounterKdf::derive_with_fixed_input`](crate::kdf::CounterKdf::derive_with_fixed_input).

use crate::error::{KdfError, Result};
use crate::kdf::params::FieldWidth;
use serde::{Deserialize, Serialize};

/// Layout of `Label || 0x00 || Context || [L]_2`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FixedInputEncoding {
    /// Insert the `0x00` byte between label and context.
    pub separator: bool,
    /// Width of the trailing `[L]_2` field, or `None` to omit it.
    pub length_width: Option<FieldWidth>,
}

impl Default for FixedInputEncoding {
    fn default() -> Self {
        Self::SP800_108
    }
}

impl FixedInputEncoding {
    /// The common layout: separator present, 32-bit length field.
    pub const SP800_108: Self = Self { separator: true, length_width: Some(FieldWidth::Bits32) };

    /// Set whether the separator byte is written.
    #[must_use]
    pub fn with_separator(mut self, separator: bool) -> Self {
        self.separator = separator;
        self
    }

    /// Set the `[L]_2` width, `None` drops the field.
    #[must_use]
    pub fn with_length_width(mut self, length_width: Option<FieldWidth>) -> Self {
        self.length_width = length_width;
        self
    }

    /// Number of bytes [`FixedInputEncoding::encode`] produces.
    #[must_use]
    pub fn encoded_len(&self, label: &[u8], context: &[u8]) -> usize {
        label
            .len()
            .saturating_add(usize::from(self.separator))
            .saturating_add(context.len())
            .saturating_add(self.length_width.map_or(0, FieldWidth::bytes))
    }

    /// Build the fixed input for a request of `requested_bits`.
    ///
    /// # Errors
    /// Returns `KdfError::InvalidLength` if `requested_bits` does not fit the
    /// configured `[L]_2` width.
    pub fn encode(&self, label: &[u8], context: &[u8], requested_bits: u32) -> Result<Vec<u8>> {
        if let Some(width) = self.length_width {
            if !width.fits(u64::from(requested_bits)) {
                return Err(KdfError::InvalidLength(format!(
                    "Output length {} bits does not fit a {} length field",
                    requested_bits, width
                )));
            }
        }

        let mut fixed = Vec::with_capacity(self.encoded_len(label, context));
        fixed.extend_from_slice(label);
        if self.separator {
            fixed.push(0x00);
        }
        fixed.extend_from_slice(context);
        if let Some(width) = self.length_width {
            width.write_be(requested_bits, &mut fixed);
        }
        Ok(fixed)
    }
}
