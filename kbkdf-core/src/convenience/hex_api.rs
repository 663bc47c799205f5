#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

use tracing::debug;
use zeroize::Zeroizing;

use crate::config::KbkdfConfig;
use crate::error::{CoreError, Result};
use crate::logging::sanitize_data;

/// Decode a hex input, naming the field in the error.
///
/// Accepts upper or lower case. Surrounding whitespace is ignored.
///
/// # Errors
///
/// Returns `CoreError::HexDecode` if `value` is not valid hex.
pub fn decode_hex(field: &'static str, value: &str) -> Result<Vec<u8>> {
    hex::decode(value.trim()).map_err(|source| CoreError::HexDecode { field, source })
}

/// Derive `requested_bits` of key material from hex inputs.
///
/// The result is upper-case hex without separators. The decoded key is
/// wiped when this function returns.
///
/// # Errors
///
/// Returns `CoreError::HexDecode` for a malformed input, otherwise whatever
/// [`KbkdfConfig::derive`] returns.
pub fn derive_hex(
    ki_hex: &str,
    label_hex: &str,
    context_hex: &str,
    requested_bits: u32,
    config: &KbkdfConfig,
) -> Result<Zeroizing<String>> {
    let ki = Zeroizing::new(decode_hex("KI", ki_hex)?);
    let label = decode_hex("Label", label_hex)?;
    let context = decode_hex("Context", context_hex)?;
    debug!(
        ki = %sanitize_data(&ki),
        label_len = label.len(),
        context_len = context.len(),
        "Decoded hex inputs"
    );

    let key = config.derive(&ki, &label, &context, requested_bits)?;
    Ok(Zeroizing::new(hex::encode_upper(key.key())))
}

/// Format bytes as colon-separated upper-case hex pairs, e.g. `CA:A0:7B`.
#[must_use]
pub fn to_colon_hex(bytes: &[u8]) -> String {
    let digits = Zeroizing::new(hex::encode_upper(bytes));
    let mut out = String::with_capacity(bytes.len().saturating_mul(3));
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && i % 2 == 0 {
            out.push(':');
        }
        out.push(digit);
    }
    out
}
