//! Counter and length field widths
//!
//! SP 800-108 lets an implementation encode the counter `[i]_2` and the
//! output length `[L]_2` as big-endian integers of 8, 16, 24 or 32 bits.

use crate::error::{KdfError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Width of a big-endian integer field in the PRF input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum FieldWidth {
    /// 8-bit field
    Bits8,
    /// 16-bit field
    Bits16,
    /// 24-bit field
    Bits24,
    /// 32-bit field
    Bits32,
}

/// Width of the KBKDF counter `[i]_2`.
pub type CounterWidth = FieldWidth;

impl FieldWidth {
    /// Every supported width, narrowest first.
    pub const ALL: [FieldWidth; 4] =
        [FieldWidth::Bits8, FieldWidth::Bits16, FieldWidth::Bits24, FieldWidth::Bits32];

    /// Width in bits.
    #[must_use]
    pub const fn bits(self) -> u32 {
        match self {
            FieldWidth::Bits8 => 8,
            FieldWidth::Bits16 => 16,
            FieldWidth::Bits24 => 24,
            FieldWidth::Bits32 => 32,
        }
    }

    /// Width in bytes.
    #[must_use]
    pub const fn bytes(self) -> usize {
        match self {
            FieldWidth::Bits8 => 1,
            FieldWidth::Bits16 => 2,
            FieldWidth::Bits24 => 3,
            FieldWidth::Bits32 => 4,
        }
    }

    /// Largest value the field can hold, `2^bits - 1`.
    #[must_use]
    pub const fn max_value(self) -> u32 {
        match self {
            FieldWidth::Bits8 => 0xFF,
            FieldWidth::Bits16 => 0xFFFF,
            FieldWidth::Bits24 => 0x00FF_FFFF,
            FieldWidth::Bits32 => u32::MAX,
        }
    }

    /// Whether `value` is representable without truncation.
    #[must_use]
    pub fn fits(self, value: u64) -> bool {
        value <= u64::from(self.max_value())
    }

    /// Append the low `bits()` bits of `value` in big-endian order.
    ///
    /// Callers check [`FieldWidth::fits`] first; higher bits are dropped.
    pub(crate) fn write_be(self, value: u32, out: &mut Vec<u8>) {
        let [b0, b1, b2, b3] = value.to_be_bytes();
        match self {
            FieldWidth::Bits8 => out.push(b3),
            FieldWidth::Bits16 => out.extend_from_slice(&[b2, b3]),
            FieldWidth::Bits24 => out.extend_from_slice(&[b1, b2, b3]),
            FieldWidth::Bits32 => out.extend_from_slice(&[b0, b1, b2, b3]),
        }
    }
}

impl TryFrom<u32> for FieldWidth {
    type Error = KdfError;

    fn try_from(bits: u32) -> Result<Self> {
        match bits {
            8 => Ok(FieldWidth::Bits8),
            16 => Ok(FieldWidth::Bits16),
            24 => Ok(FieldWidth::Bits24),
            32 => Ok(FieldWidth::Bits32),
            other => Err(KdfError::InvalidParameter(format!(
                "Unsupported field width: {} bits (expected 8, 16, 24 or 32)",
                other
            ))),
        }
    }
}

impl From<FieldWidth> for u32 {
    fn from(width: FieldWidth) -> Self {
        width.bits()
    }
}

impl fmt::Display for FieldWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Tests use unwrap for simplicity
mod tests {
    use super::*;

    #[test]
    fn test_write_be_per_width() {
        let mut out = Vec::new();
        FieldWidth::Bits8.write_be(0x01, &mut out);
        assert_eq!(out, [0x01]);

        out.clear();
        FieldWidth::Bits16.write_be(0x0102, &mut out);
        assert_eq!(out, [0x01, 0x02]);

        out.clear();
        FieldWidth::Bits24.write_be(0x0001_0203, &mut out);
        assert_eq!(out, [0x01, 0x02, 0x03]);

        out.clear();
        FieldWidth::Bits32.write_be(0x0102_0304, &mut out);
        assert_eq!(out, [0x01, 0x02, 0x03, 0x04]);
    }

    #[test]
    fn test_max_value_and_fits() {
        assert_eq!(FieldWidth::Bits8.max_value(), 255);
        assert!(FieldWidth::Bits8.fits(255));
        assert!(!FieldWidth::Bits8.fits(256));
        assert!(FieldWidth::Bits24.fits(0x00FF_FFFF));
        assert!(!FieldWidth::Bits24.fits(0x0100_0000));
        assert!(FieldWidth::Bits32.fits(u64::from(u32::MAX)));
        assert!(!FieldWidth::Bits32.fits(u64::from(u32::MAX) + 1));
    }

    #[test]
    fn test_bytes_consistent_with_bits() {
        for width in FieldWidth::ALL {
            assert_eq!(width.bytes() * 8, width.bits() as usize);
        }
    }

    #[test]
    fn test_try_from_u32() {
        assert_eq!(FieldWidth::try_from(8).unwrap(), FieldWidth::Bits8);
        assert_eq!(FieldWidth::try_from(32).unwrap(), FieldWidth::Bits32);
        assert!(matches!(FieldWidth::try_from(12), Err(KdfError::InvalidParameter(_))));
        assert!(FieldWidth::try_from(64).is_err());
    }

    #[test]
    fn test_serde_as_bit_count() {
        assert_eq!(serde_json::to_string(&FieldWidth::Bits24).unwrap(), "24");
        let width: FieldWidth = serde_json::from_str("16").unwrap();
        assert_eq!(width, FieldWidth::Bits16);
        assert!(serde_json::from_str::<FieldWidth>("20").is_err());
    }
}
