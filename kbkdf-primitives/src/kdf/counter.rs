#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! SP 800-108: KDF in Counter Mode
//!
//! NIST SP 800-108 specifies key derivation using pseudorandom functions.
//! This module provides the counter mode KDF with the counter placed before
//! the fixed input data:
//!
//! ```text
//! K(i) = PRF(KI, [i]_r || FixedInput)        for i = 1..=n
//! n    = ceil(L / h)
//! KO   = leftmost L bits of K(1) || K(2) || ... || K(n)
//! ```
//!
//! Where:
//! - KI: key-derivation key
//! - r: counter width (8, 16, 24 or 32 bits), big-endian
//! - FixedInput: `Label || 0x00 || Context || [L]_2` by default
//! - L: requested output length in bits
//! - h: PRF output length in bits
//!
//! The counter never wraps: a request that needs more than `2^r - 1` blocks
//! fails with [`KdfError::CounterOverflow`] before any PRF call.

use crate::error::{KdfError, Result};
use crate::kdf::fixed_input::FixedInputEncoding;
use crate::kdf::params::FieldWidth;
use crate::mac::{Prf, PrfAlgorithm};
use subtle::ConstantTimeEq;
use tracing::{instrument, warn};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Output keying material of one derivation.
///
/// Holds exactly `ceil(bit_length / 8)` bytes. When `bit_length` is not a
/// multiple of 8 the unused low-order bits of the final byte are zero.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: Vec<u8>,
    bit_length: u32,
}

impl DerivedKey {
    /// Get the derived key bytes
    #[must_use]
    pub fn key(&self) -> &[u8] {
        &self.key
    }

    /// Requested output length in bits
    #[must_use]
    pub fn bit_length(&self) -> u32 {
        self.bit_length
    }

    /// Output length in bytes
    #[must_use]
    pub fn len(&self) -> usize {
        self.key.len()
    }

    /// Always false for a successfully derived key
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }

    /// Constant-time comparison against expected key material
    #[must_use]
    pub fn ct_eq(&self, expected: &[u8]) -> bool {
        self.key.as_slice().ct_eq(expected).into()
    }
}

impl AsRef<[u8]> for DerivedKey {
    fn as_ref(&self) -> &[u8] {
        &self.key
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DerivedKey")
            .field("key", &format_args!("[REDACTED; {} bytes]", self.key.len()))
            .field("bit_length", &self.bit_length)
            .finish()
    }
}

/// Counter-mode KBKDF bound to one PRF and one input layout.
///
/// The configuration is fixed at construction and the value holds no
/// mutable state, so a single `CounterKdf` can serve concurrent derivations.
///
/// # Example
/// ```rust
/// use kbkdf_primitives::{CounterKdf, FieldWidth, PrfAlgorithm};
///
/// let kdf = CounterKdf::new(PrfAlgorithm::HmacSha256).with_counter_width(FieldWidth::Bits8);
/// let key = kdf.derive(b"key-derivation key", b"encryption", b"session-42", 256)?;
/// assert_eq!(key.len(), 32);
/// # Ok::<(), kbkdf_primitives::KdfError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CounterKdf<P = PrfAlgorithm> {
    prf: P,
    counter_width: FieldWidth,
    encoding: FixedInputEncoding,
}

impl<P: Prf> CounterKdf<P> {
    /// Create a KDF with a 32-bit counter and the default fixed input layout.
    #[must_use]
    pub fn new(prf: P) -> Self {
        Self { prf, counter_width: FieldWidth::Bits32, encoding: FixedInputEncoding::default() }
    }

    /// Set the counter width
    #[must_use]
    pub fn with_counter_width(mut self, counter_width: FieldWidth) -> Self {
        self.counter_width = counter_width;
        self
    }

    /// Set the fixed input layout
    #[must_use]
    pub fn with_encoding(mut self, encoding: FixedInputEncoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// The PRF used for every block
    pub fn prf(&self) -> &P {
        &self.prf
    }

    /// Configured counter width
    #[must_use]
    pub fn counter_width(&self) -> FieldWidth {
        self.counter_width
    }

    /// Configured fixed input layout
    #[must_use]
    pub fn encoding(&self) -> FixedInputEncoding {
        self.encoding
    }

    /// Largest output, in bits, the counter width allows for this PRF.
    #[must_use]
    pub fn max_output_bits(&self) -> u64 {
        let block_bits = u64::try_from(self.prf.tag_length()).unwrap_or(0).saturating_mul(8);
        u64::from(self.counter_width.max_value()).saturating_mul(block_bits)
    }

    /// Derive `requested_bits` of key material from `ki`, `label` and `context`.
    ///
    /// # Errors
    /// - `KdfError::InvalidKey` if `ki` is empty or the PRF rejects it
    /// - `KdfError::InvalidLength` if `requested_bits` is zero or does not
    ///   fit the `[L]_2` field
    /// - `KdfError::CounterOverflow` if the counter width cannot number
    ///   every block
    /// - `KdfError::PrfFailure` if a PRF invocation fails
    #[instrument(
        level = "debug",
        skip_all,
        fields(
            prf = self.prf.name(),
            counter_bits = self.counter_width.bits(),
            label_len = label.len(),
            context_len = context.len(),
            requested_bits = requested_bits
        )
    )]
    pub fn derive(
        &self,
        ki: &[u8],
        label: &[u8],
        context: &[u8],
        requested_bits: u32,
    ) -> Result<DerivedKey> {
        check_request(ki, requested_bits)?;
        let fixed_input = self.encoding.encode(label, context, requested_bits)?;
        self.expand(ki, &fixed_input, requested_bits)
    }

    /// Derive key material using a caller-assembled fixed input, verbatim.
    ///
    /// This is the form CAVP vectors use: the label, context and length
    /// field are already concatenated into `fixed_input`.
    ///
    /// # Errors
    /// Same as [`CounterKdf::derive`], except that no `[L]_2` check applies.
    #[instrument(
        level = "debug",
        skip_all,
        fields(
            prf = self.prf.name(),
            counter_bits = self.counter_width.bits(),
            fixed_input_len = fixed_input.len(),
            requested_bits = requested_bits
        )
    )]
    pub fn derive_with_fixed_input(
        &self,
        ki: &[u8],
        fixed_input: &[u8],
        requested_bits: u32,
    ) -> Result<DerivedKey> {
        check_request(ki, requested_bits)?;
        self.expand(ki, fixed_input, requested_bits)
    }

    fn expand(&self, ki: &[u8], fixed_input: &[u8], requested_bits: u32) -> Result<DerivedKey> {
        let tag_length = self.prf.tag_length();
        if tag_length == 0 {
            return Err(KdfError::PrfFailure(format!(
                "{} advertises a zero-length output",
                self.prf.name()
            )));
        }

        let block_bits = u64::try_from(tag_length)
            .map_err(|_e| KdfError::PrfFailure("PRF output length out of range".to_string()))?
            .saturating_mul(8);
        let blocks = u64::from(requested_bits).div_ceil(block_bits);
        if !self.counter_width.fits(blocks) {
            warn!(
                required = blocks,
                counter_bits = self.counter_width.bits(),
                "KBKDF request exceeds counter range"
            );
            return Err(KdfError::CounterOverflow {
                required: blocks,
                max: u64::from(self.counter_width.max_value()),
                counter_bits: self.counter_width.bits(),
            });
        }
        // Bounded by the counter check above.
        let blocks = u32::try_from(blocks).map_err(|_e| KdfError::CounterOverflow {
            required: blocks,
            max: u64::from(self.counter_width.max_value()),
            counter_bits: self.counter_width.bits(),
        })?;

        let out_len = usize::try_from(requested_bits.div_ceil(8))
            .map_err(|_e| KdfError::InvalidLength("Output length exceeds usize".to_string()))?;
        let stream_len = usize::try_from(blocks)
            .ok()
            .and_then(|n| n.checked_mul(tag_length))
            .ok_or_else(|| KdfError::InvalidLength("Key stream length overflow".to_string()))?;

        // Reserved up front: the buffer must never reallocate, a reallocation
        // would free a copy of the key stream without wiping it.
        let mut stream = Zeroizing::new(Vec::with_capacity(stream_len));
        let mut message =
            Vec::with_capacity(self.counter_width.bytes().saturating_add(fixed_input.len()));

        let keyed = self.prf.keyed(ki)?;
        for counter in 1..=blocks {
            message.clear();
            self.counter_width.write_be(counter, &mut message);
            message.extend_from_slice(fixed_input);

            let block = keyed.compute(&message)?;
            if block.len() != tag_length {
                return Err(KdfError::PrfFailure(format!(
                    "{} returned {} bytes, expected {}",
                    self.prf.name(),
                    block.len(),
                    tag_length
                )));
            }
            stream.extend_from_slice(&block);
        }

        if let Some(tail) = stream.get_mut(out_len..) {
            tail.zeroize();
        }
        stream.truncate(out_len);

        let spare_bits = requested_bits % 8;
        if spare_bits != 0 {
            if let Some(last) = stream.last_mut() {
                *last &= 0xFFu8 << (8 - spare_bits);
            }
        }

        Ok(DerivedKey { key: std::mem::take(&mut *stream), bit_length: requested_bits })
    }
}

fn check_request(ki: &[u8], requested_bits: u32) -> Result<()> {
    if ki.is_empty() {
        return Err(KdfError::InvalidKey("Key-derivation key must not be empty".to_string()));
    }
    if requested_bits == 0 {
        return Err(KdfError::InvalidLength(
            "Requested output length must be greater than 0 bits".to_string(),
        ));
    }
    Ok(())
}

/// SP 800-108 counter-mode KBKDF with the default fixed input layout.
///
/// Computes `PRF(KI, [i]_r || Label || 0x00 || Context || [L]_32)` for
/// `i = 1..=ceil(L/h)` and returns the leftmost `requested_bits` bits.
///
/// # Arguments
/// * `ki` - Key-derivation key (non-empty)
/// * `prf` - PRF instance, e.g. [`PrfAlgorithm::HmacSha256`]
/// * `label` - Purpose of the derived key
/// * `context` - Binding information (nonce, peer identity, ...)
/// * `requested_bits` - Output length L in bits
/// * `counter_width` - Width r of the counter field
///
/// # Errors
/// See [`CounterKdf::derive`].
pub fn derive<P: Prf + ?Sized>(
    ki: &[u8],
    prf: &P,
    label: &[u8],
    context: &[u8],
    requested_bits: u32,
    counter_width: FieldWidth,
) -> Result<DerivedKey> {
    CounterKdf::new(prf).with_counter_width(counter_width).derive(
        ki,
        label,
        context,
        requested_bits,
    )
}
