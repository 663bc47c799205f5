//! PRF capability trait

use crate::error::Result;
use crate::security::SecureBytes;

/// A keyed pseudorandom function with a fixed output length.
///
/// Implementations must be deterministic: the same `(key, message)` pair
/// always yields the same tag of exactly [`Prf::tag_length`] bytes.
pub trait Prf: Send + Sync {
    /// Human-readable algorithm name, used in logs and reports.
    fn name(&self) -> &'static str;

    /// Output length of a single PRF invocation in bytes.
    fn tag_length(&self) -> usize;

    /// Compute `PRF(key, message)`.
    ///
    /// # Errors
    /// Returns `KdfError::InvalidKey` if the key is rejected and
    /// `KdfError::PrfFailure` if the MAC computation itself fails.
    fn compute(&self, key: &[u8], message: &[u8]) -> Result<SecureBytes>;

    /// Bind `key` once for a run of [`KeyedPrf::compute`] calls.
    ///
    /// The default re-keys on every call through [`Prf::compute`].
    /// Implementations with an expensive key schedule should override it.
    ///
    /// # Errors
    /// Returns `KdfError::InvalidKey` if the key is rejected.
    fn keyed<'a>(&'a self, key: &'a [u8]) -> Result<Box<dyn KeyedPrf + 'a>> {
        Ok(Box::new(Rekeying { prf: self, key }))
    }
}

/// A PRF with its key already bound.
pub trait KeyedPrf {
    /// Compute the PRF of `message` under the bound key.
    ///
    /// # Errors
    /// Returns `KdfError::PrfFailure` if the MAC computation fails.
    fn compute(&self, message: &[u8]) -> Result<SecureBytes>;
}

struct Rekeying<'a, P: ?Sized> {
    prf: &'a P,
    key: &'a [u8],
}

impl<P: Prf + ?Sized> KeyedPrf for Rekeying<'_, P> {
    fn compute(&self, message: &[u8]) -> Result<SecureBytes> {
        self.prf.compute(self.key, message)
    }
}

impl<T: Prf + ?Sized> Prf for &T {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn tag_length(&self) -> usize {
        (**self).tag_length()
    }

    fn compute(&self, key: &[u8], message: &[u8]) -> Result<SecureBytes> {
        (**self).compute(key, message)
    }

    fn keyed<'a>(&'a self, key: &'a [u8]) -> Result<Box<dyn KeyedPrf + 'a>> {
        (**self).keyed(key)
    }
}

impl<T: Prf + ?Sized> Prf for Box<T> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn tag_length(&self) -> usize {
        (**self).tag_length()
    }

    fn compute(&self, key: &[u8], message: &[u8]) -> Result<SecureBytes> {
        (**self).compute(key, message)
    }

    fn keyed<'a>(&'a self, key: &'a [u8]) -> Result<Box<dyn KeyedPrf + 'a>> {
        (**self).keyed(key)
    }
}
