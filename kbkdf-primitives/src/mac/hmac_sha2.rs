#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::panic)]

//! HMAC-SHA2 pseudorandom functions
//!
//! HMAC (FIPS 198-1) over SHA-256, SHA-384 and SHA-512, delegated to the
//! audited `hmac` and `sha2` crates from RustCrypto. These are the PRFs
//! SP 800-108 approves for the HMAC-based KBKDF.

use crate::error::{KdfError, Result};
use crate::mac::prf::{KeyedPrf, Prf};
use crate::security::SecureBytes;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::{Sha256, Sha384, Sha512};
use std::fmt;
use std::str::FromStr;
use zeroize::Zeroize;

/// HMAC digest selection for the KBKDF PRF.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PrfAlgorithm {
    /// HMAC-SHA256 (32-byte tag)
    #[default]
    #[serde(alias = "sha256")]
    HmacSha256,
    /// HMAC-SHA384 (48-byte tag)
    #[serde(alias = "sha384")]
    HmacSha384,
    /// HMAC-SHA512 (64-byte tag)
    #[serde(alias = "sha512")]
    HmacSha512,
}

impl PrfAlgorithm {
    /// Every supported PRF, in increasing tag length.
    pub const ALL: [PrfAlgorithm; 3] =
        [PrfAlgorithm::HmacSha256, PrfAlgorithm::HmacSha384, PrfAlgorithm::HmacSha512];

    /// Resolve a PRF from its CAVP name (`HMAC_SHA256`) or digest name (`sha256`).
    ///
    /// Matching ignores ASCII case and treats `-` like `_`.
    ///
    /// # Errors
    /// Returns `KdfError::InvalidParameter` for digests outside SHA-256/384/512.
    pub fn from_name(name: &str) -> Result<Self> {
        let normalized = name.trim().to_ascii_uppercase().replace('-', "_");
        let digest = normalized.strip_prefix("HMAC_").unwrap_or(&normalized);
        match digest {
            "SHA256" | "SHA2_256" => Ok(PrfAlgorithm::HmacSha256),
            "SHA384" | "SHA2_384" => Ok(PrfAlgorithm::HmacSha384),
            "SHA512" | "SHA2_512" => Ok(PrfAlgorithm::HmacSha512),
            _ => Err(KdfError::InvalidParameter(format!("Unsupported PRF: {}", name))),
        }
    }

    /// Name in CAVP notation, e.g. `HMAC_SHA256`.
    #[must_use]
    pub fn cavp_name(&self) -> &'static str {
        match self {
            PrfAlgorithm::HmacSha256 => "HMAC_SHA256",
            PrfAlgorithm::HmacSha384 => "HMAC_SHA384",
            PrfAlgorithm::HmacSha512 => "HMAC_SHA512",
        }
    }
}

impl fmt::Display for PrfAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PrfAlgorithm {
    type Err = KdfError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_name(s)
    }
}

impl Prf for PrfAlgorithm {
    fn name(&self) -> &'static str {
        match self {
            PrfAlgorithm::HmacSha256 => "HMAC-SHA256",
            PrfAlgorithm::HmacSha384 => "HMAC-SHA384",
            PrfAlgorithm::HmacSha512 => "HMAC-SHA512",
        }
    }

    fn tag_length(&self) -> usize {
        match self {
            PrfAlgorithm::HmacSha256 => 32,
            PrfAlgorithm::HmacSha384 => 48,
            PrfAlgorithm::HmacSha512 => 64,
        }
    }

    fn compute(&self, key: &[u8], message: &[u8]) -> Result<SecureBytes> {
        if key.is_empty() {
            return Err(KdfError::InvalidKey("HMAC key cannot be empty".to_string()));
        }
        match self {
            PrfAlgorithm::HmacSha256 => hmac_tag::<Hmac<Sha256>>(key, message),
            PrfAlgorithm::HmacSha384 => hmac_tag::<Hmac<Sha384>>(key, message),
            PrfAlgorithm::HmacSha512 => hmac_tag::<Hmac<Sha512>>(key, message),
        }
    }

    fn keyed<'a>(&'a self, key: &'a [u8]) -> Result<Box<dyn KeyedPrf + 'a>> {
        if key.is_empty() {
            return Err(KdfError::InvalidKey("HMAC key cannot be empty".to_string()));
        }
        let keyed = match self {
            PrfAlgorithm::HmacSha256 => KeyedHmac::Sha256(hmac_init(key)?),
            PrfAlgorithm::HmacSha384 => KeyedHmac::Sha384(hmac_init(key)?),
            PrfAlgorithm::HmacSha512 => KeyedHmac::Sha512(hmac_init(key)?),
        };
        Ok(Box::new(keyed))
    }
}

/// HMAC state after the key schedule, cloned for every message.
enum KeyedHmac {
    Sha256(Hmac<Sha256>),
    Sha384(Hmac<Sha384>),
    Sha512(Hmac<Sha512>),
}

impl KeyedPrf for KeyedHmac {
    fn compute(&self, message: &[u8]) -> Result<SecureBytes> {
        Ok(match self {
            KeyedHmac::Sha256(mac) => hmac_finish(mac.clone(), message),
            KeyedHmac::Sha384(mac) => hmac_finish(mac.clone(), message),
            KeyedHmac::Sha512(mac) => hmac_finish(mac.clone(), message),
        })
    }
}

fn hmac_init<M>(key: &[u8]) -> Result<M>
where
    M: Mac + KeyInit,
{
    <M as Mac>::new_from_slice(key)
        .map_err(|_e| KdfError::InvalidKey("Invalid HMAC key length".to_string()))
}

fn hmac_finish<M: Mac>(mut mac: M, message: &[u8]) -> SecureBytes {
    mac.update(message);

    let mut tag = mac.finalize().into_bytes();
    let out = SecureBytes::from_slice(tag.as_slice());
    tag.as_mut_slice().zeroize();
    out
}

fn hmac_tag<M>(key: &[u8], message: &[u8]) -> Result<SecureBytes>
where
    M: Mac + KeyInit,
{
    Ok(hmac_finish(hmac_init::<M>(key)?, message))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Tests use unwrap for simplicity
mod tests {
    use super::*;
    use hex_literal::hex;

    // RFC 4231 Test Case 1
    const RFC4231_KEY: [u8; 20] = [0x0b; 20];
    const RFC4231_DATA: &[u8] = b"Hi There";

    #[test]
    fn test_hmac_sha256_rfc4231() {
        let tag = PrfAlgorithm::HmacSha256.compute(&RFC4231_KEY, RFC4231_DATA).unwrap();
        assert_eq!(
            tag.as_slice(),
            hex!("b0344c61d8db38535ca8afceaf0bf12b881dc200c9833da726e9376c2e32cff7")
        );
    }

    #[test]
    fn test_hmac_sha384_rfc4231() {
        let tag = PrfAlgorithm::HmacSha384.compute(&RFC4231_KEY, RFC4231_DATA).unwrap();
        assert_eq!(
            tag.as_slice(),
            hex!(
                "afd03944d84895626b0825f4ab46907f15f9dadbe4101ec682aa034c7cebc59c"
                "faea9ea9076ede7f4af152e8b2fa9cb6"
            )
        );
    }

    #[test]
    fn test_hmac_sha512_rfc4231() {
        let tag = PrfAlgorithm::HmacSha512.compute(&RFC4231_KEY, RFC4231_DATA).unwrap();
        assert_eq!(
            tag.as_slice(),
            hex!(
                "87aa7cdea5ef619d4ff0b4241a1d6cb02379f4e2ce4ec2787ad0b30545e17cde"
                "daa833b7d6b8a702038b274eaea3f4e4be9d914eeb61f1702e696c203a126854"
            )
        );
    }

    #[test]
    fn test_tag_length_matches_output() {
        for prf in PrfAlgorithm::ALL {
            let tag = prf.compute(b"key", b"message").unwrap();
            assert_eq!(tag.len(), prf.tag_length(), "{}", prf);
        }
    }

    #[test]
    fn test_empty_key_rejected() {
        let err = PrfAlgorithm::HmacSha256.compute(b"", b"message").unwrap_err();
        assert!(matches!(err, KdfError::InvalidKey(_)));
        assert!(matches!(PrfAlgorithm::HmacSha256.keyed(b""), Err(KdfError::InvalidKey(_))));
    }

    #[test]
    fn test_keyed_matches_compute() {
        for prf in PrfAlgorithm::ALL {
            let keyed = prf.keyed(&RFC4231_KEY).unwrap();
            let messages: [&[u8]; 3] = [RFC4231_DATA, b"", b"second block"];
            for message in messages {
                let once = keyed.compute(message).unwrap();
                let rekeyed = prf.compute(&RFC4231_KEY, message).unwrap();
                assert_eq!(once.as_slice(), rekeyed.as_slice(), "{}", prf);
            }
            // Reusing the keyed state must not carry over earlier input
            let again = keyed.compute(RFC4231_DATA).unwrap();
            let fresh = prf.compute(&RFC4231_KEY, RFC4231_DATA).unwrap();
            assert_eq!(again.as_slice(), fresh.as_slice());
        }
    }

    #[test]
    fn test_from_name() {
        assert_eq!(PrfAlgorithm::from_name("HMAC_SHA256").unwrap(), PrfAlgorithm::HmacSha256);
        assert_eq!(PrfAlgorithm::from_name("hmac-sha384").unwrap(), PrfAlgorithm::HmacSha384);
        assert_eq!(PrfAlgorithm::from_name("sha512").unwrap(), PrfAlgorithm::HmacSha512);
        assert_eq!("SHA256".parse::<PrfAlgorithm>().unwrap(), PrfAlgorithm::HmacSha256);

        assert!(PrfAlgorithm::from_name("HMAC_SHA1").is_err());
        assert!(PrfAlgorithm::from_name("CMAC_AES128").is_err());
    }

    #[test]
    fn test_serde_names() {
        let json = serde_json::to_string(&PrfAlgorithm::HmacSha384).unwrap();
        assert_eq!(json, "\"HMAC_SHA384\"");

        let parsed: PrfAlgorithm = serde_json::from_str("\"sha512\"").unwrap();
        assert_eq!(parsed, PrfAlgorithm::HmacSha512);
    }
}
