#![deny(unsafe_code)]
// Test files use unwrap() for simplicity - test failures will show clear panics
#![allow(clippy::unwrap_used)]
// Test files use indexing for test vector access
#![allow(clippy::indexing_slicing)]

//! Tests for the SP 800-108 counter-mode KDF
//!
//! - Pinned vectors (NIST CAVP, label/context layout, OpenSSL-compatible layout)
//! - Determinism, length exactness, counter overflow
//! - Label/context independence and empty-key rejection

use hex_literal::hex;
use kbkdf_primitives::kdf::*;
use kbkdf_primitives::mac::{Prf, PrfAlgorithm};
use kbkdf_primitives::KdfError;

const KI: [u8; 32] = hex!("3edc6b5b8f7aadbd713732b482b8f979286e1ea3b8f8f99c30c884cfe3349b83");
const DEADBEEF: [u8; 4] = hex!("deadbeef");

mod vector_tests {
    use super::*;

    #[test]
    fn test_hmac_sha256_label_context_8bit_counter() {
        let key =
            derive(&KI, &PrfAlgorithm::HmacSha256, &DEADBEEF, &DEADBEEF, 128, FieldWidth::Bits8)
                .unwrap();
        assert_eq!(key.key(), hex!("caa07b1b05ab7c8d26cbf18de433bfa9"));
    }

    #[test]
    fn test_hmac_sha256_label_context_32bit_counter() {
        let key =
            derive(&KI, &PrfAlgorithm::HmacSha256, &DEADBEEF, &DEADBEEF, 128, FieldWidth::Bits32)
                .unwrap();
        assert_eq!(key.key(), hex!("f996a2c1fa7a0931f639447dcbb30e78"));
    }

    #[test]
    fn test_cavp_counter_widths() {
        let cases: [(FieldWidth, [u8; 32], &[u8], [u8; 16]); 4] = [
            (
                FieldWidth::Bits8,
                KI,
                &hex!(
                    "98e9988bb4cc8b34d7922e1c68ad692ba2a1d9ae15149571675f17a77ad49e80"
                    "c8d2a85e831a26445b1f0ff44d7084a17206b4896c8112daad18605a"
                ),
                hex!("6c037652990674a07844732d0ad985f9"),
            ),
            (
                FieldWidth::Bits16,
                hex!("743434c930fe923c350ec202bef28b768cd6062cf233324e21a86c31f9406583"),
                &hex!(
                    "9bdb8a454bd55ab30ced3fd420fde6d946252c875bfe986ed34927c7f7f0b106"
                    "dab9cc85b4c702804965eb24c37ad883a8f695587a7b6094d3335bbc"
                ),
                hex!("19c8a56db1d2a9afb793dc96fbde4c31"),
            ),
            (
                FieldWidth::Bits24,
                hex!("388e93e0273e62f086f52f6f5369d9e4626d143dce3b6afc7caf2c6e7344276b"),
                &hex!(
                    "697bb34b3fbe6853864cac3e1bc6c8c44a4335565479403d949fcbb5e2c1795f"
                    "9a3849df743389d1a99fe75ef566e6227c591104122a6477dd8e8c8e"
                ),
                hex!("d697442b3dd51f96cae949586357b9a6"),
            ),
            (
                FieldWidth::Bits32,
                hex!("dd1d91b7d90b2bd3138533ce92b272fbf8a369316aefe242e659cc0ae238afe0"),
                &hex!(
                    "01322b96b30acd197979444e468e1c5c6859bf1b1cf951b7e725303e237e46b8"
                    "64a145fab25e517b08f8683d0315bb2911d80a0e8aba17f3b413faac"
                ),
                hex!("10621342bfb0fd40046c0e29f2cfdbf0"),
            ),
        ];

        for (width, ki, fixed_input, expected) in cases {
            let kdf = CounterKdf::new(PrfAlgorithm::HmacSha256).with_counter_width(width);
            let key = kdf.derive_with_fixed_input(&ki, fixed_input, 128).unwrap();
            assert_eq!(key.key(), expected, "CAVP vector failed for {} counter", width);
        }
    }

    #[test]
    fn test_openssl_compatible_layout() {
        // Key, label and context all deadbeef, 32-bit counter, 160-bit output.
        let key = CounterKdf::new(PrfAlgorithm::HmacSha256)
            .derive(&DEADBEEF, &DEADBEEF, &DEADBEEF, 160)
            .unwrap();
        assert_eq!(key.key(), hex!("76f463e2df22d3de02fd02ca595816bdce3d19b0"));
    }

    #[test]
    fn test_multi_block_output() {
        let key =
            derive(&KI, &PrfAlgorithm::HmacSha256, &DEADBEEF, &DEADBEEF, 400, FieldWidth::Bits8)
                .unwrap();
        assert_eq!(
            key.key(),
            hex!(
                "354a50d13b276fe1d4b1e8ea47322bb8aeffbcac8fd3c9316d497979c07f97fb"
                "70c7ba1d2c55843711d98ab3fa624478413d"
            )
        );
    }

    #[test]
    fn test_hmac_sha384() {
        let key =
            derive(&KI, &PrfAlgorithm::HmacSha384, &DEADBEEF, &DEADBEEF, 256, FieldWidth::Bits32)
                .unwrap();
        assert_eq!(
            key.key(),
            hex!("66461972a058a637356e9e281fb2bac20be2d88274aa6705accf6d2737db4a50")
        );
    }

    #[test]
    fn test_hmac_sha512() {
        let key =
            derive(&KI, &PrfAlgorithm::HmacSha512, &DEADBEEF, &DEADBEEF, 512, FieldWidth::Bits32)
                .unwrap();
        assert_eq!(
            key.key(),
            hex!(
                "f086ee329cd0f360324c250e66a37eb8ab4b3d8805ff23b868898de10b616b85"
                "65ff46bb38ef387ff22c2429cd94c7f7efe499f71bc45fae3daf1b1c627f9c49"
            )
        );
    }
}

mod property_tests {
    use super::*;

    #[test]
    fn test_deterministic() {
        let kdf = CounterKdf::new(PrfAlgorithm::HmacSha256).with_counter_width(FieldWidth::Bits16);
        let first = kdf.derive(b"master secret", b"Label", b"Context", 384).unwrap();
        let second = kdf.derive(b"master secret", b"Label", b"Context", 384).unwrap();
        assert_eq!(first.key(), second.key());
    }

    #[test]
    fn test_output_length_exact() {
        let kdf = CounterKdf::new(PrfAlgorithm::HmacSha256).with_counter_width(FieldWidth::Bits8);
        for bits in [1u32, 7, 8, 9, 127, 128, 129, 255, 256, 257, 1000] {
            let key = kdf.derive(b"ki", b"label", b"context", bits).unwrap();
            assert_eq!(key.len(), bits.div_ceil(8) as usize, "length for {} bits", bits);
            assert_eq!(key.bit_length(), bits);
        }
    }

    #[test]
    fn test_partial_byte_is_prefix_of_block_stream() {
        let encoding = FixedInputEncoding::default();
        for bits in [1u32, 3, 12, 100, 255] {
            let prf = PrfAlgorithm::HmacSha256;
            let key = derive(&KI, &prf, b"label", b"context", bits, FieldWidth::Bits8).unwrap();

            // Rebuild the single untruncated block with the same [L]_2 value.
            let mut message = vec![0x01];
            message.extend_from_slice(&encoding.encode(b"label", b"context", bits).unwrap());
            let block = PrfAlgorithm::HmacSha256.compute(&KI, &message).unwrap();

            let whole_bytes = (bits / 8) as usize;
            assert_eq!(&key.key()[..whole_bytes], &block[..whole_bytes]);

            let spare = bits % 8;
            if spare != 0 {
                let mask = 0xFFu8 << (8 - spare);
                assert_eq!(key.key()[whole_bytes], block[whole_bytes] & mask);
            }
        }
    }

    #[test]
    fn test_counter_overflow_8bit() {
        for prf in PrfAlgorithm::ALL {
            let h = (prf.tag_length() * 8) as u32;
            let kdf = CounterKdf::new(prf).with_counter_width(FieldWidth::Bits8);

            assert!(kdf.derive(b"ki", b"l", b"c", 255 * h).is_ok());
            let err = kdf.derive(b"ki", b"l", b"c", 255 * h + 1).unwrap_err();
            assert!(
                matches!(
                    err,
                    KdfError::CounterOverflow { required: 256, max: 255, counter_bits: 8 }
                ),
                "{}: {:?}",
                prf,
                err
            );
        }
    }

    #[test]
    fn test_counter_overflow_16bit() {
        let kdf = CounterKdf::new(PrfAlgorithm::HmacSha256).with_counter_width(FieldWidth::Bits16);
        let err = kdf.derive(b"ki", b"l", b"c", 65535 * 256 + 1).unwrap_err();
        assert!(matches!(err, KdfError::CounterOverflow { required: 65536, .. }));
    }

    #[test]
    fn test_label_bit_flip_changes_output() {
        let base = derive(&KI, &PrfAlgorithm::HmacSha256, &DEADBEEF, b"ctx", 256, FieldWidth::Bits8)
            .unwrap();
        for bit in 0..32 {
            let mut label = DEADBEEF;
            label[bit / 8] ^= 1 << (bit % 8);
            let flipped =
                derive(&KI, &PrfAlgorithm::HmacSha256, &label, b"ctx", 256, FieldWidth::Bits8)
                    .unwrap();
            assert_ne!(base.key(), flipped.key(), "label bit {} had no effect", bit);
        }
    }

    #[test]
    fn test_context_bit_flip_changes_output() {
        let base =
            derive(&KI, &PrfAlgorithm::HmacSha256, b"label", &DEADBEEF, 256, FieldWidth::Bits8)
                .unwrap();
        for bit in 0..32 {
            let mut context = DEADBEEF;
            context[bit / 8] ^= 1 << (bit % 8);
            let flipped =
                derive(&KI, &PrfAlgorithm::HmacSha256, b"label", &context, 256, FieldWidth::Bits8)
                    .unwrap();
            assert_ne!(base.key(), flipped.key(), "context bit {} had no effect", bit);
        }
    }

    #[test]
    fn test_separator_distinguishes_label_context_split() {
        let a = derive(b"ki", &PrfAlgorithm::HmacSha256, b"ab", b"c", 128, FieldWidth::Bits32)
            .unwrap();
        let b = derive(b"ki", &PrfAlgorithm::HmacSha256, b"a", b"bc", 128, FieldWidth::Bits32)
            .unwrap();
        assert_ne!(a.key(), b.key());
    }

    #[test]
    fn test_counter_width_changes_output() {
        let outputs: Vec<Vec<u8>> = FieldWidth::ALL
            .iter()
            .map(|w| {
                let key = derive(b"ki", &PrfAlgorithm::HmacSha256, b"l", b"c", 128, *w).unwrap();
                key.key().to_vec()
            })
            .collect();
        for i in 0..outputs.len() {
            for j in (i + 1)..outputs.len() {
                assert_ne!(outputs[i], outputs[j]);
            }
        }
    }
}

mod validation_tests {
    use super::*;

    #[test]
    fn test_empty_key_rejected() {
        for prf in PrfAlgorithm::ALL {
            let err = derive(b"", &prf, b"label", b"context", 128, FieldWidth::Bits8).unwrap_err();
            assert!(matches!(err, KdfError::InvalidKey(_)), "{}", prf);
        }
    }

    #[test]
    fn test_empty_key_rejected_with_fixed_input() {
        let kdf = CounterKdf::new(PrfAlgorithm::HmacSha256);
        let err = kdf.derive_with_fixed_input(b"", b"fixed", 128).unwrap_err();
        assert!(matches!(err, KdfError::InvalidKey(_)));
    }

    #[test]
    fn test_zero_bits_rejected() {
        let err =
            derive(&KI, &PrfAlgorithm::HmacSha256, b"l", b"c", 0, FieldWidth::Bits8).unwrap_err();
        assert!(matches!(err, KdfError::InvalidLength(_)));
    }

    #[test]
    fn test_length_field_too_narrow() {
        let encoding = FixedInputEncoding::default().with_length_width(Some(FieldWidth::Bits8));
        let kdf = CounterKdf::new(PrfAlgorithm::HmacSha256).with_encoding(encoding);
        assert!(kdf.derive(&KI, b"l", b"c", 248).is_ok());
        let err = kdf.derive(&KI, b"l", b"c", 256).unwrap_err();
        assert!(matches!(err, KdfError::InvalidLength(_)));
    }

    #[test]
    fn test_empty_label_and_context_allowed() {
        let key = derive(&KI, &PrfAlgorithm::HmacSha256, b"", b"", 256, FieldWidth::Bits8).unwrap();
        assert_eq!(key.len(), 32);
    }

    #[test]
    fn test_long_inputs() {
        let ki = vec![0u8; 256];
        let label = vec![b'A'; 256];
        let context = vec![0xFF; 256];
        let key = derive(&ki, &PrfAlgorithm::HmacSha512, &label, &context, 1024, FieldWidth::Bits8)
            .unwrap();
        assert_eq!(key.len(), 128);
    }
}
