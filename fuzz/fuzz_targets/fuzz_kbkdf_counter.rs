#![deny(unsafe_code)]
#![no_main]

//! Fuzz testing for counter-mode key derivation
//!
//! Derives with fuzzer-chosen PRF, counter width, output length, key, label
//! and context, then checks output length, trailing-bit masking,
//! determinism and the counter overflow boundary.

use kbkdf_primitives::{CounterKdf, FieldWidth, KdfError, Prf, PrfAlgorithm};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 6 {
        return;
    }

    let prf = PrfAlgorithm::ALL[usize::from(data[0]) % PrfAlgorithm::ALL.len()];
    let width = FieldWidth::ALL[usize::from(data[1]) % FieldWidth::ALL.len()];
    // Up to 65535 bits, enough to cross the 8-bit counter limit
    let requested_bits = u32::from(u16::from_be_bytes([data[2], data[3]]));
    let ki_len = usize::from(data[4]) % 80;
    let label_len = usize::from(data[5]) % 40;

    let rest = &data[6..];
    let ki = &rest[..ki_len.min(rest.len())];
    let rest = &rest[ki.len()..];
    let label = &rest[..label_len.min(rest.len())];
    let context = &rest[label.len()..];

    let kdf = CounterKdf::new(prf).with_counter_width(width);
    let tag_bits = u64::try_from(prf.tag_length() * 8).unwrap();
    let blocks = u64::from(requested_bits).div_ceil(tag_bits);

    match kdf.derive(ki, label, context, requested_bits) {
        Ok(key) => {
            assert!(!ki.is_empty(), "Empty key must be rejected");
            assert!(requested_bits > 0, "Zero length must be rejected");
            assert!(blocks <= u64::from(width.max_value()), "Overflow must be rejected");
            assert_eq!(key.len(), usize::try_from(requested_bits.div_ceil(8)).unwrap());
            assert_eq!(key.bit_length(), requested_bits);

            let unused = (8 - requested_bits % 8) % 8;
            if unused > 0 {
                let last = key.key()[key.len() - 1];
                assert_eq!(last & ((1u8 << unused) - 1), 0, "Unused bits must be zero");
            }

            let again = kdf.derive(ki, label, context, requested_bits).unwrap();
            assert!(again.ct_eq(key.key()), "Derivation must be deterministic");
        }
        Err(KdfError::InvalidKey(_)) => assert!(ki.is_empty()),
        Err(KdfError::InvalidLength(_)) => assert_eq!(requested_bits, 0),
        Err(KdfError::CounterOverflow { required, max, .. }) => {
            assert_eq!(required, blocks);
            assert!(required > max);
        }
        Err(e) => panic!("Unexpected error: {}", e),
    }
});
