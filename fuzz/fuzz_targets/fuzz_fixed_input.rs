#![deny(unsafe_code)]
#![no_main]

//! Fuzz testing for fixed input encoding

use kbkdf_primitives::{FieldWidth, FixedInputEncoding};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.len() < 6 {
        return;
    }

    let separator = data[0] & 1 == 1;
    let length_width = match data[1] % 5 {
        0 => None,
        n => Some(FieldWidth::ALL[usize::from(n - 1)]),
    };
    let requested_bits = u32::from_be_bytes([data[2], data[3], data[4], data[5]]);
    let rest = &data[6..];
    let split = rest.len() / 2;
    let (label, context) = rest.split_at(split);

    let encoding = FixedInputEncoding { separator, length_width };
    match encoding.encode(label, context, requested_bits) {
        Ok(fixed) => {
            assert_eq!(fixed.len(), encoding.encoded_len(label, context));
            assert!(fixed.starts_with(label));
            if separator {
                assert_eq!(fixed[label.len()], 0x00);
            }
            if let Some(width) = length_width {
                assert!(width.fits(u64::from(requested_bits)));
                let tail = &fixed[fixed.len() - width.bytes()..];
                let full = requested_bits.to_be_bytes();
                assert_eq!(tail, &full[4 - width.bytes()..]);
            }
        }
        Err(_) => {
            let width = length_width.expect("only the length field can fail");
            assert!(!width.fits(u64::from(requested_bits)));
        }
    }
});
