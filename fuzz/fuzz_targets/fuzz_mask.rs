//! Fuzz target for masking and formatting.
//!
//! Tests that masking never reveals more than the last four digits.

#![no_main]

use binchecker::{extract_digits, format, mask};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let digits = extract_digits(data);
    let masked = mask::mask_digits(&digits);

    if digits.len() > 4 {
        let compact: String = masked.chars().filter(|c| *c != ' ').collect();
        assert_eq!(compact.len(), digits.len());
        assert_eq!(compact.matches('*').count(), digits.len() - 4);
        assert!(compact.ends_with(&digits[digits.len() - 4..]));
    } else {
        assert_eq!(masked, digits);
    }

    let grouped = format::group_digits(&digits);
    assert_eq!(extract_digits(&grouped), digits);
});
