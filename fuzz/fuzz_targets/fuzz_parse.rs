//! Fuzz target for payload parsing.
//!
//! Tests that parsing never panics and that accepted payloads are in range.

#![no_main]

use binchecker::{check_card_at, parse_card_input_at, MAX_CARD_DIGITS, MIN_CARD_DIGITS};
use chrono::NaiveDate;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    let Some(today) = NaiveDate::from_ymd_opt(2025, 6, 15) else {
        return;
    };

    if let Ok(input) = parse_card_input_at(data, today) {
        let len = input.number().length();
        assert!((MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&len));
        assert!((1..=12).contains(&input.month()));
        assert!(input.year() <= 9999);
        assert!((3..=4).contains(&input.cvv().length()));

        // Debug output must stay masked
        let debug = format!("{:?}", input);
        assert!(!debug.contains(&input.number().number()));
    }

    if let Some(now) = today.and_hms_opt(12, 0, 0) {
        let _ = check_card_at(data, now);
    }
});
