//! Property-based tests using proptest.
//!
//! These tests verify invariants that should hold for all inputs,
//! helping discover edge cases that manual tests might miss.

use binchecker::{
    digits::{digit_values, extract_digits, is_all_digits},
    expiry, format, luhn, mask,
    parse::parse_card_input_at,
};
use chrono::NaiveDate;
use proptest::prelude::*;

// =============================================================================
// STRATEGIES
// =============================================================================

/// Generates a random digit string of a given length.
fn digit_string(len: usize) -> impl Strategy<Value = String> {
    proptest::collection::vec(prop::char::range('0', '9'), len)
        .prop_map(|chars| chars.into_iter().collect())
}

/// Generates a random digit string of a length within range.
fn digit_string_range(range: std::ops::RangeInclusive<usize>) -> impl Strategy<Value = String> {
    range.prop_flat_map(digit_string)
}

/// Generates a string with separators (spaces, dashes) mixed in.
fn with_separators(card: String) -> impl Strategy<Value = String> {
    let len = card.len();
    proptest::collection::vec(
        prop_oneof![Just(""), Just(" "), Just("-"), Just("  "), Just(" - ")],
        len + 1,
    )
    .prop_map(move |seps| {
        let mut result = String::new();
        for (i, c) in card.chars().enumerate() {
            result.push_str(seps[i]);
            result.push(c);
        }
        result.push_str(seps[len]);
        result
    })
}

/// Textbook Luhn: double every second digit counting from the rightmost.
fn reference_luhn(digits: &[u8]) -> bool {
    if digits.is_empty() {
        return false;
    }
    let sum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            let d = u32::from(d);
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();
    sum % 10 == 0
}

fn values(s: &str) -> Vec<u8> {
    s.bytes().map(|b| b - b'0').collect()
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()
}

// =============================================================================
// LUHN ALGORITHM PROPERTIES
// =============================================================================

proptest! {
    /// Property: Left-to-right parity walk agrees with the textbook algorithm.
    #[test]
    fn luhn_matches_reference(digits in proptest::collection::vec(0u8..=9, 1..=25)) {
        prop_assert_eq!(luhn::validate(&digits), reference_luhn(&digits));
    }

    /// Property: Adding a check digit makes any digit sequence valid.
    #[test]
    fn check_digit_makes_valid(prefix in digit_string_range(1..=24)) {
        let mut digits = values(&prefix);
        let check = luhn::generate_check_digit(&digits);
        prop_assert!(check <= 9);
        digits.push(check);
        prop_assert!(luhn::validate(&digits), "Adding check digit should make sequence valid");
    }

    /// Property: Changing any single digit of a valid number invalidates Luhn.
    #[test]
    fn single_digit_change_invalidates_luhn(
        prefix in digit_string_range(11..=18),
        change_pos in 0usize..19usize,
        delta in 1u8..=9u8,
    ) {
        let mut digits = values(&prefix);
        digits.push(luhn::generate_check_digit(&digits));
        let pos = change_pos % digits.len();

        let mut modified = digits.clone();
        modified[pos] = (modified[pos] + delta) % 10;
        prop_assert!(!luhn::validate(&modified),
            "Changing digit at position {} should invalidate Luhn", pos);
    }

    /// Property: Separators never affect the Luhn verdict.
    #[test]
    fn separators_dont_affect_luhn(
        (plain, decorated) in digit_string_range(12..=19)
            .prop_flat_map(|card| (Just(card.clone()), with_separators(card)))
    ) {
        prop_assert_eq!(luhn::passes_luhn(&plain), luhn::passes_luhn(&decorated));
    }
}

// =============================================================================
// DIGIT EXTRACTION PROPERTIES
// =============================================================================

proptest! {
    /// Property: Extraction is idempotent and keeps only ASCII digits.
    #[test]
    fn extract_digits_idempotent(input in ".*") {
        let once = extract_digits(&input);
        prop_assert_eq!(extract_digits(&once), once.clone());
        prop_assert!(once.bytes().all(|b| b.is_ascii_digit()));
    }

    /// Property: Pure digit strings pass through unchanged.
    #[test]
    fn extract_digits_identity_on_digits(digits in digit_string_range(1..=30)) {
        prop_assert_eq!(extract_digits(&digits), digits.clone());
        prop_assert!(is_all_digits(&digits));
    }

    /// Property: Numeric values mirror the extracted text.
    #[test]
    fn digit_values_match_text(input in ".*") {
        let text = extract_digits(&input);
        prop_assert_eq!(digit_values(&input), values(&text));
    }
}

// =============================================================================
// MASKING AND FORMATTING PROPERTIES
// =============================================================================

proptest! {
    /// Property: Masked output never exposes more than the last four digits.
    #[test]
    fn masked_shows_only_last_four(card in digit_string_range(5..=19)) {
        let masked = mask::mask_digits(&card);
        let compact: String = masked.chars().filter(|c| *c != ' ').collect();

        prop_assert_eq!(compact.len(), card.len());
        prop_assert!(compact.ends_with(&card[card.len() - 4..]));
        prop_assert_eq!(compact.chars().filter(|c| *c == '*').count(), card.len() - 4);
    }

    /// Property: Masked groups are 4 wide except possibly the first.
    #[test]
    fn masked_groups_from_right(card in digit_string_range(5..=19)) {
        let masked = mask::mask_digits(&card);
        let groups: Vec<&str> = masked.split(' ').collect();

        prop_assert!(groups.iter().skip(1).all(|g| g.len() == 4));
        prop_assert!((1..=4).contains(&groups[0].len()));
        prop_assert_eq!(*groups.last().unwrap(), &card[card.len() - 4..]);
    }

    /// Property: Short sequences are returned unchanged.
    #[test]
    fn short_sequences_unmasked(card in digit_string_range(0..=4)) {
        prop_assert_eq!(mask::mask_digits(&card), card.clone());
    }

    /// Property: Grouping then stripping separators round-trips.
    #[test]
    fn group_roundtrip(card in digit_string_range(0..=25)) {
        let grouped = format::group_digits(&card);
        prop_assert_eq!(extract_digits(&grouped), card.clone());
        prop_assert!(format::split_into_groups(&card).iter().all(|g| (1..=4).contains(&g.len())));
    }
}

// =============================================================================
// PARSER PROPERTIES
// =============================================================================

proptest! {
    /// Property: Well-formed payloads always parse back to their fields.
    #[test]
    fn well_formed_payload_parses(
        card in digit_string_range(12..=19),
        month in 1u8..=12u8,
        year in 1000u16..=9999u16,
        cvv in digit_string_range(3..=4),
    ) {
        let raw = format!("{card}|{month}|{year}|{cvv}");
        let input = parse_card_input_at(&raw, today()).unwrap();

        prop_assert_eq!(input.number().number(), card);
        prop_assert_eq!(input.month(), month);
        prop_assert_eq!(input.year(), year);
        prop_assert_eq!(input.cvv().as_string(), cvv);
    }

    /// Property: Two-digit years land in the current century.
    #[test]
    fn two_digit_year_expansion(yy in 0u16..=99u16, this_year in 1900i32..=9899i32) {
        let today = NaiveDate::from_ymd_opt(this_year, 1, 1).unwrap();
        let raw = format!("4111111111111111|01|{yy:02}|123");
        let input = parse_card_input_at(&raw, today).unwrap();

        let century = (this_year / 100 * 100) as u16;
        prop_assert_eq!(input.year(), century + yy);
    }

    /// Property: Months outside 1-12 are rejected.
    #[test]
    fn invalid_month_rejected(month in prop_oneof![Just(0u32), 13u32..=999u32]) {
        let raw = format!("4111111111111111|{month}|2030|123");
        prop_assert!(parse_card_input_at(&raw, today()).is_err());
    }

    /// Property: Field counts other than four are rejected.
    #[test]
    fn wrong_field_count_rejected(extra in 0usize..=6usize) {
        prop_assume!(extra != 3);
        let mut fields = vec!["4111111111111111"];
        fields.extend(std::iter::repeat("12").take(extra));
        let raw = fields.join("|");
        prop_assert!(parse_card_input_at(&raw, today()).is_err());
    }

    /// Property: The parser never panics.
    #[test]
    fn parse_never_panics(input in ".*") {
        let _ = parse_card_input_at(&input, today());
    }

    /// Property: Parsed numbers never leak through Debug.
    #[test]
    fn debug_never_exposes_card(card in digit_string_range(12..=19)) {
        let raw = format!("{card}|12|2030|123");
        let input = parse_card_input_at(&raw, today()).unwrap();
        let debug = format!("{:?}", input);
        prop_assert!(!debug.contains(&card));
    }
}

// =============================================================================
// EXPIRY PROPERTIES
// =============================================================================

proptest! {
    /// Property: A card is valid through the last day of its month and expired the day after.
    #[test]
    fn expiry_boundary(month in 1u8..=12u8, year in 1u16..=9998u16) {
        let last = expiry::last_day_of_month(month, year).unwrap();
        let end_of_day = last.and_hms_opt(23, 59, 59).unwrap();
        let next = last.succ_opt().unwrap().and_hms_opt(0, 0, 0).unwrap();

        prop_assert!(!expiry::is_expired_at(month, year, end_of_day));
        prop_assert!(expiry::is_expired_at(month, year, next));
    }

    /// Property: Expiry formatting always yields MM/YYYY.
    #[test]
    fn expiry_format(month in 1u8..=12u8, year in 1000u16..=9999u16) {
        let text = expiry::format_expiry(month, year);
        prop_assert_eq!(text, format!("{month:02}/{year}"));
    }
}
