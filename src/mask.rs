//! Masking of card numbers for display.
//!
//! Only the last 4 digits are ever shown. Masked output is grouped in blocks
//! of 4 counted from the right, so the real digits always form the final
//! block: `**** **** **** 1111`.

use crate::card::CardNumber;

/// Masks a digit sequence, keeping only its last 4 digits.
///
/// Sequences of 4 digits or fewer are returned unchanged. Input is expected
/// to be digits only; run it through [`extract_digits`](crate::digits::extract_digits)
/// first if it may contain separators.
///
/// # Example
///
/// ```
/// use binchecker::mask::mask_digits;
///
/// assert_eq!(mask_digits("4111111111111111"), "**** **** **** 1111");
/// assert_eq!(mask_digits("378282246310005"), "*** **** **** 0005");
/// assert_eq!(mask_digits("1234"), "1234");
/// ```
pub fn mask_digits(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let len = chars.len();

    if len <= 4 {
        return digits.to_string();
    }

    let masked: Vec<char> = std::iter::repeat('*')
        .take(len - 4)
        .chain(chars[len - 4..].iter().copied())
        .collect();

    group_from_right(&masked)
}

/// Masks a parsed card number.
///
/// Works from the stored digit values, so the full number is never copied
/// into a string.
pub fn mask_card(card: &CardNumber) -> String {
    let digits = card.digits();
    let hidden = digits.len().saturating_sub(4);

    let masked: Vec<char> = std::iter::repeat('*')
        .take(hidden)
        .chain(digits[hidden..].iter().map(|&d| char::from(b'0' + d)))
        .collect();

    group_from_right(&masked)
}

/// Returns the last 4 digits of a digit sequence (all of it when shorter).
///
/// # Example
///
/// ```
/// use binchecker::mask::last_four;
///
/// assert_eq!(last_four("4111111111111234"), "1234");
/// assert_eq!(last_four("12"), "12");
/// ```
pub fn last_four(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let start = chars.len().saturating_sub(4);
    chars[start..].iter().collect()
}

/// Joins `chars` in blocks of 4 counted from the right.
fn group_from_right(chars: &[char]) -> String {
    let lead = chars.len() % 4;
    let mut result = String::with_capacity(chars.len() + chars.len() / 4);

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && i % 4 == lead {
            result.push(' ');
        }
        result.push(*c);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_16_digits() {
        assert_eq!(mask_digits("4111111111111111"), "**** **** **** 1111");
    }

    #[test]
    fn test_mask_odd_lengths() {
        assert_eq!(mask_digits("12345"), "* 2345");
        assert_eq!(mask_digits("500000001234"), "**** **** 1234");
        assert_eq!(mask_digits("4222222222222"), "* **** **** 2222");
        assert_eq!(mask_digits("4111111111111111111"), "*** **** **** **** 1111");
    }

    #[test]
    fn test_mask_short_unchanged() {
        assert_eq!(mask_digits("1234"), "1234");
        assert_eq!(mask_digits("12"), "12");
        assert_eq!(mask_digits(""), "");
    }

    #[test]
    fn test_mask_never_leaks_prefix() {
        let masked = mask_digits("5500000000000004");
        assert!(!masked.contains('5'));
        assert!(masked.ends_with("0004"));
    }

    #[test]
    fn test_last_four() {
        assert_eq!(last_four("4111111111111234"), "1234");
        assert_eq!(last_four("123"), "123");
        assert_eq!(last_four(""), "");
    }

    #[test]
    fn test_mask_card() {
        let card = CardNumber::from_digits("4111111111111111").unwrap();
        assert_eq!(mask_card(&card), "**** **** **** 1111");
    }

    #[test]
    fn test_mask_card_matches_text_masking() {
        for number in [
            "500000001234",
            "4222222222222",
            "378282246310005",
            "6011000990139424",
            "4111111111111111111",
        ] {
            let card = CardNumber::from_digits(number).unwrap();
            assert_eq!(mask_card(&card), mask_digits(number), "{number}");
            assert_eq!(card.masked(), mask_digits(number), "{number}");
        }
    }
}
