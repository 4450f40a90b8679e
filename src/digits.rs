//! Digit extraction from free-form input.
//!
//! Everything that is not an ASCII digit (`0`-`9`) is dropped: spaces,
//! dashes, letters, punctuation and non-ASCII digits alike.

/// Returns the decimal digits of `input`, in order.
///
/// # Example
///
/// ```
/// use binchecker::digits::extract_digits;
///
/// assert_eq!(extract_digits("4111-1111 1111.1111"), "4111111111111111");
/// assert_eq!(extract_digits("no digits"), "");
/// ```
#[inline]
pub fn extract_digits(input: &str) -> String {
    input.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Returns the decimal digits of `input` as numeric values (0-9).
///
/// Same selection as [`extract_digits`].
///
/// # Example
///
/// ```
/// use binchecker::digits::digit_values;
///
/// assert_eq!(digit_values("4-1 x1"), vec![4, 1, 1]);
/// ```
#[inline]
pub fn digit_values(input: &str) -> Vec<u8> {
    input.bytes().filter(u8::is_ascii_digit).map(|b| b - b'0').collect()
}

/// Returns true if `input` is non-empty and made only of ASCII digits.
#[inline]
pub fn is_all_digits(input: &str) -> bool {
    !input.is_empty() && input.bytes().all(|b| b.is_ascii_digit())
}

/// Converts numeric digit values back to their ASCII text.
#[inline]
pub(crate) fn to_text(digits: &[u8]) -> String {
    digits.iter().map(|&d| (b'0' + d) as char).collect()
}
