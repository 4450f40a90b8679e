//! Readable grouping of unmasked digit sequences.
//!
//! Groups of 4 are counted from the left; a shorter remainder ends the
//! string (`4222 2222 2222 2`).
//!
//! # Example
//!
//! ```
//! use binchecker::format::{group_digits, group_with_separator};
//!
//! assert_eq!(group_digits("4111111111111111"), "4111 1111 1111 1111");
//! assert_eq!(group_with_separator("4111111111111111", "-"), "4111-1111-1111-1111");
//! ```

/// Groups a digit sequence in blocks of 4 from the left, joined by spaces.
#[inline]
pub fn group_digits(digits: &str) -> String {
    group_with_separator(digits, " ")
}

/// Groups a digit sequence in blocks of 4 from the left, joined by `separator`.
pub fn group_with_separator(digits: &str, separator: &str) -> String {
    split_into_groups(digits).join(separator)
}

/// Splits a digit sequence into blocks of 4 from the left.
///
/// # Example
///
/// ```
/// use binchecker::format::split_into_groups;
///
/// assert_eq!(split_into_groups("411111111"), vec!["4111", "1111", "1"]);
/// assert!(split_into_groups("").is_empty());
/// ```
pub fn split_into_groups(digits: &str) -> Vec<String> {
    let chars: Vec<char> = digits.chars().collect();
    chars.chunks(4).map(|chunk| chunk.iter().collect()).collect()
}
