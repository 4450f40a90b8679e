//! Luhn checksum ("modulus 10") over decimal digit sequences.
//!
//! The sequence is walked left to right. With `parity = len % 2`, the digit at
//! index `i` is doubled when `i % 2 == parity`, which selects every second
//! digit counting from the right (the check digit itself is never doubled).
//! This gives the same result as the textbook right-to-left traversal without
//! reversing the input.

use crate::digits::digit_values;

/// Doubled digit with 9 subtracted when the product exceeds 9.
/// Index is the digit (0-9).
const DOUBLE_TABLE: [u8; 10] = [0, 2, 4, 6, 8, 1, 3, 5, 7, 9];

/// Validates a digit sequence with the Luhn algorithm.
///
/// `digits` holds numeric values 0-9, not ASCII. An empty sequence never
/// passes.
///
/// # Example
///
/// ```
/// use binchecker::luhn::validate;
///
/// assert!(validate(&[7, 9, 9, 2, 7, 3, 9, 8, 7, 1, 3]));
/// assert!(!validate(&[7, 9, 9, 2, 7, 3, 9, 8, 7, 1, 0]));
/// assert!(!validate(&[]));
/// ```
#[inline]
pub fn validate(digits: &[u8]) -> bool {
    if digits.is_empty() {
        return false;
    }

    compute_checksum(digits) % 10 == 0
}

/// Computes the Luhn sum (not reduced modulo 10).
#[inline]
pub fn compute_checksum(digits: &[u8]) -> u32 {
    let parity = digits.len() % 2;

    digits
        .iter()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == parity {
                DOUBLE_TABLE[digit as usize] as u32
            } else {
                digit as u32
            }
        })
        .sum()
}

/// Checks the Luhn sum of the digits found in a string.
///
/// Non-digit characters are ignored. A string without digits fails.
///
/// # Example
///
/// ```
/// use binchecker::luhn::passes_luhn;
///
/// assert!(passes_luhn("4111 1111 1111 1111"));
/// assert!(!passes_luhn("4111111111111112"));
/// assert!(!passes_luhn("--"));
/// ```
#[inline]
pub fn passes_luhn(input: &str) -> bool {
    validate(&digit_values(input))
}

/// Returns the check digit to append to `digits` so that the result passes.
///
/// # Example
///
/// ```
/// use binchecker::luhn::generate_check_digit;
///
/// let partial = [4, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1];
/// assert_eq!(generate_check_digit(&partial), 1);
/// ```
#[inline]
pub fn generate_check_digit(digits: &[u8]) -> u8 {
    // After appending, the total length is len + 1, so the doubled indices are
    // those with i % 2 == (len + 1) % 2. The appended digit is not doubled.
    let parity = (digits.len() + 1) % 2;

    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &digit)| {
            if i % 2 == parity {
                DOUBLE_TABLE[digit as usize] as u32
            } else {
                digit as u32
            }
        })
        .sum();

    ((10 - (sum % 10)) % 10) as u8
}
