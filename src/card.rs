//! Card value types produced by the input parser.
//!
//! Card numbers and CVVs live in fixed-size arrays that are zeroed on drop.
//! Neither type prints its digits through `Debug` or `Display`.

use std::fmt;

use chrono::NaiveDateTime;
use zeroize::Zeroize;

use crate::digits::{is_all_digits, to_text};

/// Maximum number of digits in a card number.
pub const MAX_CARD_DIGITS: usize = 19;

/// Minimum number of digits in a card number.
pub const MIN_CARD_DIGITS: usize = 12;

/// Length of the BIN prefix used for issuer lookups.
pub const BIN_LENGTH: usize = 6;

/// A card number of 12 to 19 decimal digits.
#[derive(Clone, PartialEq, Eq)]
pub struct CardNumber {
    digits: [u8; MAX_CARD_DIGITS],
    digit_count: u8,
}

impl CardNumber {
    /// Builds a card number from a digits-only string.
    ///
    /// Returns `None` unless `text` is all ASCII digits with a length in
    /// `MIN_CARD_DIGITS..=MAX_CARD_DIGITS`.
    pub fn from_digits(text: &str) -> Option<Self> {
        if !is_all_digits(text) || !(MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&text.len()) {
            return None;
        }

        let mut digits = [0u8; MAX_CARD_DIGITS];
        for (slot, b) in digits.iter_mut().zip(text.bytes()) {
            *slot = b - b'0';
        }

        Some(Self {
            digits,
            digit_count: text.len() as u8,
        })
    }

    /// Number of digits.
    #[inline]
    pub const fn length(&self) -> usize {
        self.digit_count as usize
    }

    /// The digits as numeric values 0-9.
    #[inline]
    pub fn digits(&self) -> &[u8] {
        &self.digits[..self.length()]
    }

    /// The full number as text.
    ///
    /// # Security Warning
    ///
    /// Exposes the full card number. Use [`masked`](Self::masked) for display
    /// and logging.
    #[inline]
    pub fn number(&self) -> String {
        to_text(self.digits())
    }

    /// The number masked to its last 4 digits, e.g. `**** **** **** 1111`.
    #[inline]
    pub fn masked(&self) -> String {
        crate::mask::mask_card(self)
    }

    /// The last 4 digits.
    #[inline]
    pub fn last_four(&self) -> String {
        to_text(&self.digits()[self.length() - 4..])
    }

    /// The 6-digit BIN (Bank Identification Number) prefix.
    #[inline]
    pub fn bin(&self) -> String {
        to_text(&self.digits()[..BIN_LENGTH])
    }

    /// Returns true if the number passes the Luhn checksum.
    #[inline]
    pub fn passes_luhn(&self) -> bool {
        crate::luhn::validate(self.digits())
    }
}

impl fmt::Debug for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardNumber")
            .field("number", &self.masked())
            .field("length", &self.digit_count)
            .finish()
    }
}

impl fmt::Display for CardNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.masked())
    }
}

impl Drop for CardNumber {
    fn drop(&mut self) {
        self.digits.zeroize();
    }
}

/// A 3 or 4 digit card verification value.
#[derive(Clone, PartialEq, Eq)]
pub struct Cvv {
    digits: [u8; 4],
    length: u8,
}

impl Cvv {
    /// Builds a CVV from a digits-only string of length 3 or 4.
    pub fn from_digits(text: &str) -> Option<Self> {
        if !is_all_digits(text) || !(3..=4).contains(&text.len()) {
            return None;
        }

        let mut digits = [0u8; 4];
        for (slot, b) in digits.iter_mut().zip(text.bytes()) {
            *slot = b - b'0';
        }

        Some(Self {
            digits,
            length: text.len() as u8,
        })
    }

    /// The CVV as text.
    pub fn as_string(&self) -> String {
        to_text(&self.digits[..self.length as usize])
    }

    /// Number of digits (3 or 4).
    #[inline]
    pub const fn length(&self) -> usize {
        self.length as usize
    }
}

impl fmt::Debug for Cvv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cvv")
            .field("value", &"***")
            .field("length", &self.length)
            .finish()
    }
}

impl fmt::Display for Cvv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", "*".repeat(self.length as usize))
    }
}

impl Drop for Cvv {
    fn drop(&mut self) {
        self.digits.zeroize();
    }
}

/// A fully validated `NUMBER|MONTH|YEAR|CVV` payload.
///
/// Only the parser constructs this type, and only when every field is in
/// range. There are no setters.
#[derive(Clone, PartialEq, Eq)]
pub struct CardInput {
    number: CardNumber,
    month: u8,
    year: u16,
    cvv: Cvv,
}

impl CardInput {
    pub(crate) fn new(number: CardNumber, month: u8, year: u16, cvv: Cvv) -> Self {
        Self {
            number,
            month,
            year,
            cvv,
        }
    }

    /// The card number.
    #[inline]
    pub fn number(&self) -> &CardNumber {
        &self.number
    }

    /// Expiry month, 1-12.
    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Expiry year after two-digit expansion, 0-9999.
    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// The CVV.
    #[inline]
    pub fn cvv(&self) -> &Cvv {
        &self.cvv
    }

    /// Returns true if the expiry month has fully passed at `now`.
    #[inline]
    pub fn is_expired_at(&self, now: NaiveDateTime) -> bool {
        crate::expiry::is_expired_at(self.month, self.year, now)
    }
}

impl fmt::Debug for CardInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardInput")
            .field("number", &self.number)
            .field("month", &self.month)
            .field("year", &self.year)
            .field("cvv", &self.cvv)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_card_number_bounds() {
        assert!(CardNumber::from_digits("411111111111").is_some());
        assert!(CardNumber::from_digits("4111111111111111111").is_some());
        assert!(CardNumber::from_digits("41111111111").is_none());
        assert!(CardNumber::from_digits("41111111111111111111").is_none());
        assert!(CardNumber::from_digits("4111 1111 1111 1111").is_none());
        assert!(CardNumber::from_digits("").is_none());
    }

    #[test]
    fn test_card_number_accessors() {
        let card = CardNumber::from_digits("4532111111111111").unwrap();
        assert_eq!(card.length(), 16);
        assert_eq!(card.number(), "4532111111111111");
        assert_eq!(card.bin(), "453211");
        assert_eq!(card.last_four(), "1111");
        assert_eq!(card.masked(), "**** **** **** 1111");
    }

    #[test]
    fn test_card_number_debug_is_masked() {
        let card = CardNumber::from_digits("4111111111111111").unwrap();
        let debug = format!("{:?}", card);
        assert!(!debug.contains("4111111111111111"));
        assert!(debug.contains("****"));
        assert_eq!(card.to_string(), "**** **** **** 1111");
    }

    #[test]
    fn test_cvv_bounds() {
        assert_eq!(Cvv::from_digits("123").unwrap().length(), 3);
        assert_eq!(Cvv::from_digits("0123").unwrap().as_string(), "0123");
        assert!(Cvv::from_digits("12").is_none());
        assert!(Cvv::from_digits("12345").is_none());
        assert!(Cvv::from_digits("12a").is_none());
    }

    #[test]
    fn test_cvv_is_hidden() {
        let cvv = Cvv::from_digits("987").unwrap();
        assert_eq!(cvv.to_string(), "***");
        assert!(!format!("{:?}", cvv).contains("987"));
    }

    #[test]
    fn test_card_input_debug_is_safe() {
        let input = CardInput::new(
            CardNumber::from_digits("4111111111111111").unwrap(),
            12,
            2026,
            Cvv::from_digits("123").unwrap(),
        );
        let debug = format!("{:?}", input);
        assert!(!debug.contains("4111111111111111"));
        assert!(debug.contains("\"***\""));
        assert!(debug.contains("2026"));
    }

    #[test]
    fn test_types_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CardNumber>();
        assert_send_sync::<Cvv>();
        assert_send_sync::<CardInput>();
    }
}
