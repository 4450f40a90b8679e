//! Error type for card input parsing.
//!
//! Parsing has exactly one failure outcome. The parser never reports which of
//! the four fields was rejected; callers that want to guide users can only say
//! "the payload was malformed".

use std::fmt;

/// The raw payload was not a well-formed `NUMBER|MONTH|YEAR|CVV` string.
///
/// Returned for every kind of malformed input: wrong field count, non-digit
/// fields, a card number outside 12-19 digits, a month outside 1-12, a year
/// above 9999 or a CVV that is not 3-4 digits long.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InvalidCardInput;

impl fmt::Display for InvalidCardInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid card input (expected NUMBER|MONTH|YEAR|CVV, e.g. 4111111111111111|12|2026|123)"
        )
    }
}

impl std::error::Error for InvalidCardInput {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            InvalidCardInput.to_string(),
            "invalid card input (expected NUMBER|MONTH|YEAR|CVV, e.g. 4111111111111111|12|2026|123)"
        );
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<InvalidCardInput>();
    }
}
