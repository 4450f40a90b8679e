//! # binchecker
//!
//! Card number checks and BIN lookups for chat bots and command-line use.
//!
//! ## Features
//!
//! - Luhn checksum validation
//! - `NUMBER|MONTH|YEAR|CVV` payload parsing with two-digit year expansion
//! - Calendar-accurate expiry evaluation
//! - Card number masking and grouping for display
//! - BIN lookup client and a Telegram bot (optional features)
//!
//! ## Quick Start
//!
//! ```rust
//! use binchecker::{check_card, passes_luhn};
//!
//! // One-shot check of a chat payload
//! let report = check_card("4111 1111 1111 1111|12|2099|123").unwrap();
//! assert!(report.passes_luhn());
//! assert!(!report.expired());
//!
//! // Safe for logging - never exposes the full card number
//! assert_eq!(report.masked(), "**** **** **** 1111");
//!
//! // Quick boolean check
//! assert!(passes_luhn("4111-1111-1111-1111"));
//! assert!(!passes_luhn("4111111111111112"));
//! ```
//!
//! ## Parsing
//!
//! ```rust
//! use binchecker::{parse_card_input, InvalidCardInput};
//!
//! let input = parse_card_input("5500-0000-0000-0004|01|2030|1234").unwrap();
//! assert_eq!(input.number().last_four(), "0004");
//! assert_eq!(input.cvv().length(), 4);
//!
//! // Every malformed payload fails the same way
//! assert_eq!(parse_card_input("5500000000000004|13|2030|123").unwrap_err(), InvalidCardInput);
//! assert_eq!(parse_card_input("5500000000000004|01|2030").unwrap_err(), InvalidCardInput);
//! ```
//!
//! ## Masking and Formatting
//!
//! ```rust
//! use binchecker::{extract_digits, group_digits, mask_digits};
//!
//! assert_eq!(mask_digits("378282246310005"), "*** **** **** 0005");
//! assert_eq!(group_digits("378282246310005"), "3782 8224 6310 005");
//! assert_eq!(extract_digits("card: 4111-1111"), "41111111");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `serde` | `Serialize` for [`CheckReport`] |
//! | `lookup` | HTTP client for the BIN lookup service |
//! | `bot` | Telegram bot (implies `lookup`) |
//! | `cli` | `cardcheck` command-line tool |
//!
//! ## Security
//!
//! - Card numbers and CVVs are stored in fixed-size arrays, not heap strings
//! - Both are zeroized on drop
//! - `Debug` and `Display` show masked values only
//! - No unsafe code (`#![deny(unsafe_code)]`)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod card;
pub mod check;
pub mod digits;
pub mod error;
pub mod expiry;
pub mod format;
pub mod luhn;
pub mod mask;
pub mod parse;

#[cfg(feature = "lookup")]
pub mod lookup;

#[cfg(feature = "bot")]
pub mod bot;
#[cfg(feature = "bot")]
pub mod config;
#[cfg(feature = "bot")]
pub mod logging;

// Re-export main types at crate root
pub use card::{CardInput, CardNumber, Cvv, BIN_LENGTH, MAX_CARD_DIGITS, MIN_CARD_DIGITS};
pub use check::{check_card, check_card_at, CheckReport};
pub use digits::extract_digits;
pub use error::InvalidCardInput;
pub use expiry::is_expired;
pub use format::group_digits;
pub use luhn::passes_luhn;
pub use mask::mask_digits;
pub use parse::{parse_card_input, parse_card_input_at};
