//! Parsing of `NUMBER|MONTH|YEAR|CVV` payloads.
//!
//! # Rules
//!
//! - Exactly four `|`-separated fields.
//! - NUMBER: spaces and dashes are removed, then 12-19 ASCII digits remain.
//! - MONTH: digits only, value 1-12.
//! - YEAR: digits only, value 0-9999. A two-digit year is placed in the
//!   current century (`26` becomes `2026` during the 2000s); any other length
//!   is taken as written.
//! - CVV: 3 or 4 digits.
//!
//! Any violation yields [`InvalidCardInput`] and nothing else.
//!
//! # Example
//!
//! ```
//! use binchecker::parse::parse_card_input_at;
//! use chrono::NaiveDate;
//!
//! let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
//!
//! let input = parse_card_input_at("4111 1111 1111 1111|12|26|123", today).unwrap();
//! assert_eq!(input.number().number(), "4111111111111111");
//! assert_eq!(input.month(), 12);
//! assert_eq!(input.year(), 2026);
//! assert_eq!(input.cvv().as_string(), "123");
//!
//! assert!(parse_card_input_at("4111111111111111|13|2026|123", today).is_err());
//! ```

use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};

use crate::card::{CardInput, CardNumber, Cvv};
use crate::digits::is_all_digits;
use crate::error::InvalidCardInput;

/// Field separator of the payload.
pub const FIELD_SEPARATOR: char = '|';

/// Largest accepted expiry year.
pub const MAX_YEAR: u32 = 9999;

/// Parses a payload, expanding two-digit years relative to `today`.
pub fn parse_card_input_at(raw: &str, today: NaiveDate) -> Result<CardInput, InvalidCardInput> {
    let fields: Vec<&str> = raw.split(FIELD_SEPARATOR).collect();
    let [number, month, year, cvv] = fields.as_slice() else {
        return Err(InvalidCardInput);
    };

    let number = parse_number(number).ok_or(InvalidCardInput)?;
    let month = parse_month(month).ok_or(InvalidCardInput)?;
    let year = parse_year(year, today).ok_or(InvalidCardInput)?;
    let cvv = Cvv::from_digits(cvv).ok_or(InvalidCardInput)?;

    Ok(CardInput::new(number, month, year, cvv))
}

/// Parses a payload against the local clock.
#[inline]
pub fn parse_card_input(raw: &str) -> Result<CardInput, InvalidCardInput> {
    parse_card_input_at(raw, Local::now().date_naive())
}

impl FromStr for CardInput {
    type Err = InvalidCardInput;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_card_input(s)
    }
}

fn parse_number(field: &str) -> Option<CardNumber> {
    let cleaned: String = field.chars().filter(|c| *c != ' ' && *c != '-').collect();
    CardNumber::from_digits(&cleaned)
}

fn parse_month(field: &str) -> Option<u8> {
    if !is_all_digits(field) {
        return None;
    }

    let month: u32 = field.parse().ok()?;
    if (1..=12).contains(&month) {
        Some(month as u8)
    } else {
        None
    }
}

fn parse_year(field: &str, today: NaiveDate) -> Option<u16> {
    if !is_all_digits(field) {
        return None;
    }

    let value: u32 = field.parse().ok()?;
    if value > MAX_YEAR {
        return None;
    }

    let year = if field.len() == 2 {
        let century = today.year().div_euclid(100) * 100;
        century + value as i32
    } else {
        value as i32
    };

    u16::try_from(year).ok().filter(|y| u32::from(*y) <= MAX_YEAR)
}
