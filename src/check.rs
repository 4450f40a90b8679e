//! One-shot card check: parse, Luhn, mask and expiry.
//!
//! The clock is read once per check, and that single reading drives both
//! two-digit year expansion and the expiry verdict.

use chrono::{Local, NaiveDateTime};

use crate::card::CardInput;
use crate::error::InvalidCardInput;
use crate::expiry::format_expiry;
use crate::parse::parse_card_input_at;

/// Outcome of checking one `NUMBER|MONTH|YEAR|CVV` payload.
///
/// Holds no full card number or CVV, so it is safe to log and render.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct CheckReport {
    passes_luhn: bool,
    masked: String,
    expired: bool,
    month: u8,
    year: u16,
    bin: String,
}

impl CheckReport {
    /// Builds the report for an already parsed input.
    pub fn from_input(input: &CardInput, now: NaiveDateTime) -> Self {
        let number = input.number();
        Self {
            passes_luhn: number.passes_luhn(),
            masked: number.masked(),
            expired: input.is_expired_at(now),
            month: input.month(),
            year: input.year(),
            bin: number.bin(),
        }
    }

    /// Whether the card number passes the Luhn checksum.
    #[inline]
    pub fn passes_luhn(&self) -> bool {
        self.passes_luhn
    }

    /// The masked card number, e.g. `**** **** **** 1111`.
    #[inline]
    pub fn masked(&self) -> &str {
        &self.masked
    }

    /// Whether the expiry month had fully passed when the check ran.
    #[inline]
    pub fn expired(&self) -> bool {
        self.expired
    }

    /// Expiry month, 1-12.
    #[inline]
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Expiry year after two-digit expansion.
    #[inline]
    pub fn year(&self) -> u16 {
        self.year
    }

    /// The 6-digit BIN prefix of the card number.
    #[inline]
    pub fn bin(&self) -> &str {
        &self.bin
    }

    /// Expiry formatted as `MM/YYYY`.
    pub fn expiry_display(&self) -> String {
        format_expiry(self.month, self.year)
    }
}

/// Checks a payload at the given moment.
///
/// # Example
///
/// ```
/// use binchecker::check::check_card_at;
/// use chrono::NaiveDate;
///
/// let now = NaiveDate::from_ymd_opt(2025, 5, 20)
///     .unwrap()
///     .and_hms_opt(12, 0, 0)
///     .unwrap();
///
/// let report = check_card_at("4111111111111111|12|26|123", now).unwrap();
/// assert!(report.passes_luhn());
/// assert!(!report.expired());
/// assert_eq!(report.masked(), "**** **** **** 1111");
/// assert_eq!(report.expiry_display(), "12/2026");
/// ```
pub fn check_card_at(raw: &str, now: NaiveDateTime) -> Result<CheckReport, InvalidCardInput> {
    let input = parse_card_input_at(raw, now.date())?;
    Ok(CheckReport::from_input(&input, now))
}

/// Checks a payload against the local clock, read once.
#[inline]
pub fn check_card(raw: &str) -> Result<CheckReport, InvalidCardInput> {
    check_card_at(raw, Local::now().naive_local())
}
