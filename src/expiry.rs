//! Card expiry evaluation.
//!
//! A card is valid through the last calendar day of its expiry month and
//! expired from the following day on.
//!
//! # Example
//!
//! ```
//! use binchecker::expiry::is_expired_at;
//! use chrono::NaiveDate;
//!
//! let mid_december = NaiveDate::from_ymd_opt(2020, 12, 15)
//!     .unwrap()
//!     .and_hms_opt(9, 0, 0)
//!     .unwrap();
//! assert!(!is_expired_at(12, 2020, mid_december));
//!
//! let new_year = NaiveDate::from_ymd_opt(2021, 1, 1)
//!     .unwrap()
//!     .and_hms_opt(0, 0, 0)
//!     .unwrap();
//! assert!(is_expired_at(12, 2020, new_year));
//! ```

use chrono::{Days, Local, NaiveDate, NaiveDateTime};

/// Returns the last calendar day of `month`/`year`.
///
/// Computed as the first day of the following month minus one day, so
/// December rolls over into January of the next year. Returns `None` when the
/// month is out of range or the date cannot be represented.
pub fn last_day_of_month(month: u8, year: u16) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) {
        return None;
    }

    let (next_year, next_month) = if month == 12 {
        (i32::from(year) + 1, 1)
    } else {
        (i32::from(year), u32::from(month) + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.checked_sub_days(Days::new(1))
}

/// Returns true if `now` falls after the last day of `month`/`year`.
///
/// An unrepresentable month/year is reported as not expired.
pub fn is_expired_at(month: u8, year: u16, now: NaiveDateTime) -> bool {
    match last_day_of_month(month, year) {
        Some(last_day) => now.date() > last_day,
        None => false,
    }
}

/// Like [`is_expired_at`], evaluated against the local clock.
#[inline]
pub fn is_expired(month: u8, year: u16) -> bool {
    is_expired_at(month, year, Local::now().naive_local())
}

/// Formats an expiry as `MM/YYYY`.
#[inline]
pub fn format_expiry(month: u8, year: u16) -> String {
    format!("{:02}/{:04}", month, year)
}
