//! Business-hours parsing and open-now evaluation.
//!
//! Hours strings are authored by hand in a small micro-format: entries
//! separated by `;` or whitespace, each either a day-ranged window
//! (`週一-五 09:00-18:00`) or a bare time range (`08:00-22:00`) that applies
//! to every day of the week. The parser is tolerant — tokens that match
//! neither form are skipped, and an unusable string simply evaluates to
//! "closed".
//!
//! Evaluation is clock-free: the instant is always an explicit parameter so
//! behavior stays deterministic under test. Only [`is_open_now`] touches the
//! system clock.

pub mod parser;

#[cfg(test)]
mod parser_tests;

pub use parser::{parse, TimeWindow};

use chrono::{Datelike, NaiveDateTime, Timelike};

/// Whether the business is open at the given instant.
///
/// True iff at least one parsed window contains the instant: its day of
/// week falls inside the window's inclusive day range and its minute of day
/// inside the half-open `[start, end)` minute range. Empty or unparseable
/// input evaluates to `false`; this function never fails.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use poimap::hours::is_open_at;
///
/// // 2024-01-02 is a Tuesday.
/// let tuesday_morning = NaiveDate::from_ymd_opt(2024, 1, 2)
///     .unwrap()
///     .and_hms_opt(10, 0, 0)
///     .unwrap();
///
/// assert!(is_open_at("週一-五 09:00-18:00", tuesday_morning));
/// assert!(!is_open_at("not hours at all", tuesday_morning));
/// ```
pub fn is_open_at(raw: &str, at: NaiveDateTime) -> bool {
    let day = at.weekday().num_days_from_sunday() as u8;
    let minute = (at.hour() * 60 + at.minute()) as u16;
    parser::parse(raw).iter().any(|w| w.contains(day, minute))
}

/// Convenience wrapper over [`is_open_at`] using the local wall clock.
///
/// Kept at the crate edge so all pure logic stays deterministic.
pub fn is_open_now(raw: &str) -> bool {
    is_open_at(raw, chrono::Local::now().naive_local())
}
