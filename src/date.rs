//! Composite match dates.
//!
//! A match date is packed into a single integer as `year * 10000 + month * 100 + day`, so that
//! plain integer comparison orders dates chronologically.

use chrono::NaiveDate;
use thiserror::Error;

pub type MatchDate = u32;

#[inline]
pub fn compose(year: u32, month: u32, day: u32) -> MatchDate {
    year * 10_000 + month * 100 + day
}

#[inline]
pub fn year(date: MatchDate) -> u32 {
    date / 10_000
}

#[inline]
pub fn month(date: MatchDate) -> u32 {
    (date % 10_000) / 100
}

#[inline]
pub fn day(date: MatchDate) -> u32 {
    date % 100
}

/// Two-digit years below this value belong to the 2000s; the rest to the 1900s.
pub const CENTURY_ROLLOVER: u32 = 19;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid date '{0}'")]
pub struct InvalidDate(pub String);

/// Parses a `dd/mm/yy` or `dd/mm/yyyy` date. Two-digit years are expanded using
/// [`CENTURY_ROLLOVER`]; four-digit years are taken as given. The result must be a real
/// calendar date.
pub fn parse_dmy(str: &str) -> Result<MatchDate, InvalidDate> {
    let invalid = || InvalidDate(str.to_string());
    let mut parts = str.trim().split('/');
    let mut next = || -> Result<u32, InvalidDate> {
        parts
            .next()
            .and_then(|part| part.trim().parse::<u32>().ok())
            .ok_or_else(invalid)
    };
    let day = next()?;
    let month = next()?;
    let year = match next()? {
        year if year < CENTURY_ROLLOVER => 2000 + year,
        year if year < 100 => 1900 + year,
        year => year,
    };
    if parts.next().is_some() {
        return Err(invalid());
    }

    NaiveDate::from_ymd_opt(year as i32, month, day)
        .map(|_| compose(year, month, day))
        .ok_or_else(invalid)
}
