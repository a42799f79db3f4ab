//! Tolerant parsing of price and timestamp tokens from heterogeneous feeds.
//!
//! Both normalizers are pure functions over a single token. Neither knows
//! which record field it is cleaning; the record builder attaches that
//! context to any error.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::{DecimalError, IngestError};

/// Currency symbols stripped wherever they occur in a price token.
const CURRENCY_SYMBOLS: [char; 7] = ['$', '€', '£', '¥', '₹', '₽', '₩'];

/// Characters used as thousands separators by space-grouping locales
/// (plain, no-break and narrow no-break space).
const SPACE_SEPARATORS: [char; 3] = [' ', '\u{a0}', '\u{202f}'];

/// Converts a free-form price token into a finite `f64`.
///
/// Currency symbols and space separators are dropped first. A token that is
/// then left with exactly one comma and no period is read as a European
/// decimal (`"1 234,56"` is `1234.56`); otherwise every comma is a thousands
/// separator (`"$1,234.50"` is `1234.5`).
///
/// # Errors
///
/// Returns [`DecimalError::Empty`] if nothing is left after cleaning,
/// [`DecimalError::Parse`] if the cleaned text is not a number, and
/// [`DecimalError::NotFinite`] for infinities and NaN.
pub fn clean_decimal(raw: &str) -> Result<f64, DecimalError> {
    let mut cleaned: String = raw
        .chars()
        .filter(|c| !CURRENCY_SYMBOLS.contains(c) && !SPACE_SEPARATORS.contains(c))
        .collect();

    if cleaned.matches(',').count() == 1 && !cleaned.contains('.') {
        cleaned = cleaned.replacen(',', ".", 1);
    } else {
        cleaned.retain(|c| c != ',');
    }

    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(DecimalError::Empty);
    }

    let value: f64 = cleaned.parse()?;
    if !value.is_finite() {
        return Err(DecimalError::NotFinite);
    }
    Ok(value)
}

/// Timestamp layouts accepted by [`parse_timestamp`], in the order they are
/// tried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimestampFormat {
    /// `2006-01-02T15:04:05Z07:00`. chrono also accepts a space in place of
    /// the `T`, so a zoned `2006-01-02 15:04:05Z` matches here rather than
    /// falling through to `SqlDateTime`.
    Rfc3339,
    /// `2006-01-02T15:04:05`, optional fractional seconds
    IsoLocal,
    /// `2006-01-02 15:04:05`, optional fractional seconds
    SqlDateTime,
    /// `2006-01-02`
    DateOnly,
    /// `01/02/2006`
    MonthDayYear,
    /// `02/01/2006`
    DayMonthYear,
    /// `2006/01/02`
    YearMonthDay,
}

impl TimestampFormat {
    /// Fallback order. `MonthDayYear` precedes `DayMonthYear`, so a value
    /// valid under both (`03/04/2025`) is always read month-first.
    pub const ORDER: [TimestampFormat; 7] = [
        TimestampFormat::Rfc3339,
        TimestampFormat::IsoLocal,
        TimestampFormat::SqlDateTime,
        TimestampFormat::DateOnly,
        TimestampFormat::MonthDayYear,
        TimestampFormat::DayMonthYear,
        TimestampFormat::YearMonthDay,
    ];

    fn parse(self, s: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
        match self {
            TimestampFormat::Rfc3339 => DateTime::parse_from_rfc3339(s),
            TimestampFormat::IsoLocal => naive_date_time(s, "%Y-%m-%dT%H:%M:%S%.f"),
            TimestampFormat::SqlDateTime => naive_date_time(s, "%Y-%m-%d %H:%M:%S%.f"),
            TimestampFormat::DateOnly => naive_date(s, "%Y-%m-%d"),
            TimestampFormat::MonthDayYear => naive_date(s, "%m/%d/%Y"),
            TimestampFormat::DayMonthYear => naive_date(s, "%d/%m/%Y"),
            TimestampFormat::YearMonthDay => naive_date(s, "%Y/%m/%d"),
        }
    }
}

fn naive_date_time(s: &str, fmt: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, fmt).map(|dt| dt.and_utc().fixed_offset())
}

fn naive_date(s: &str, fmt: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError> {
    NaiveDate::parse_from_str(s, fmt)
        .map(|d| d.and_time(NaiveTime::MIN).and_utc().fixed_offset())
}

/// Parses a free-form timestamp, trying each [`TimestampFormat`] in order.
///
/// Zone-less layouts are interpreted with a zero offset.
///
/// # Errors
///
/// Returns [`IngestError::InvalidTimestamp`] carrying the error from the last
/// layout tried if none match.
pub fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>, IngestError> {
    parse_timestamp_with_format(raw).map(|(value, _)| value)
}

/// Like [`parse_timestamp`], also reporting which layout matched.
///
/// # Errors
///
/// Returns [`IngestError::InvalidTimestamp`] if no layout matches.
pub fn parse_timestamp_with_format(
    raw: &str,
) -> Result<(DateTime<FixedOffset>, TimestampFormat), IngestError> {
    let s = raw.trim();

    let [first, rest @ ..] = TimestampFormat::ORDER;
    let mut result = first.parse(s).map(|value| (value, first));
    for format in rest {
        if result.is_ok() {
            break;
        }
        result = format.parse(s).map(|value| (value, format));
    }

    result.map_err(|source| IngestError::InvalidTimestamp {
        raw: raw.to_owned(),
        source,
    })
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
