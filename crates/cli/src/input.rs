//! Parsing raw operator input into typed values.

use chrono::{DateTime, NaiveDate, Utc};
use thiserror::Error;

use stockpath_inventory::export::DATE_FORMAT;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("'{0}' is not a whole number")]
    NotANumber(String),

    #[error("{what} must be positive")]
    NotPositive { what: &'static str },

    #[error("invalid date '{0}', use YYYY-MM-DD")]
    BadDate(String),
}

/// Parse a strictly positive integer such as a quantity or a threshold.
pub fn parse_positive(raw: &str, what: &'static str) -> Result<i64, InputError> {
    let trimmed = raw.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| InputError::NotANumber(trimmed.to_string()))?;
    if value <= 0 {
        return Err(InputError::NotPositive { what });
    }
    Ok(value)
}

/// Parse an optional `YYYY-MM-DD` date; blank input means no expiry.
///
/// The date is taken as midnight UTC.
pub fn parse_expiry(raw: &str) -> Result<Option<DateTime<Utc>>, InputError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let date = NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map_err(|_| InputError::BadDate(trimmed.to_string()))?;
    let midnight = date
        .and_hms_opt(0, 0, 0)
        .ok_or_else(|| InputError::BadDate(trimmed.to_string()))?;
    Ok(Some(midnight.and_utc()))
}
