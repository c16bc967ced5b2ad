use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};

use crate::error::SigningError;

/// Day, month, four-digit year, hour, minute, second; no separators.
pub const TIMESTAMP_FORMAT: &str = "%d%m%Y%H%M%S";

pub fn format_timestamp(t: &DateTime<FixedOffset>) -> String {
    t.format(TIMESTAMP_FORMAT).to_string()
}

/// Reads a timestamp produced by [`format_timestamp`] as local time at `offset`.
pub fn parse_timestamp(text: &str, offset: FixedOffset) -> Result<DateTime<FixedOffset>, SigningError> {
    let invalid = || SigningError::InvalidTimestamp(text.to_string());

    if text.len() != 14 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    let naive = NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT).map_err(|_| invalid())?;
    offset.from_local_datetime(&naive).single().ok_or_else(invalid)
}
