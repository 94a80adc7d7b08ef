//! Date utilities for the little-endian `DD.MM.YYYY` format used by statements and config.

use anyhow::{Result, bail};
use chrono::NaiveDate;

/// `chrono` format string for day.month.year dates.
pub const LITTLE_ENDIAN_DATE: &str = "%d.%m.%Y";

/// Parse a date like "31.10.2025". Day and month must be two digits.
pub fn parse_little_endian(s: &str) -> Result<NaiveDate> {
    let raw = s.trim();
    if !is_padded_little_endian(raw) {
        bail!("invalid date '{s}': expected DD.MM.YYYY");
    }
    NaiveDate::parse_from_str(raw, LITTLE_ENDIAN_DATE)
        .map_err(|e| anyhow::anyhow!("invalid date '{s}': {e}"))
}

fn is_padded_little_endian(s: &str) -> bool {
    let b = s.as_bytes();
    b.len() == 10
        && b[2] == b'.'
        && b[5] == b'.'
        && b.iter()
            .enumerate()
            .all(|(i, c)| i == 2 || i == 5 || c.is_ascii_digit())
}

/// Helper: format a date back into `DD.MM.YYYY`.
pub fn format_little_endian(date: NaiveDate) -> String {
    date.format(LITTLE_ENDIAN_DATE).to_string()
}
