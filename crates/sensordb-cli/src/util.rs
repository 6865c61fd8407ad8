//! Timestamp parsing and formatting.

use anyhow::{Context, Result};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// Parse a timestamp given as integer milliseconds or as RFC 3339.
pub fn parse_timestamp(input: &str) -> Result<i64> {
    let input = input.trim();
    if let Ok(millis) = input.parse::<i64>() {
        return Ok(millis);
    }

    let datetime = OffsetDateTime::parse(input, &Rfc3339).with_context(|| {
        format!("Invalid timestamp '{input}': expected milliseconds or RFC 3339")
    })?;
    i64::try_from(datetime.unix_timestamp_nanos() / 1_000_000)
        .with_context(|| format!("Timestamp '{input}' is out of range"))
}

/// Format milliseconds as RFC 3339, falling back to the raw number when the
/// instant is outside the representable calendar range.
pub fn format_timestamp(millis: i64) -> String {
    OffsetDateTime::from_unix_timestamp_nanos(i128::from(millis) * 1_000_000)
        .ok()
        .and_then(|t| t.format(&Rfc3339).ok())
        .unwrap_or_else(|| millis.to_string())
}
