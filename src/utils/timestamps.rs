use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset};

/// Placeholder shown when a conversation has no usable timestamp
pub const UNKNOWN_DATE: &str = "Unknown";

/// Parse a raw log timestamp as RFC 3339, keeping its original offset
pub fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(raw).with_context(|| format!("Invalid timestamp: {}", raw))
}

/// Format a timestamp for listings:
/// - `"2025-03-01 14:05"` when it parses
/// - `"Unknown"` when it is missing or malformed
pub fn format_listing_date(raw: Option<&str>) -> String {
    raw.and_then(|raw| parse_timestamp(raw).ok())
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_else(|| UNKNOWN_DATE.to_string())
}

/// Compact `YYYYMMDD` date used in export file names
pub fn format_file_date(raw: &str) -> Result<String> {
    Ok(parse_timestamp(raw)?.format("%Y%m%d").to_string())
}
