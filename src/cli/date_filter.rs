//! Date argument parsing for review-time filters.

use chrono::{DateTime, NaiveDate, Utc};

/// Parses a point in time from a CLI argument.
///
/// Accepts:
/// - Relative: "7d", "30d" (days ago from now)
/// - Absolute: "2024-01-15" (midnight UTC)
/// - RFC 3339: "2024-01-15T10:30:00+09:00"
pub fn parse_date(s: &str) -> Result<DateTime<Utc>, String> {
    let s = s.trim();

    if let Some(days_str) = s.strip_suffix('d') {
        let days: i64 = days_str
            .parse()
            .map_err(|_| format!("invalid relative date: {}", s))?;
        if days < 0 {
            return Err(format!("days must be non-negative: {}", s));
        }
        return Ok(Utc::now() - chrono::Duration::days(days));
    }

    if let Ok(ts) = DateTime::parse_from_rfc3339(s) {
        return Ok(ts.with_timezone(&Utc));
    }

    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
        format!(
            "invalid date format (expected YYYY-MM-DD, RFC 3339 or Nd): {}",
            s
        )
    })?;
    date.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| format!("invalid date: {}", s))
}
