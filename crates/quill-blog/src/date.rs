//! Frontmatter dates.
//!
//! Posts carry dates as `2006-01-02 15:04:05 MST`. The zone abbreviation is
//! not interpreted; times are taken as UTC.

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::NaiveTime;
use chrono::SecondsFormat;
use chrono::Utc;

/// Parse a frontmatter date. A bare `YYYY-MM-DD` is midnight.
#[must_use]
pub fn parse(text: &str) -> Option<DateTime<Utc>> {
    let mut parts = text.split_whitespace();
    let date = NaiveDate::parse_from_str(parts.next()?, "%Y-%m-%d").ok()?;
    let time = match parts.next() {
        Some(time) => NaiveTime::parse_from_str(time, "%H:%M:%S").ok()?,
        None => NaiveTime::from_hms_opt(0, 0, 0)?,
    };
    Some(date.and_time(time).and_utc())
}

/// `Jan 2, 2006`. Dates that do not parse are shown as written.
#[must_use]
pub fn display(text: &str) -> String {
    match parse(text) {
        Some(date) => date.format("%b %-d, %Y").to_string(),
        None => {
            tracing::warn!(date = text, "unrecognized post date");
            text.to_string()
        }
    }
}

/// RFC 3339 in UTC, as used by Atom.
#[must_use]
pub fn rfc3339(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// RFC 3339 for a frontmatter date, falling back to the Unix epoch.
#[must_use]
pub fn rfc3339_or_epoch(text: &str) -> String {
    let date = parse(text).unwrap_or_else(|| {
        tracing::warn!(date = text, "unrecognized post date");
        DateTime::default()
    });
    rfc3339(&date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_zone() {
        let date = parse("2024-03-09 17:45:00 PST").unwrap();
        assert_eq!(rfc3339(&date), "2024-03-09T17:45:00Z");
    }

    #[test]
    fn test_parse_bare_date() {
        let date = parse("2019-12-31").unwrap();
        assert_eq!(rfc3339(&date), "2019-12-31T00:00:00Z");
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("").is_none());
        assert!(parse("yesterday").is_none());
        assert!(parse("2024-03-09 noon").is_none());
    }

    #[test]
    fn test_display() {
        assert_eq!(display("2024-03-09 17:45:00 UTC"), "Mar 9, 2024");
        assert_eq!(display("2006-01-02 15:04:05 MST"), "Jan 2, 2006");
        assert_eq!(display("someday"), "someday");
    }

    #[test]
    fn test_rfc3339_or_epoch() {
        assert_eq!(rfc3339_or_epoch("2006-01-02 15:04:05 MST"), "2006-01-02T15:04:05Z");
        assert_eq!(rfc3339_or_epoch("bad"), "1970-01-01T00:00:00Z");
    }
}
