use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Local timestamp layouts, with or without seconds; `%.f` also accepts
/// a missing fraction.
const TIMESTAMP_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Parse a story date.
///
/// Accepts a calendar date (`2024-03-04`), a year and month (`2024-03`,
/// read as the first of the month), a local timestamp (`2024-03-04T10:00`,
/// optional seconds and fraction, `T` or space separated), or an RFC 3339
/// timestamp with offset. The time component is discarded.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    if let Some(dt) = TIMESTAMP_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
    {
        return Some(dt.date());
    }
    NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d").ok()
}

/// Long form used under story headings, e.g. `March 4, 2024`.
pub fn format_long(date: NaiveDate) -> String {
    date.format("%B %-d, %Y").to_string()
}
