use chrono::NaiveDate;

/// End label for a job that is still ongoing.
pub const PRESENT: &str = "Present";

/// Formats a `YYYY-MM` (or `YYYY-MM-DD`) value as "Jan 2021". Blank or
/// unparsable input yields an empty string.
pub fn format_month(value: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        return String::new();
    }
    NaiveDate::parse_from_str(&format!("{value}-01"), "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(value, "%Y-%m-%d"))
        .map(|date| date.format("%b %Y").to_string())
        .unwrap_or_default()
}

/// "Jan 2021 - Mar 2023", or "Jan 2021 - Present" for a current job. The
/// stored end month of a current job is never shown.
pub fn date_range(start: &str, end: &str, is_current: bool) -> String {
    let end = if is_current {
        PRESENT.to_string()
    } else {
        format_month(end)
    };
    format!("{} - {}", format_month(start), end)
}
