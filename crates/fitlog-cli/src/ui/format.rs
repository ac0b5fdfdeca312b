//! String formatting utilities for UI rendering.

use chrono::{Datelike, NaiveDate};

/// Truncate a string to max length, adding ellipsis if needed.
pub fn truncate(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        return s.to_string();
    }
    if max_len <= 3 {
        return s.chars().take(max_len).collect();
    }
    let truncated: String = s.chars().take(max_len - 3).collect();
    format!("{}...", truncated)
}

/// Format a date for display: "Tue 5 Mar 2024" when pretty, ISO otherwise.
pub fn format_date(date: NaiveDate, pretty: bool) -> String {
    if pretty {
        format!("{} {}", date.format("%a"), date.format("%-d %b %Y"))
    } else {
        date.format("%Y-%m-%d").to_string()
    }
}

/// Relative day label used in headers ("today", "yesterday", or the weekday).
pub fn day_label(date: NaiveDate, today: NaiveDate) -> String {
    match (today - date).num_days() {
        0 => "today".to_string(),
        1 => "yesterday".to_string(),
        _ if date.year() == today.year() => date.format("%A").to_string(),
        _ => date.format("%Y").to_string(),
    }
}

/// "1 set", "3 sets".
pub fn plural(count: usize, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("{} {}", count, singular)
    } else {
        format!("{} {}", count, plural)
    }
}

/// Sanitize a string for single-line output (replace newlines with spaces).
pub fn single_line(s: &str) -> String {
    s.replace('\n', " ").replace('\r', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Barbell Squat", 20), "Barbell Squat");
        assert_eq!(truncate("Flat Barbell Bench Press", 10), "Flat Ba...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date(d("2024-03-05"), false), "2024-03-05");
        assert_eq!(format_date(d("2024-03-05"), true), "Tue 5 Mar 2024");
    }

    #[test]
    fn test_day_label() {
        let today = d("2024-03-05");
        assert_eq!(day_label(today, today), "today");
        assert_eq!(day_label(d("2024-03-04"), today), "yesterday");
        assert_eq!(day_label(d("2024-03-01"), today), "Friday");
        assert_eq!(day_label(d("2023-12-30"), today), "2023");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "set", "sets"), "1 set");
        assert_eq!(plural(0, "set", "sets"), "0 sets");
    }

    #[test]
    fn test_single_line() {
        assert_eq!(single_line("felt\r\nstrong"), "felt strong");
    }
}
