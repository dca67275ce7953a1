// Date handling for backend dates (ISO 8601) and user input

use chrono::{DateTime, Local, NaiveDate};
use anyhow::{Context, Result};

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// Parse a backend date: `YYYY-MM-DD` or a full RFC 3339 timestamp
pub fn parse_backend_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(date);
    }
    DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Local).date_naive())
}

/// Parse a date typed by the user (`YYYY-MM-DD`)
pub fn parse_date_input(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}'. Use YYYY-MM-DD.", s))
}

/// Format as "30 Okt 2026"; unparseable input is shown as-is
pub fn format_date(s: &str) -> String {
    use chrono::Datelike;
    match parse_backend_date(s) {
        Some(d) => format!("{} {} {}", d.day(), MONTHS[d.month0() as usize], d.year()),
        None => s.to_string(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineStatus {
    Open { days_left: i64 },
    Closed,
}

/// Applications are accepted through the end of the deadline day
pub fn deadline_status(deadline: &NaiveDate, today: &NaiveDate) -> DeadlineStatus {
    let days_left = (*deadline - *today).num_days();
    if days_left < 0 {
        DeadlineStatus::Closed
    } else {
        DeadlineStatus::Open { days_left }
    }
}

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_parse_backend_date() {
        assert_eq!(parse_backend_date("2026-10-30"), Some(date("2026-10-30")));
        assert!(parse_backend_date("2026-10-30T12:00:00+07:00").is_some());
        assert_eq!(parse_backend_date("besok"), None);
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2026-10-30"), "30 Okt 2026");
        assert_eq!(format_date("2026-05-01"), "1 Mei 2026");
        assert_eq!(format_date("segera"), "segera");
    }

    #[test]
    fn test_parse_date_input() {
        assert_eq!(parse_date_input("1998-02-17").unwrap(), date("1998-02-17"));
        assert!(parse_date_input("17/02/1998").is_err());
    }

    #[test]
    fn test_deadline_status() {
        let today = date("2026-10-14");
        assert_eq!(deadline_status(&date("2026-10-14"), &today), DeadlineStatus::Open { days_left: 0 });
        assert_eq!(deadline_status(&date("2026-10-20"), &today), DeadlineStatus::Open { days_left: 6 });
        assert_eq!(deadline_status(&date("2026-10-13"), &today), DeadlineStatus::Closed);
    }
}
