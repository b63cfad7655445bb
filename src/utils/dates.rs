use crate::utils::constants::{FORECAST_DATE_FORMAT, FORECAST_DATE_LEN};
use chrono::{Local, NaiveDate};

/// True when `name` is exactly eight ASCII digits, the `YYYYMMDD` sheet naming.
///
/// Only the shape is checked: `20251399` qualifies, because sheet names are
/// taken verbatim as forecast dates.
pub fn is_forecast_date_label(name: &str) -> bool {
    name.len() == FORECAST_DATE_LEN && name.bytes().all(|b| b.is_ascii_digit())
}

/// Today's local date as `YYYYMMDD`
pub fn today_forecast_date() -> String {
    Local::now().format(FORECAST_DATE_FORMAT).to_string()
}

/// Parse a `YYYYMMDD` forecast date, if it names a real calendar day
pub fn parse_forecast_date(date: &str) -> Option<NaiveDate> {
    if !is_forecast_date_label(date) {
        return None;
    }
    NaiveDate::parse_from_str(date, FORECAST_DATE_FORMAT).ok()
}

/// `20250101` -> `2025-01-01`. Anything else is returned unchanged.
pub fn format_iso(date: &str) -> String {
    if is_forecast_date_label(date) {
        format!("{}-{}-{}", &date[0..4], &date[4..6], &date[6..8])
    } else {
        date.to_string()
    }
}

/// `20250101` -> `1 Jan`, the forecast card heading
pub fn format_short(date: &str) -> String {
    match parse_forecast_date(date) {
        Some(day) => day.format("%-d %b").to_string(),
        None => date.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_date_label() {
        assert!(is_forecast_date_label("20250101"));
        assert!(is_forecast_date_label("20251399"));
        assert!(!is_forecast_date_label("2025011"));
        assert!(!is_forecast_date_label("202501011"));
        assert!(!is_forecast_date_label("Sheet1"));
        assert!(!is_forecast_date_label("2025-01-01"));
    }

    #[test]
    fn test_today_has_label_shape() {
        assert!(is_forecast_date_label(&today_forecast_date()));
    }

    #[test]
    fn test_formatting() {
        assert_eq!(format_iso("20250101"), "2025-01-01");
        assert_eq!(format_iso("Sheet1"), "Sheet1");
        assert_eq!(format_short("20250101"), "1 Jan");
        assert_eq!(format_short("20251224"), "24 Dec");
        // Right shape, impossible day
        assert_eq!(format_short("20251399"), "20251399");
    }
}
