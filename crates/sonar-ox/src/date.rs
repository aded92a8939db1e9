//! Date formatting for the search date filters.

use chrono::NaiveDate;

/// Format accepted by `search_before_date_filter` / `search_after_date_filter`.
pub const DATE_FILTER_FORMAT: &str = "%m/%d/%Y";

/// Render a date the way the search date filters expect it (`MM/DD/YYYY`).
#[must_use]
pub fn format_date_filter(date: NaiveDate) -> String {
    date.format(DATE_FILTER_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_month_and_day() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 7).unwrap();
        assert_eq!(format_date_filter(date), "03/07/2025");
    }

    #[test]
    fn keeps_four_digit_year() {
        let date = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(format_date_filter(date), "12/31/2024");
    }
}
