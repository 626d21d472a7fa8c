//! Date coercion helpers
//!
//! Imported data carries dates in whatever shape the source used. The rule
//! at every parse boundary is coerce-or-null: a cell that cannot be read as
//! a calendar date becomes absent, it never raises. Once a date has been
//! parsed it stays a `jiff::civil::Date` and serializes canonically as
//! ISO-8601, so no later cleanup pass has to re-interpret strings.

use jiff::civil::Date;

/// Accepted input shapes, tried in order. ISO first (the canonical storage
/// form), then the slash and day-first variants that show up in
/// exported bank data.
const FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%d/%m/%Y", "%d-%m-%Y"];

/// Coerce a cell to a date, or null.
pub fn parse_date(cell: &str) -> Option<Date> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }
    // Datetime-ish cells ("2024-03-01 00:00:00") are truncated to the date
    // part before matching.
    let date_part = trimmed.split_whitespace().next().unwrap_or(trimmed);
    FORMATS
        .iter()
        .find_map(|fmt| Date::strptime(fmt, date_part).ok())
}

/// Convert a spreadsheet serial day number to a calendar date.
///
/// Serial 1 is 1900-01-01 in the 1900 date system, which makes day 0
/// 1899-12-30 once the leap-year bug baked into that system is accounted
/// for. Out-of-range serials coerce to null like any other bad date cell.
pub fn from_excel_serial(serial: f64) -> Option<Date> {
    if !serial.is_finite() || serial < 1.0 || serial > 2_958_465.0 {
        return None;
    }
    let epoch = jiff::civil::date(1899, 12, 30);
    epoch.checked_add(jiff::Span::new().days(serial.trunc() as i64)).ok()
}

/// Year-month key in `YYYY-MM` form, the grouping key for monthly views.
pub fn year_month(date: Date) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::civil::date;

    #[test]
    fn test_parse_date_iso() {
        assert_eq!(parse_date("2024-03-05"), Some(date(2024, 3, 5)));
    }

    #[test]
    fn test_parse_date_alternate_formats() {
        assert_eq!(parse_date("2024/03/05"), Some(date(2024, 3, 5)));
        assert_eq!(parse_date("05/03/2024"), Some(date(2024, 3, 5)));
        assert_eq!(parse_date("05-03-2024"), Some(date(2024, 3, 5)));
    }

    #[test]
    fn test_parse_date_truncates_time_component() {
        assert_eq!(parse_date("2024-03-05 13:45:00"), Some(date(2024, 3, 5)));
    }

    #[test]
    fn test_parse_date_coerces_garbage_to_none() {
        assert_eq!(parse_date("not a date"), None);
        assert_eq!(parse_date(""), None);
        assert_eq!(parse_date("2024-13-40"), None);
    }

    #[test]
    fn test_excel_serial() {
        // 45292 is 2024-01-01 in the 1900 date system
        assert_eq!(from_excel_serial(45292.0), Some(date(2024, 1, 1)));
        assert_eq!(from_excel_serial(0.0), None);
        assert_eq!(from_excel_serial(f64::NAN), None);
    }

    #[test]
    fn test_year_month_key() {
        assert_eq!(year_month(date(2024, 3, 5)), "2024-03");
    }
}
