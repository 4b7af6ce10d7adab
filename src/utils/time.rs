use chrono::NaiveDate;

/// This is the standard way of converting a date to a string when talking to the entry service.
pub fn date_to_api_string(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Date as shown next to an entry in the history, e.g. `15 Mar 2024`.
pub fn date_to_display_string(date: NaiveDate) -> String {
    date.format("%d %b %Y").to_string()
}

/// Reads a calendar date the way the entry service sends it. Both `2024-03-15` and timestamps such
/// as `2024-03-15T00:00:00.000Z` are accepted. Only the written calendar date is used, the time
/// and the offset are ignored so that a date never shifts because of the local timezone.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let date_part = value.get(..10)?;
    let rest = &value[10..];
    if !(rest.is_empty() || rest.starts_with('T') || rest.starts_with(' ')) {
        return None;
    }
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

/// Whole calendar days from `earlier` to `later`. Negative when `earlier` is actually later.
pub fn days_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{date_to_api_string, date_to_display_string, days_between, parse_calendar_date};

    const TEST_DATE: NaiveDate = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();

    #[test]
    fn test_formatting() {
        assert_eq!(date_to_api_string(TEST_DATE), "2024-03-05");
        assert_eq!(date_to_display_string(TEST_DATE), "05 Mar 2024");
    }

    #[test]
    fn test_parse_plain_and_timestamp() {
        assert_eq!(parse_calendar_date("2024-03-05"), Some(TEST_DATE));
        assert_eq!(parse_calendar_date(" 2024-03-05 "), Some(TEST_DATE));
        assert_eq!(
            parse_calendar_date("2024-03-05T23:30:00.000Z"),
            Some(TEST_DATE)
        );
        assert_eq!(
            parse_calendar_date("2024-03-05T01:00:00+05:00"),
            Some(TEST_DATE)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_calendar_date(""), None);
        assert_eq!(parse_calendar_date("not a date"), None);
        assert_eq!(parse_calendar_date("2024-13-01"), None);
        assert_eq!(parse_calendar_date("2024-02-30"), None);
        assert_eq!(parse_calendar_date("2024-03-055"), None);
    }

    #[test]
    fn test_days_between() {
        let later = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(days_between(TEST_DATE, later), 5);
        assert_eq!(days_between(later, TEST_DATE), -5);
        assert_eq!(days_between(TEST_DATE, TEST_DATE), 0);
    }
}
