//! Event date parsing.

use chrono::NaiveDate;

/// Parse the leading `YYYY-MM-DD` of a Darwin Core `eventDate`.
///
/// Timestamps (`1998-05-02T10:00`) and ranges (`1998-05-02/1998-05-04`) use
/// the part before the separator. Anything else yields `None`.
pub fn parse_event_date(text: &str) -> Option<NaiveDate> {
    let head = text.trim().split(['T', '/']).next()?.trim();
    if head.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(head, "%Y-%m-%d").ok()
}

/// Absolute distance between two dates in whole days.
pub fn days_between(a: NaiveDate, b: NaiveDate) -> i64 {
    (a - b).num_days().abs()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(
            parse_event_date("1998-05-02"),
            NaiveDate::from_ymd_opt(1998, 5, 2)
        );
    }

    #[test]
    fn test_parse_timestamp_and_range() {
        let expected = NaiveDate::from_ymd_opt(2001, 11, 30);
        assert_eq!(parse_event_date("2001-11-30T08:15:00Z"), expected);
        assert_eq!(parse_event_date("2001-11-30/2001-12-02"), expected);
    }

    #[test]
    fn test_unparseable_dates_are_none() {
        assert_eq!(parse_event_date(""), None);
        assert_eq!(parse_event_date("   "), None);
        assert_eq!(parse_event_date("May 1998"), None);
        assert_eq!(parse_event_date("1998-02-30"), None);
    }

    #[test]
    fn test_days_between_is_absolute() {
        let a = NaiveDate::from_ymd_opt(2020, 2, 27).unwrap();
        let b = NaiveDate::from_ymd_opt(2020, 3, 1).unwrap();
        assert_eq!(days_between(a, b), 3);
        assert_eq!(days_between(b, a), 3);
    }
}
