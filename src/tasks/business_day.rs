//! Next business day (Monday to Friday) after a date

use crate::error::{ErrorCode, Result, TaskError};
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

pub fn is_business_day(weekday: Weekday) -> bool {
    !matches!(weekday, Weekday::Sat | Weekday::Sun)
}

/// Parse a date or date-time; plain dates land on midnight
pub fn parse_date(input: &str) -> Result<NaiveDateTime> {
    let trimmed = input.trim();

    if let Some(dt) = DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
    {
        return Ok(dt);
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
        .map(|date| date.and_time(NaiveTime::MIN))
        .ok_or_else(|| {
            TaskError::parse(
                ErrorCode::PARSE_INVALID_DATE,
                "Expected a date such as 2022-10-22",
                input,
            )
        })
}

/// First business day strictly after `given`, keeping its time of day
pub fn next_business_day_after(given: NaiveDateTime) -> Result<NaiveDateTime> {
    let mut next = given;
    loop {
        next = next.checked_add_days(Days::new(1)).ok_or_else(|| {
            TaskError::validation_with_code(
                ErrorCode::VALIDATION_OUT_OF_RANGE,
                format!("No representable day after {}", next),
                None,
            )
        })?;
        if is_business_day(next.weekday()) {
            return Ok(next);
        }
    }
}

/// Parse `date_str` and return the next business day after it
pub fn next_business_day(date_str: &str) -> Result<NaiveDateTime> {
    next_business_day_after(parse_date(date_str)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn midnight(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_saturday_rolls_to_monday() {
        assert_eq!(next_business_day("2022-10-22").unwrap(), midnight(2022, 10, 24));
    }

    #[test]
    fn test_friday_rolls_to_monday() {
        assert_eq!(next_business_day("2022-10-28").unwrap(), midnight(2022, 10, 31));
    }

    #[test]
    fn test_sunday_rolls_to_monday() {
        assert_eq!(next_business_day("2022-10-30").unwrap(), midnight(2022, 10, 31));
    }

    #[test]
    fn test_weekdays_advance_one_day() {
        assert_eq!(next_business_day("2022-10-31").unwrap(), midnight(2022, 11, 1));
        assert_eq!(next_business_day("2022-11-02").unwrap(), midnight(2022, 11, 3));
    }

    #[test]
    fn test_time_of_day_is_kept() {
        let result = next_business_day("2022-10-28 13:45:00").unwrap();
        assert_eq!(result, midnight(2022, 10, 31) + chrono::Duration::minutes(13 * 60 + 45));
    }

    #[test]
    fn test_slash_format() {
        assert_eq!(next_business_day("2022/10/22").unwrap(), midnight(2022, 10, 24));
    }

    #[test]
    fn test_malformed_date_is_parse_error() {
        for bad in ["", "not a date", "2022-13-01", "22-10-2022"] {
            let err = next_business_day(bad).unwrap_err();
            assert!(matches!(err, TaskError::Parse { .. }), "{}", bad);
        }
    }
}
