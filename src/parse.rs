//! Parsing of solar date strings.
//!
//! Accepted shapes, date part first:
//!
//! - `YYYY`, `YYYY-MM`, `YYYY-MM-DD` (or with `/` instead of `-`)
//! - `YYYYMMDD`
//!
//! optionally followed by `T` or a space and `HH[:MM[:SS[.fff]]]`, and an
//! optional trailing `Z` marking the value as UTC. Missing month and day
//! default to 1, missing time components to 0.

use std::str::FromStr;

use crate::consts::{DATE_SEPARATOR, JANUARY, MIN_DAY, SLASH_SEPARATOR, TIME_SEPARATOR};
use crate::types::{SolarDate, SolarDateTime, TimeOfDay};
use crate::ParseError;

const COMPACT_DATE_LEN: usize = 8;

impl FromStr for SolarDateTime {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyInput);
        }

        let (body, utc) = match trimmed.strip_suffix(['Z', 'z']) {
            Some(rest) => (rest.trim_end(), true),
            None => (trimmed, false),
        };

        let (date_part, time_part) = match body.find(['T', 't', ' ']) {
            Some(pos) => (&body[..pos], Some(body[pos + 1..].trim())),
            None => (body, None),
        };

        let date = parse_date(date_part)?;
        let time = match time_part {
            Some(t) => parse_time(t)?,
            None => TimeOfDay::MIDNIGHT,
        };

        Ok(Self::new(date, time, utc))
    }
}

fn parse_date(s: &str) -> Result<SolarDate, ParseError> {
    // Strictly enforce delimiters: one kind per string
    let has_hyphen = s.contains(DATE_SEPARATOR);
    let has_slash = s.contains(SLASH_SEPARATOR);

    if has_hyphen && has_slash {
        return Err(ParseError::InvalidFormat(format!(
            "Mixed delimiters ({DATE_SEPARATOR} and {SLASH_SEPARATOR})"
        )));
    }

    let separator = if has_slash {
        SLASH_SEPARATOR
    } else {
        DATE_SEPARATOR
    };

    if !has_hyphen && !has_slash && s.len() == COMPACT_DATE_LEN {
        if !s.is_ascii() {
            return Err(ParseError::InvalidFormat(s.to_owned()));
        }
        let (year, rest) = s.split_at(4);
        let (month, day) = rest.split_at(2);
        return build_date(year, Some(month), Some(day));
    }

    let parts: Vec<&str> = s.split(separator).map(str::trim).collect();
    match parts.as_slice() {
        [year] => build_date(year, None, None),
        [year, month] => build_date(year, Some(*month), None),
        [year, month, day] => build_date(year, Some(*month), Some(*day)),
        _ => Err(ParseError::InvalidFormat(format!(
            "Too many {} separators: expected 0-2, found {}",
            separator,
            parts.len() - 1
        ))),
    }
}

fn build_date(year: &str, month: Option<&str>, day: Option<&str>) -> Result<SolarDate, ParseError> {
    let year = parse_u16(year)?;
    let month = month.map(parse_u8).transpose()?.unwrap_or(JANUARY);
    let day = day.map(parse_u8).transpose()?.unwrap_or(MIN_DAY);
    SolarDate::new(year, month, day)
}

fn parse_time(s: &str) -> Result<TimeOfDay, ParseError> {
    if s.is_empty() {
        return Ok(TimeOfDay::MIDNIGHT);
    }

    let (clock, fraction) = match s.split_once('.') {
        Some((clock, fraction)) => (clock, Some(fraction)),
        None => (s, None),
    };

    let parts: Vec<&str> = clock.split(TIME_SEPARATOR).collect();
    if parts.len() > 3 {
        return Err(ParseError::InvalidFormat(format!(
            "Too many {} separators: expected 0-2, found {}",
            TIME_SEPARATOR,
            parts.len() - 1
        )));
    }

    let component = |idx: usize| parts.get(idx).map_or(Ok(0), |p| parse_u8(p));
    let hour = component(0)?;
    let minute = component(1)?;
    let second = component(2)?;
    let millisecond = fraction.map(parse_millis).transpose()?.unwrap_or(0);

    TimeOfDay::new(hour, minute, second, millisecond)
}

/// Fractional seconds are truncated to millisecond precision.
fn parse_millis(s: &str) -> Result<u16, ParseError> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ParseError::InvalidFormat(s.to_owned()));
    }
    let digits: String = s.chars().chain(std::iter::repeat('0')).take(3).collect();
    digits
        .parse::<u16>()
        .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}

/// Helper to parse u16 with better error messages
fn parse_u16(s: &str) -> Result<u16, ParseError> {
    s.parse::<u16>()
        .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}

/// Helper to parse u8 with better error messages
fn parse_u8(s: &str) -> Result<u8, ParseError> {
    s.parse::<u8>()
        .map_err(|_| ParseError::InvalidFormat(s.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> SolarDateTime {
        s.parse::<SolarDateTime>().unwrap()
    }

    #[test]
    fn test_parse_iso_full_date() {
        let dt = parse("2023-01-22");
        assert_eq!(dt.date(), SolarDate::new(2023, 1, 22).unwrap());
        assert_eq!(dt.time(), TimeOfDay::MIDNIGHT);
        assert!(!dt.is_utc());
    }

    #[test]
    fn test_parse_slash_and_compact() {
        let expected = SolarDate::new(2023, 1, 22).unwrap();
        assert_eq!(parse("2023/01/22").date(), expected);
        assert_eq!(parse("2023/1/22").date(), expected);
        assert_eq!(parse("20230122").date(), expected);
    }

    #[test]
    fn test_parse_partial_dates_default_to_first() {
        assert_eq!(parse("2023").date(), SolarDate::new(2023, 1, 1).unwrap());
        assert_eq!(parse("2023-05").date(), SolarDate::new(2023, 5, 1).unwrap());
    }

    #[test]
    fn test_parse_with_time() {
        let dt = parse("2023-01-22T23:15:42.123456");
        assert_eq!(dt.time(), TimeOfDay::new(23, 15, 42, 123).unwrap());

        let dt = parse("2023-01-22 08:05");
        assert_eq!(dt.time(), TimeOfDay::new(8, 5, 0, 0).unwrap());

        let dt = parse("2023-01-22T7");
        assert_eq!(dt.time().hour(), 7);

        let dt = parse("2023-01-22T07:00:00.5");
        assert_eq!(dt.time().millisecond(), 500);
    }

    #[test]
    fn test_parse_utc_marker() {
        let dt = parse("2023-01-22T10:00:00Z");
        assert!(dt.is_utc());
        assert_eq!(dt.time().hour(), 10);
    }

    #[test]
    fn test_utc_marker_does_not_shift_civil_fields() {
        // Both readings of the same string keep the same wall-clock fields
        let local = parse("2023-03-13T17:10:46");
        let utc = parse("2023-03-13T17:10:46Z");
        assert_eq!(local.date(), utc.date());
        assert_eq!(local.time(), utc.time());
        assert_ne!(local.is_utc(), utc.is_utc());
    }

    #[test]
    fn test_parse_with_whitespace() {
        assert_eq!(parse("  2023-01-22  ").date(), SolarDate::new(2023, 1, 22).unwrap());
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!("".parse::<SolarDateTime>(), Err(ParseError::EmptyInput)));
        assert!(matches!("   ".parse::<SolarDateTime>(), Err(ParseError::EmptyInput)));
        assert!(matches!(
            "2023-13-01".parse::<SolarDateTime>(),
            Err(ParseError::InvalidMonth(13))
        ));
        assert!(matches!(
            "2023-02-29".parse::<SolarDateTime>(),
            Err(ParseError::InvalidDay { .. })
        ));
        assert!(matches!(
            "2023-01/22".parse::<SolarDateTime>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2023-01-22-01".parse::<SolarDateTime>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "not a date".parse::<SolarDateTime>(),
            Err(ParseError::InvalidFormat(_))
        ));
        assert!(matches!(
            "2023-01-22T24:00".parse::<SolarDateTime>(),
            Err(ParseError::InvalidTime { hour: 24, .. })
        ));
        assert!(matches!(
            "2023-01-22T10:00:00.abc".parse::<SolarDateTime>(),
            Err(ParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_too_many_separators_message() {
        let err = "2000-01-15-23".parse::<SolarDateTime>().unwrap_err();
        assert!(err.to_string().contains("Too many - separators"));

        let err = "2000-01-15T01:02:03:04".parse::<SolarDateTime>().unwrap_err();
        assert!(err.to_string().contains("Too many : separators"));
    }
}
