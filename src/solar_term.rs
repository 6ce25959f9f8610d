//! Solar term (节气) dates.
//!
//! A term's instant is a fixed base instant (1900-01-06 02:05 UTC, the 小寒
//! of 1900), plus a whole number of mean tropical years, plus the term's
//! minute offset within the year. The result is truncated to its UTC date.
//! Arithmetic is carried out in integer tenths of a millisecond so that no
//! rounding accumulates across the two centuries of the table.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_TERM_YEAR, MIN_LUNAR_YEAR, SOLAR_TERMS, SOLAR_TERM_COUNT};
use crate::types::SolarDate;
use crate::LunarError;

/// Minutes from a year's 小寒 base instant to each term, 小寒 first.
#[rustfmt::skip]
const TERM_MINUTES: [i64; SOLAR_TERM_COUNT as usize] = [
    0, 21208, 42467, 63836, 85337, 107014, 128867, 150921, 173149, 195551, 218072, 240693,
    263343, 285989, 308563, 331033, 353350, 375494, 397447, 419210, 440795, 462224, 483532, 504758,
];

/// Mean tropical year of 31 556 925 974.7 ms, in tenths of a millisecond.
const TROPICAL_YEAR_TICKS: i64 = 315_569_259_747;
const TICKS_PER_MINUTE: i64 = 600_000;
const TICKS_PER_DAY: i64 = 1440 * TICKS_PER_MINUTE;
/// Base instant date, 1900-01-06.
const BASE_DATE: (u16, u8, u8) = (1900, 1, 6);
/// Base instant time of day, 02:05 UTC.
const BASE_TIME_MINUTES: i64 = 2 * 60 + 5;

/// One of the 24 solar terms, identified by its index (0 = 小寒, 23 = 冬至).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub struct SolarTerm(u8);

impl SolarTerm {
    /// # Errors
    /// Returns `LunarError::InvalidTermIndex` for indices above 23.
    pub fn new(index: u8) -> Result<Self, LunarError> {
        if index < SOLAR_TERM_COUNT {
            Ok(Self(index))
        } else {
            Err(LunarError::InvalidTermIndex(index))
        }
    }

    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    pub const fn name(self) -> &'static str {
        SOLAR_TERMS[self.0 as usize]
    }

    /// Node terms (小寒, 立春, 惊蛰, ...) open a solar month; they sit at even indices.
    pub const fn is_node(self) -> bool {
        self.0 % 2 == 0
    }

    /// Terms in calendar order within a Gregorian year.
    pub fn all() -> impl DoubleEndedIterator<Item = Self> {
        (0..SOLAR_TERM_COUNT).map(Self)
    }
}

impl From<SolarTerm> for u8 {
    fn from(term: SolarTerm) -> Self {
        term.0
    }
}

impl TryFrom<u8> for SolarTerm {
    type Error = LunarError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl fmt::Display for SolarTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn check_year(year: i32) -> Result<(), LunarError> {
    if (i32::from(MIN_LUNAR_YEAR)..=i32::from(MAX_TERM_YEAR)).contains(&year) {
        Ok(())
    } else {
        Err(LunarError::OutOfRange { year })
    }
}

/// Solar date on which `term_index` falls in Gregorian `year`.
///
/// # Errors
/// Returns `LunarError::InvalidTermIndex` for indices above 23 and
/// `LunarError::OutOfRange` for years without term data.
pub fn term_date(year: i32, term_index: u8) -> Result<SolarDate, LunarError> {
    let term = SolarTerm::new(term_index)?;
    check_year(year)?;

    let ticks = TROPICAL_YEAR_TICKS * i64::from(year - i32::from(MIN_LUNAR_YEAR))
        + (TERM_MINUTES[term.index() as usize] + BASE_TIME_MINUTES) * TICKS_PER_MINUTE;
    let (y, m, d) = BASE_DATE;
    let base = SolarDate::new(y, m, d)?;
    Ok(SolarDate::from_day_number(
        base.day_number() + ticks.div_euclid(TICKS_PER_DAY),
    )?)
}

/// The term falling on `date`, if any.
///
/// # Errors
/// Returns `LunarError::OutOfRange` for years without term data.
pub fn term_on(date: SolarDate) -> Result<Option<SolarTerm>, LunarError> {
    // Each Gregorian month holds exactly two terms: indices 2m-2 and 2m-1
    let first = (date.month() - 1) * 2;
    for index in [first, first + 1] {
        if term_date(i32::from(date.year()), index)? == date {
            return Ok(Some(SolarTerm(index)));
        }
    }
    Ok(None)
}

/// Most recent term on or before `date`, with the number of days since it began.
///
/// # Errors
/// Returns `LunarError::OutOfRange` when the preceding term lies outside the data.
pub fn term_before(date: SolarDate) -> Result<(SolarTerm, i64), LunarError> {
    let year = i32::from(date.year());
    for term in SolarTerm::all().rev() {
        let start = term_date(year, term.index())?;
        if start <= date {
            return Ok((term, start.days_until(&date)));
        }
    }
    // Before this year's 小寒: the previous year's 冬至 is the latest term
    let winter = SolarTerm(SOLAR_TERM_COUNT - 1);
    let start = term_date(year - 1, winter.index())?;
    Ok((winter, start.days_until(&date)))
}

/// Number of solar months elapsed since January 1900, a month beginning on its node term.
///
/// # Errors
/// Returns `LunarError::OutOfRange` for years without term data.
pub fn solar_months_since_1900(date: SolarDate) -> Result<i64, LunarError> {
    let year = i32::from(date.year());
    let node = term_date(year, (date.month() - 1) * 2)?;
    let elapsed = i64::from(year - i32::from(MIN_LUNAR_YEAR)) * 12 + i64::from(date.month() - 1);
    Ok(elapsed + i64::from(date >= node))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> SolarDate {
        SolarDate::new(y, m, d).unwrap()
    }

    #[test]
    fn test_term_names() {
        assert_eq!(SolarTerm::new(0).unwrap().name(), "小寒");
        assert_eq!(SolarTerm::new(2).unwrap().to_string(), "立春");
        assert_eq!(SolarTerm::new(23).unwrap().name(), "冬至");
        assert!(SolarTerm::new(2).unwrap().is_node());
        assert!(!SolarTerm::new(3).unwrap().is_node());
    }

    #[test]
    fn test_base_year() {
        assert_eq!(term_date(1900, 0).unwrap(), date(1900, 1, 6));
        assert_eq!(term_date(1900, 2).unwrap(), date(1900, 2, 4));
        assert_eq!(term_date(1900, 23).unwrap(), date(1900, 12, 22));
    }

    #[test]
    fn test_known_terms() {
        assert_eq!(term_date(2023, 2).unwrap(), date(2023, 2, 4));
        assert_eq!(term_date(2023, 5).unwrap(), date(2023, 3, 21));
        assert_eq!(term_date(2023, 23).unwrap(), date(2023, 12, 22));
        assert_eq!(term_date(2024, 0).unwrap(), date(2024, 1, 6));
        assert_eq!(term_date(2024, 11).unwrap(), date(2024, 6, 21));
        assert_eq!(term_date(2000, 5).unwrap(), date(2000, 3, 20));
    }

    #[test]
    fn test_terms_are_ordered_within_year() {
        for year in [1900, 1950, 2000, 2050, 2100, 2101] {
            let dates: Vec<_> = SolarTerm::all()
                .map(|t| term_date(year, t.index()).unwrap())
                .collect();
            assert!(dates.windows(2).all(|w| w[0] < w[1]), "year {year}");
            for (term, d) in SolarTerm::all().zip(&dates) {
                assert_eq!(d.month(), term.index() / 2 + 1, "year {year} term {term}");
            }
        }
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(term_date(2023, 24), Err(LunarError::InvalidTermIndex(24)));
        assert_eq!(term_date(1899, 0), Err(LunarError::OutOfRange { year: 1899 }));
        assert_eq!(term_date(2102, 0), Err(LunarError::OutOfRange { year: 2102 }));
        assert_eq!(term_date(2101, 0).unwrap(), date(2101, 1, 5));
        assert!(term_date(2100, 23).is_ok());
    }

    #[test]
    fn test_term_on() {
        assert_eq!(term_on(date(2023, 2, 4)).unwrap(), Some(SolarTerm::new(2).unwrap()));
        assert_eq!(term_on(date(2023, 12, 22)).unwrap(), Some(SolarTerm::new(23).unwrap()));
        assert_eq!(term_on(date(2023, 2, 5)).unwrap(), None);
    }

    #[test]
    fn test_term_before() {
        let (term, days) = term_before(date(2023, 2, 10)).unwrap();
        assert_eq!((term.name(), days), ("立春", 6));

        let (term, days) = term_before(date(2023, 2, 4)).unwrap();
        assert_eq!((term.name(), days), ("立春", 0));

        // Before 小寒 the previous winter solstice applies
        let (term, days) = term_before(date(2023, 1, 2)).unwrap();
        assert_eq!(term.name(), "冬至");
        assert_eq!(days, 11);

        assert!(term_before(date(1900, 1, 2)).is_err());
    }

    #[test]
    fn test_solar_months_since_1900() {
        assert_eq!(solar_months_since_1900(date(1900, 1, 5)).unwrap(), 0);
        assert_eq!(solar_months_since_1900(date(1900, 1, 6)).unwrap(), 1);
        assert_eq!(solar_months_since_1900(date(2023, 1, 22)).unwrap(), 123 * 12 + 1);
        assert_eq!(solar_months_since_1900(date(2023, 2, 3)).unwrap(), 123 * 12 + 1);
        assert_eq!(solar_months_since_1900(date(2023, 2, 4)).unwrap(), 123 * 12 + 2);
    }

    #[test]
    fn test_term_serde() {
        let term = SolarTerm::new(5).unwrap();
        assert_eq!(serde_json::to_string(&term).unwrap(), "5");
        assert!(serde_json::from_str::<SolarTerm>("24").is_err());
    }
}
