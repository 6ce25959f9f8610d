//! Gregorian to Chinese lunisolar calendar conversion.
//!
//! The engine walks a precomputed table of lunar month lengths (lunar years
//! 1900 to 2100) from a fixed epoch, 1900-01-31 being lunar 1900, month 1,
//! day 1. Stem-branch labels, the zodiac animal, two-hour periods and solar
//! terms are layered on top with plain modular arithmetic.
//!
//! ```
//! use lunar_date::{convert, SolarDate};
//!
//! let date = convert(SolarDate::new(2023, 1, 22).unwrap()).unwrap();
//! assert_eq!((date.year(), date.month(), date.day()), (2023, 1, 1));
//! assert!(!date.is_leap());
//! assert_eq!(date.year_cycle().to_string(), "癸卯");
//! assert_eq!(date.zodiac().to_string(), "兔");
//! assert_eq!(date.to_string(), "2023正月初一");
//! ```

mod config;
mod consts;
pub mod cyclic;
mod error;
pub mod fmt;
mod formatter;
mod parse;
mod prelude;
pub mod resolver;
pub mod solar_term;
pub mod table;
mod types;

pub use config::ConvertOptions;
pub use consts::*;
pub use cyclic::{CyclicIndex, Zodiac};
pub use error::{LunarError, ParseError};
pub use formatter::{FormatFn, FormatterRegistry};
pub use solar_term::SolarTerm;
pub use table::{MonthSpan, YearRecord};
pub use types::{SolarDate, SolarDateTime, TimeBasis, TimeOfDay};

use serde::ser::SerializeStruct;
use tracing::debug;

use crate::prelude::*;

/// A solar date expressed in the Chinese lunisolar calendar.
///
/// Built fresh by [`convert`]; every field is computed eagerly except the
/// solar term and two-hour period, which take an extra argument or lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LunarDate {
    solar: SolarDateTime,
    year: u16,
    month: u8,
    day: u8,
    leap: bool,
    year_cycle: CyclicIndex,
    month_cycle: CyclicIndex,
    day_cycle: CyclicIndex,
    zodiac: Zodiac,
    hour_suffix: String,
}

/// Value of a named field, as returned by [`LunarDate::get`].
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum FieldValue {
    #[display(fmt = "{_0}")]
    Number(u16),
    #[display(fmt = "{_0}")]
    Text(String),
    #[display(fmt = "{_0}")]
    Flag(bool),
}

/// Converts a solar date (midnight if no time is given) into its lunar date.
///
/// The civil fields of `solar` are used as they are. Two-hour periods are
/// named with the default `时` suffix.
///
/// # Errors
/// Returns `LunarError::DateOutOfRange` outside 1900-01-31..=2101-01-28.
pub fn convert(solar: impl Into<SolarDateTime>) -> Result<LunarDate, LunarError> {
    convert_civil(solar.into(), DEFAULT_HOUR_SUFFIX)
}

fn convert_civil(solar: SolarDateTime, hour_suffix: &str) -> Result<LunarDate, LunarError> {
    let date = solar.date();
    let resolved = resolver::resolve(date)?;
    let lunar_year = i32::from(resolved.year);

    let lunar = LunarDate {
        solar,
        year: resolved.year,
        month: resolved.month,
        day: resolved.day,
        leap: resolved.leap,
        year_cycle: cyclic::year_cycle(lunar_year),
        month_cycle: cyclic::month_cycle(solar_term::solar_months_since_1900(date)?),
        day_cycle: cyclic::day_cycle(resolved.day_offset),
        zodiac: cyclic::zodiac(lunar_year),
        hour_suffix: hour_suffix.to_owned(),
    };
    debug!(%solar, lunar = %lunar, leap = lunar.leap, "converted solar date");
    Ok(lunar)
}

/// Parses `input` and converts it on the basis chosen by `options`.
///
/// A string without a trailing `Z` is civil time on that basis and is used
/// as written. A string ending in `Z` is a UTC instant: it is shifted onto
/// the basis first, so on the default UTC+08:00 basis `2023-01-21T20:00:00Z`
/// converts as 2023-01-22 04:00.
///
/// # Errors
/// Returns `LunarError::InvalidInput` for unparseable input, otherwise as [`convert`].
pub fn convert_str(input: &str, options: &ConvertOptions) -> Result<LunarDate, LunarError> {
    let parsed: SolarDateTime = input.parse()?;
    let basis = options.basis();
    let solar = if parsed.is_utc() {
        parsed.to_basis(TimeBasis::Utc, basis)?
    } else {
        SolarDateTime::new(parsed.date(), parsed.time(), options.utc)
    };
    convert_civil(solar, &options.hour_suffix)
}

/// Converts a Unix timestamp in milliseconds on the basis chosen by `options`.
///
/// # Errors
/// As [`convert`], or `LunarError::InvalidInput` for instants outside year 1..=9999.
pub fn convert_unix_millis(millis: i64, options: &ConvertOptions) -> Result<LunarDate, LunarError> {
    let solar = SolarDateTime::from_unix_millis(millis, options.basis())?;
    convert_civil(solar, &options.hour_suffix)
}

/// Converts the current instant on the basis chosen by `options`.
///
/// # Errors
/// As [`convert_unix_millis`].
pub fn convert_now(options: &ConvertOptions) -> Result<LunarDate, LunarError> {
    let solar = SolarDateTime::now(options.basis())?;
    convert_civil(solar, &options.hour_suffix)
}

impl LunarDate {
    /// Civil solar date and time the conversion used, after any basis shift.
    pub const fn solar(&self) -> SolarDateTime {
        self.solar
    }

    /// Lunar year.
    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Lunar month ordinal, `1..=12`, the same for a month and its leap repeat.
    pub const fn month(&self) -> u8 {
        self.month
    }

    /// Lunar day, `1..=30`.
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// `true` inside the repeated leap month.
    pub const fn is_leap(&self) -> bool {
        self.leap
    }

    pub const fn year_cycle(&self) -> CyclicIndex {
        self.year_cycle
    }

    pub const fn month_cycle(&self) -> CyclicIndex {
        self.month_cycle
    }

    pub const fn day_cycle(&self) -> CyclicIndex {
        self.day_cycle
    }

    pub const fn zodiac(&self) -> Zodiac {
        self.zodiac
    }

    /// Lunar year in Chinese digits, e.g. `二〇二三`.
    pub fn chinese_year(&self) -> String {
        fmt::chinese_year(self.year)
    }

    /// e.g. `正月`, `闰二月`, `腊月`.
    pub fn month_name(&self) -> String {
        fmt::month_name(self.month, self.leap)
    }

    /// e.g. `初一`, `廿九`.
    pub fn day_name(&self) -> String {
        fmt::day_name(self.day)
    }

    /// Day of week of the solar date, e.g. `星期日`.
    pub fn weekday_name(&self) -> String {
        fmt::weekday_name(self.solar.date().weekday())
    }

    /// Lunar year, month name and day name, e.g. `2023正月初一`.
    pub fn format(&self) -> String {
        format!("{}{}{}", self.year, self.month_name(), self.day_name())
    }

    /// Branch of the two-hour period of the solar input's time of day.
    pub const fn time_branch(&self) -> u8 {
        cyclic::hour_branch(self.solar.time().hour())
    }

    /// Branch of the two-hour period containing `hour`.
    ///
    /// # Errors
    /// Returns `LunarError::InvalidHour` for hours above 23.
    pub fn time_branch_at(&self, hour: u8) -> Result<u8, LunarError> {
        cyclic::time_branch(hour)
    }

    /// Suffix used for two-hour period names, from [`ConvertOptions::hour_suffix`].
    pub fn hour_suffix(&self) -> &str {
        &self.hour_suffix
    }

    /// Name of the two-hour period of the solar input, e.g. `子时`.
    ///
    /// `None` uses the suffix the date was converted with.
    pub fn time_name(&self, suffix: Option<&str>) -> String {
        fmt::time_name(self.time_branch(), Some(suffix.unwrap_or(&self.hour_suffix)))
    }

    /// Zodiac animal of the two-hour period containing `hour`.
    ///
    /// # Errors
    /// Returns `LunarError::InvalidHour` for hours above 23.
    pub fn hour_zodiac(&self, hour: u8) -> Result<Zodiac, LunarError> {
        cyclic::time_branch(hour).map(Zodiac::from_branch)
    }

    /// The solar term falling on this date, if any.
    ///
    /// # Errors
    /// Returns `LunarError::OutOfRange` when the solar year has no term data.
    pub fn solar_term(&self) -> Result<Option<SolarTerm>, LunarError> {
        solar_term::term_on(self.solar.date())
    }

    /// Date of term `index` in this date's solar year.
    ///
    /// # Errors
    /// Returns `LunarError::InvalidTermIndex` for indices above 23.
    pub fn term_date(&self, index: u8) -> Result<SolarDate, LunarError> {
        solar_term::term_date(i32::from(self.solar.date().year()), index)
    }

    /// Most recent term on or before this date and the days elapsed since it.
    ///
    /// # Errors
    /// Returns `LunarError::OutOfRange` before the first tabulated term.
    pub fn current_term(&self) -> Result<(SolarTerm, i64), LunarError> {
        solar_term::term_before(self.solar.date())
    }

    /// Field by its short unit key.
    ///
    /// | key   | field                       |
    /// |-------|-----------------------------|
    /// | `ly`  | lunar year                  |
    /// | `lm`  | lunar month                 |
    /// | `ld`  | lunar day                   |
    /// | `cy`  | year in Chinese digits      |
    /// | `cm`  | month name                  |
    /// | `cd`  | day name                    |
    /// | `cw`  | weekday name                |
    /// | `gzy` | year stem-branch            |
    /// | `gzm` | month stem-branch           |
    /// | `gzd` | day stem-branch             |
    /// | `zod` | zodiac animal               |
    /// | `isl` | leap month flag             |
    ///
    /// Keys are case-insensitive. Unknown keys yield `None`.
    pub fn get(&self, unit: &str) -> Option<FieldValue> {
        let value = match unit.to_ascii_lowercase().as_str() {
            "ly" => FieldValue::Number(self.year),
            "lm" => FieldValue::Number(u16::from(self.month)),
            "ld" => FieldValue::Number(u16::from(self.day)),
            "cy" => FieldValue::Text(self.chinese_year()),
            "cm" => FieldValue::Text(self.month_name()),
            "cd" => FieldValue::Text(self.day_name()),
            "cw" => FieldValue::Text(self.weekday_name()),
            "gzy" => FieldValue::Text(self.year_cycle.to_string()),
            "gzm" => FieldValue::Text(self.month_cycle.to_string()),
            "gzd" => FieldValue::Text(self.day_cycle.to_string()),
            "zod" => FieldValue::Text(self.zodiac.to_string()),
            "isl" => FieldValue::Flag(self.leap),
            _ => return None,
        };
        Some(value)
    }
}

impl std::fmt::Display for LunarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format())
    }
}

impl serde::Serialize for LunarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("LunarDate", 9)?;
        state.serialize_field("solar", &self.solar)?;
        state.serialize_field("year", &self.year)?;
        state.serialize_field("month", &self.month)?;
        state.serialize_field("day", &self.day)?;
        state.serialize_field("leap", &self.leap)?;
        state.serialize_field("year_cycle", &self.year_cycle.to_string())?;
        state.serialize_field("month_cycle", &self.month_cycle.to_string())?;
        state.serialize_field("day_cycle", &self.day_cycle.to_string())?;
        state.serialize_field("zodiac", &self.zodiac.to_string())?;
        state.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: u16, m: u8, d: u8) -> SolarDate {
        SolarDate::new(y, m, d).unwrap()
    }

    fn lunar(y: u16, m: u8, d: u8) -> LunarDate {
        convert(date(y, m, d)).unwrap()
    }

    #[test]
    fn test_convert_new_year_2023() {
        let l = lunar(2023, 1, 22);
        assert_eq!((l.year(), l.month(), l.day(), l.is_leap()), (2023, 1, 1, false));
        assert_eq!(l.year_cycle().to_string(), "癸卯");
        assert_eq!(l.month_cycle().to_string(), "癸丑");
        assert_eq!(l.day_cycle().to_string(), "庚辰");
        assert_eq!(l.zodiac(), Zodiac::Rabbit);
        assert_eq!(l.format(), "2023正月初一");
        assert_eq!(l.chinese_year(), "二〇二三");
        assert_eq!(l.weekday_name(), "星期日");
    }

    #[test]
    fn test_convert_epoch() {
        let l = lunar(1900, 1, 31);
        assert_eq!((l.year(), l.month(), l.day(), l.is_leap()), (1900, 1, 1, false));
        assert_eq!(l.year_cycle().to_string(), "庚子");
        assert_eq!(l.day_cycle().to_string(), "甲辰");
        assert_eq!(l.month_cycle().to_string(), "丁丑");
    }

    #[test]
    fn test_convert_leap_month() {
        let l = lunar(2023, 3, 22);
        assert_eq!((l.month(), l.day(), l.is_leap()), (2, 1, true));
        assert_eq!(l.month_name(), "闰二月");
        assert_eq!(l.to_string(), "2023闰二月初一");
    }

    #[test]
    fn test_month_cycle_switches_on_node_term() {
        // 立春 2023 falls on 02-04
        assert_eq!(lunar(2023, 2, 3).month_cycle().to_string(), "癸丑");
        assert_eq!(lunar(2023, 2, 4).month_cycle().to_string(), "甲寅");
    }

    #[test]
    fn test_year_cycle_follows_lunar_year() {
        // Still lunar 2022 (壬寅) the day before New Year
        let l = lunar(2023, 1, 21);
        assert_eq!(l.year(), 2022);
        assert_eq!(l.year_cycle().to_string(), "壬寅");
        assert_eq!(l.zodiac(), Zodiac::Tiger);
    }

    #[test]
    fn test_out_of_range() {
        assert!(matches!(
            convert(date(1900, 1, 30)),
            Err(LunarError::DateOutOfRange { .. })
        ));
        assert!(matches!(
            convert(date(2101, 1, 29)),
            Err(LunarError::DateOutOfRange { .. })
        ));
        assert!(convert(date(2101, 1, 28)).is_ok());
    }

    #[test]
    fn test_time_helpers() {
        let l = convert_str("2023-01-22T23:30", &ConvertOptions::default()).unwrap();
        assert_eq!(l.time_branch(), 0);
        assert_eq!(l.time_name(None), "子时");
        assert_eq!(l.time_name(Some("時")), "子時");
        assert_eq!(l.time_branch_at(0), Ok(0));
        assert_eq!(l.time_branch_at(24), Err(LunarError::InvalidHour(24)));
        assert_eq!(l.hour_zodiac(11), Ok(Zodiac::Horse));
        assert_eq!(l.hour_zodiac(12), Ok(Zodiac::Horse));
        assert_eq!(l.hour_zodiac(13), Ok(Zodiac::Goat));
        assert_eq!(l.hour_zodiac(5), Ok(Zodiac::Rabbit));

        let afternoon = convert_str("2023-01-22T13:05", &ConvertOptions::default()).unwrap();
        assert_eq!(afternoon.time_branch(), 7);
        assert_eq!(afternoon.time_name(None), "未时");
    }

    #[test]
    fn test_hour_suffix_from_options() {
        let opts = ConvertOptions {
            hour_suffix: "時".to_owned(),
            ..ConvertOptions::default()
        };
        let l = convert_str("2023-01-22T12:45", &opts).unwrap();
        assert_eq!(l.hour_suffix(), "時");
        assert_eq!(l.time_name(None), "午時");
        assert_eq!(l.time_name(Some("时")), "午时");

        let l = convert_unix_millis(1_674_331_200_000, &opts).unwrap();
        assert_eq!(l.time_name(None), "寅時");

        assert_eq!(lunar(2023, 1, 22).hour_suffix(), "时");
    }

    #[test]
    fn test_solar_term_lookups() {
        let l = lunar(2023, 2, 4);
        assert_eq!(l.solar_term().unwrap().map(SolarTerm::name), Some("立春"));
        assert_eq!(lunar(2023, 2, 5).solar_term().unwrap(), None);
        assert_eq!(l.term_date(23).unwrap(), date(2023, 12, 22));
        assert_eq!(l.term_date(24), Err(LunarError::InvalidTermIndex(24)));

        let (term, days) = lunar(2023, 2, 10).current_term().unwrap();
        assert_eq!((term.name(), days), ("立春", 6));
    }

    #[test]
    fn test_get_by_unit() {
        let l = lunar(2023, 3, 22);
        assert_eq!(l.get("ly"), Some(FieldValue::Number(2023)));
        assert_eq!(l.get("lm"), Some(FieldValue::Number(2)));
        assert_eq!(l.get("LD"), Some(FieldValue::Number(1)));
        assert_eq!(l.get("cm"), Some(FieldValue::Text("闰二月".to_owned())));
        assert_eq!(l.get("cd"), Some(FieldValue::Text("初一".to_owned())));
        assert_eq!(l.get("gzy"), Some(FieldValue::Text("癸卯".to_owned())));
        assert_eq!(l.get("zod"), Some(FieldValue::Text("兔".to_owned())));
        assert_eq!(l.get("isl"), Some(FieldValue::Flag(true)));
        assert_eq!(l.get("isl").unwrap().to_string(), "true");
        assert_eq!(l.get("nope"), None);
    }

    #[test]
    fn test_convert_str() {
        let opts = ConvertOptions::default();
        let l = convert_str("2023/01/22", &opts).unwrap();
        assert_eq!(l.format(), "2023正月初一");
        assert!(!l.solar().is_utc());

        let l = convert_str("2023-01-22", &opts.clone().with_utc(true)).unwrap();
        assert!(l.solar().is_utc());

        assert!(matches!(
            convert_str("garbage", &opts),
            Err(LunarError::InvalidInput(ParseError::InvalidFormat(_)))
        ));
        assert!(matches!(
            convert_str("", &opts),
            Err(LunarError::InvalidInput(ParseError::EmptyInput))
        ));
    }

    #[test]
    fn test_utc_marked_string_is_an_instant() {
        // 2023-01-21T20:00:00Z is 2023-01-22T04:00 at UTC+08:00
        let millis = 1_674_331_200_000;
        let opts = ConvertOptions::default();

        let marked = convert_str("2023-01-21T20:00:00Z", &opts).unwrap();
        let instant = convert_unix_millis(millis, &opts).unwrap();
        assert_eq!(marked, instant);
        assert_eq!(marked.format(), "2023正月初一");
        assert_eq!(marked.solar().date(), SolarDate::new(2023, 1, 22).unwrap());
        assert_eq!(marked.time_branch(), 2);
        assert!(!marked.solar().is_utc());

        // Without the marker the same fields are local civil time
        let civil = convert_str("2023-01-21T20:00:00", &opts).unwrap();
        assert_eq!(civil.format(), "2022腊月三十");
        assert_eq!(civil.time_branch(), 10);
    }

    #[test]
    fn test_utc_option_selects_the_basis() {
        let millis = 1_674_331_200_000;
        let opts = ConvertOptions::default().with_utc(true);

        let marked = convert_str("2023-01-21T20:00:00Z", &opts).unwrap();
        let civil = convert_str("2023-01-21T20:00:00", &opts).unwrap();
        let instant = convert_unix_millis(millis, &opts).unwrap();
        assert_eq!(marked, instant);
        assert_eq!(civil, instant);
        assert_eq!(instant.format(), "2022腊月三十");
        assert!(instant.solar().is_utc());

        // A non-default offset moves the same instant onto its own civil date
        let tokyo = ConvertOptions {
            local_offset_minutes: 540,
            ..ConvertOptions::default()
        };
        let l = convert_str("2023-01-21T14:59:00Z", &tokyo).unwrap();
        assert_eq!(l.solar().date(), SolarDate::new(2023, 1, 21).unwrap());
        let l = convert_str("2023-01-21T15:00:00Z", &tokyo).unwrap();
        assert_eq!(l.format(), "2023正月初一");
    }

    #[test]
    fn test_convert_unix_millis_respects_basis() {
        // 2023-01-21T16:30:00Z is already 2023-01-22 in UTC+8
        let millis = 1_674_318_600_000;
        let local = convert_unix_millis(millis, &ConvertOptions::default()).unwrap();
        assert_eq!((local.month(), local.day()), (1, 1));

        let utc = convert_unix_millis(millis, &ConvertOptions::default().with_utc(true)).unwrap();
        assert_eq!((utc.year(), utc.month(), utc.day()), (2022, 12, 30));
    }

    #[test]
    fn test_convert_unix_millis_extremes_are_errors() {
        for opts in [ConvertOptions::default(), ConvertOptions::default().with_utc(true)] {
            for millis in [i64::MAX, i64::MIN] {
                assert_eq!(
                    convert_unix_millis(millis, &opts),
                    Err(LunarError::InvalidInput(ParseError::InstantOutOfRange(millis)))
                );
            }
        }
    }

    #[test]
    fn test_convert_now() {
        let l = convert_now(&ConvertOptions::default()).unwrap();
        assert!(l.year() >= 2023);
    }

    #[test]
    fn test_reconversion_is_independent() {
        let a = lunar(2024, 2, 10);
        let b = convert(a.solar()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_serialize() {
        let l = lunar(2023, 1, 22);
        let json = serde_json::to_value(&l).unwrap();
        assert_eq!(json["solar"], "2023-01-22T00:00:00.000");
        assert_eq!(json["year"], 2023);
        assert_eq!(json["month"], 1);
        assert_eq!(json["day"], 1);
        assert_eq!(json["leap"], false);
        assert_eq!(json["year_cycle"], "癸卯");
        assert_eq!(json["zodiac"], "兔");
    }
}
