use crate::consts::{
    CENTURY_CYCLE, CHINA_STANDARD_OFFSET_MINUTES, DAYS_IN_MONTH, FEBRUARY, FEBRUARY_DAYS_LEAP,
    GREGORIAN_CYCLE, LEAP_YEAR_CYCLE, MAX_HOUR, MAX_MONTH, MAX_YEAR, MIN_DAY,
};
use crate::ParseError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// Days from 0000-03-01 to 1970-01-01 in the proleptic Gregorian calendar.
const UNIX_EPOCH_DAYS: i64 = 719_468;
const DAYS_PER_ERA: i64 = 146_097;
const MILLIS_PER_DAY: i64 = 86_400_000;
const MILLIS_PER_MINUTE: i64 = 60_000;

/// A validated Gregorian calendar date.
///
/// Year is limited to `1..=MAX_YEAR`; month and day are checked against the
/// month length, including February in leap years.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SolarDate {
    year: u16,
    month: u8,
    day: u8,
}

impl SolarDate {
    /// Creates a new date after validating every component.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidYear`, `InvalidMonth` or `InvalidDay`.
    pub fn new(year: u16, month: u8, day: u8) -> Result<Self, ParseError> {
        if year == 0 || year > MAX_YEAR {
            return Err(ParseError::InvalidYear(year));
        }
        if month == 0 || month > MAX_MONTH {
            return Err(ParseError::InvalidMonth(month));
        }
        if day < MIN_DAY || day > days_in_month(year, month) {
            return Err(ParseError::InvalidDay { month, day, year });
        }
        Ok(Self { year, month, day })
    }

    #[inline]
    pub const fn year(&self) -> u16 {
        self.year
    }

    #[inline]
    pub const fn month(&self) -> u8 {
        self.month
    }

    #[inline]
    pub const fn day(&self) -> u8 {
        self.day
    }

    /// Days since 1970-01-01 (negative before it).
    pub const fn day_number(&self) -> i64 {
        let y = if self.month <= FEBRUARY {
            self.year as i64 - 1
        } else {
            self.year as i64
        };
        let era = if y >= 0 { y } else { y - 399 } / 400;
        let yoe = y - era * 400;
        let m = self.month as i64;
        let doy = (153 * (if m > 2 { m - 3 } else { m + 9 }) + 2) / 5 + self.day as i64 - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        era * DAYS_PER_ERA + doe - UNIX_EPOCH_DAYS
    }

    /// Inverse of [`SolarDate::day_number`].
    ///
    /// # Errors
    /// Returns `ParseError::DayOutOfRange` if the resulting year is outside `1..=MAX_YEAR`.
    pub fn from_day_number(days: i64) -> Result<Self, ParseError> {
        let z = days
            .checked_add(UNIX_EPOCH_DAYS)
            .ok_or(ParseError::DayOutOfRange(days))?;
        let era = if z >= 0 { z } else { z - (DAYS_PER_ERA - 1) } / DAYS_PER_ERA;
        let doe = z - era * DAYS_PER_ERA;
        let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = doy - (153 * mp + 2) / 5 + 1;
        let month = if mp < 10 { mp + 3 } else { mp - 9 };
        let year = yoe + era * 400 + i64::from(month <= 2);

        match u16::try_from(year) {
            // month and day come out of the algorithm already in range
            Ok(year) if (1..=MAX_YEAR).contains(&year) => Self::new(year, month as u8, day as u8),
            _ => Err(ParseError::DayOutOfRange(days)),
        }
    }

    /// Whole calendar days from `self` to `other` (negative if `other` is earlier).
    pub const fn days_until(&self, other: &Self) -> i64 {
        other.day_number() - self.day_number()
    }

    /// The following day, or `None` past 9999-12-31.
    pub fn succ(&self) -> Option<Self> {
        Self::from_day_number(self.day_number() + 1).ok()
    }

    /// The preceding day, or `None` before 0001-01-01.
    pub fn pred(&self) -> Option<Self> {
        Self::from_day_number(self.day_number() - 1).ok()
    }

    /// Day of week, 0 = Sunday through 6 = Saturday.
    pub const fn weekday(&self) -> u8 {
        // 1970-01-01 was a Thursday
        (self.day_number() + 4).rem_euclid(7) as u8
    }
}

impl PartialOrd for SolarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SolarDate {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.year, self.month, self.day).cmp(&(other.year, other.month, other.day))
    }
}

impl fmt::Display for SolarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}

impl TryFrom<(u16, u8, u8)> for SolarDate {
    type Error = ParseError;

    fn try_from(value: (u16, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<SolarDate> for (u16, u8, u8) {
    fn from(date: SolarDate) -> Self {
        (date.year, date.month, date.day)
    }
}

impl Serialize for SolarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SolarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let parsed: SolarDateTime = s.parse().map_err(serde::de::Error::custom)?;
        Ok(parsed.date())
    }
}

/// A validated wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub struct TimeOfDay {
    hour: u8,
    minute: u8,
    second: u8,
    millisecond: u16,
}

impl TimeOfDay {
    pub const MIDNIGHT: Self = Self {
        hour: 0,
        minute: 0,
        second: 0,
        millisecond: 0,
    };

    /// # Errors
    /// Returns `ParseError::InvalidTime` if any component is out of range.
    pub fn new(hour: u8, minute: u8, second: u8, millisecond: u16) -> Result<Self, ParseError> {
        if hour > MAX_HOUR || minute > 59 || second > 59 || millisecond > 999 {
            return Err(ParseError::InvalidTime {
                hour,
                minute,
                second,
                millisecond,
            });
        }
        Ok(Self {
            hour,
            minute,
            second,
            millisecond,
        })
    }

    #[inline]
    pub const fn hour(&self) -> u8 {
        self.hour
    }

    #[inline]
    pub const fn minute(&self) -> u8 {
        self.minute
    }

    #[inline]
    pub const fn second(&self) -> u8 {
        self.second
    }

    #[inline]
    pub const fn millisecond(&self) -> u16 {
        self.millisecond
    }

    const fn from_millis_of_day(ms: i64) -> Self {
        Self {
            hour: (ms / 3_600_000) as u8,
            minute: (ms / 60_000 % 60) as u8,
            second: (ms / 1000 % 60) as u8,
            millisecond: (ms % 1000) as u16,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:02}:{:02}:{:02}.{:03}",
            self.hour, self.minute, self.second, self.millisecond
        )
    }
}

/// How an instant is turned into a civil date and time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeBasis {
    Utc,
    /// Fixed offset east of UTC, in minutes. No timezone rules are applied.
    FixedOffset(i32),
}

impl TimeBasis {
    pub const fn offset_minutes(self) -> i32 {
        match self {
            Self::Utc => 0,
            Self::FixedOffset(minutes) => minutes,
        }
    }
}

impl Default for TimeBasis {
    fn default() -> Self {
        Self::FixedOffset(CHINA_STANDARD_OFFSET_MINUTES)
    }
}

/// A solar date with a time of day, as accepted by the converter.
///
/// `utc` records whether the value was marked as UTC on input (trailing `Z`)
/// or built from an instant on the UTC basis. It never changes the civil
/// fields themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SolarDateTime {
    date: SolarDate,
    time: TimeOfDay,
    utc: bool,
}

impl SolarDateTime {
    pub const fn new(date: SolarDate, time: TimeOfDay, utc: bool) -> Self {
        Self { date, time, utc }
    }

    /// Midnight at the start of `date`.
    pub const fn at_midnight(date: SolarDate) -> Self {
        Self::new(date, TimeOfDay::MIDNIGHT, false)
    }

    /// Civil date and time of a Unix timestamp (milliseconds) on the given basis.
    ///
    /// # Errors
    /// Returns `ParseError::InstantOutOfRange` if the instant is outside `0001..=9999`.
    pub fn from_unix_millis(millis: i64, basis: TimeBasis) -> Result<Self, ParseError> {
        let local = millis
            .checked_add(i64::from(basis.offset_minutes()) * MILLIS_PER_MINUTE)
            .ok_or(ParseError::InstantOutOfRange(millis))?;
        let days = local.div_euclid(MILLIS_PER_DAY);
        let ms_of_day = local.rem_euclid(MILLIS_PER_DAY);
        Ok(Self {
            date: SolarDate::from_day_number(days)
                .map_err(|_| ParseError::InstantOutOfRange(millis))?,
            time: TimeOfDay::from_millis_of_day(ms_of_day),
            utc: matches!(basis, TimeBasis::Utc),
        })
    }

    /// The current instant on the given basis.
    ///
    /// # Errors
    /// Returns `ParseError::InvalidFormat` if the system clock is before 1970.
    pub fn now(basis: TimeBasis) -> Result<Self, ParseError> {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        let millis = i64::try_from(elapsed.as_millis())
            .map_err(|e| ParseError::InvalidFormat(e.to_string()))?;
        Self::from_unix_millis(millis, basis)
    }

    /// Unix timestamp in milliseconds of these civil fields read on `basis`.
    pub const fn unix_millis(&self, basis: TimeBasis) -> i64 {
        let time = &self.time;
        let ms_of_day = time.hour as i64 * 3_600_000
            + time.minute as i64 * MILLIS_PER_MINUTE
            + time.second as i64 * 1000
            + time.millisecond as i64;
        self.date.day_number() * MILLIS_PER_DAY + ms_of_day
            - basis.offset_minutes() as i64 * MILLIS_PER_MINUTE
    }

    /// The same instant expressed as civil time on `basis`.
    ///
    /// # Errors
    /// Returns `ParseError::InstantOutOfRange` if the shifted date leaves years `1..=9999`.
    pub fn to_basis(&self, from: TimeBasis, to: TimeBasis) -> Result<Self, ParseError> {
        Self::from_unix_millis(self.unix_millis(from), to)
    }

    #[inline]
    pub const fn date(&self) -> SolarDate {
        self.date
    }

    #[inline]
    pub const fn time(&self) -> TimeOfDay {
        self.time
    }

    #[inline]
    pub const fn is_utc(&self) -> bool {
        self.utc
    }
}

impl From<SolarDate> for SolarDateTime {
    fn from(date: SolarDate) -> Self {
        Self::at_midnight(date)
    }
}

impl fmt::Display for SolarDateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}T{}", self.date, self.time)?;
        if self.utc {
            write!(f, "Z")?;
        }
        Ok(())
    }
}

impl Serialize for SolarDateTime {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for SolarDateTime {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

// Helper functions

pub const fn is_leap_year(year: u16) -> bool {
    (year % LEAP_YEAR_CYCLE == 0 && year % CENTURY_CYCLE != 0) || (year % GREGORIAN_CYCLE == 0)
}

pub const fn days_in_month(year: u16, month: u8) -> u8 {
    debug_assert!(month != 0 && month <= MAX_MONTH);

    if month == FEBRUARY && is_leap_year(year) {
        FEBRUARY_DAYS_LEAP
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}
