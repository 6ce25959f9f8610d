use crate::consts::{MAX_HOUR, MAX_MONTH, MAX_YEAR, SOLAR_TERM_COUNT};
use crate::prelude::*;
use crate::types::SolarDate;

/// Malformed or unparseable solar date input, detected before any conversion runs.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum ParseError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be 1-{})", "_0", MAX_YEAR)]
    InvalidYear(u16),
    #[display(fmt = "Invalid month: {} (must be 1-{})", "_0", MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month {year}-{month:02}")]
    InvalidDay { month: u8, day: u8, year: u16 },
    #[display(fmt = "Invalid time {hour:02}:{minute:02}:{second:02}.{millisecond:03}")]
    InvalidTime {
        hour: u8,
        minute: u8,
        second: u8,
        millisecond: u16,
    },
    #[display(fmt = "Day number {} is outside years 1-{}", "_0", MAX_YEAR)]
    DayOutOfRange(i64),
    #[display(fmt = "Timestamp {} ms is outside years 1-{}", "_0", MAX_YEAR)]
    InstantOutOfRange(i64),
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for ParseError {}

/// Errors raised by the conversion engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LunarError {
    /// Year outside the calendar table or the solar term data.
    #[error("Year {year} is outside the tabulated range")]
    OutOfRange { year: i32 },

    /// Solar date that falls before the epoch or past the last tabulated lunar year.
    #[error("Date {date} is outside the convertible range")]
    DateOutOfRange { date: SolarDate },

    /// Hour outside `0..=23`.
    #[error("Invalid hour: {0} (must be 0-{max})", max = MAX_HOUR)]
    InvalidHour(u8),

    /// Solar term index outside `0..=23`.
    #[error("Invalid solar term index: {0} (must be 0-{max})", max = SOLAR_TERM_COUNT - 1)]
    InvalidTermIndex(u8),

    /// Input rejected before conversion.
    #[error(transparent)]
    InvalidInput(#[from] ParseError),
}
