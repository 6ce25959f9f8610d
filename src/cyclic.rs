//! Stem-branch (sexagenary) labels, zodiac animals and two-hour periods.
//!
//! Every annotator here is a pure function of integer inputs. Month and day
//! cycles run continuously across lunar-year boundaries, so they are keyed on
//! running counts rather than on the calendar year.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::{
    BRANCHES, EPOCH_DAY_CYCLE, JANUARY_1900_MONTH_CYCLE, MAX_HOUR, SEXAGENARY_CYCLE,
    SEXAGENARY_REFERENCE_YEAR, STEMS, ZODIAC,
};
use crate::prelude::*;
use crate::LunarError;

/// A position in the 60-term stem-branch cycle, `0` being 甲子.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Into)]
#[serde(into = "u8", try_from = "u8")]
pub struct CyclicIndex(u8);

impl CyclicIndex {
    /// Reduces any running count to its cycle position.
    pub const fn from_count(count: i64) -> Self {
        Self(count.rem_euclid(SEXAGENARY_CYCLE as i64) as u8)
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Heavenly stem, `0..10`.
    pub const fn stem(self) -> u8 {
        self.0 % 10
    }

    /// Earthly branch, `0..12`.
    pub const fn branch(self) -> u8 {
        self.0 % 12
    }

    pub const fn stem_name(self) -> &'static str {
        STEMS[self.stem() as usize]
    }

    pub const fn branch_name(self) -> &'static str {
        BRANCHES[self.branch() as usize]
    }
}

impl TryFrom<u8> for CyclicIndex {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if value < SEXAGENARY_CYCLE {
            Ok(Self(value))
        } else {
            Err(format!("cycle index {value} not in 0..{SEXAGENARY_CYCLE}"))
        }
    }
}

/// Renders as the two-character name, e.g. `癸卯`.
impl fmt::Display for CyclicIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.stem_name(), self.branch_name())
    }
}

/// The twelve zodiac animals, in branch order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zodiac {
    Rat,
    Ox,
    Tiger,
    Rabbit,
    Dragon,
    Snake,
    Horse,
    Goat,
    Monkey,
    Rooster,
    Dog,
    Pig,
}

impl Zodiac {
    const ALL: [Self; 12] = [
        Self::Rat,
        Self::Ox,
        Self::Tiger,
        Self::Rabbit,
        Self::Dragon,
        Self::Snake,
        Self::Horse,
        Self::Goat,
        Self::Monkey,
        Self::Rooster,
        Self::Dog,
        Self::Pig,
    ];

    /// Animal for an earthly branch; the branch is taken modulo 12.
    pub const fn from_branch(branch: u8) -> Self {
        Self::ALL[(branch % 12) as usize]
    }

    pub const fn name(self) -> &'static str {
        ZODIAC[self as usize]
    }
}

impl fmt::Display for Zodiac {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Stem-branch of a year.
pub const fn year_cycle(year: i32) -> CyclicIndex {
    CyclicIndex::from_count(year as i64 - SEXAGENARY_REFERENCE_YEAR as i64)
}

/// Stem-branch of a month, given the number of solar months elapsed since
/// January 1900 (counting a month as begun at its first node term).
pub const fn month_cycle(months_since_1900: i64) -> CyclicIndex {
    CyclicIndex::from_count(months_since_1900 + JANUARY_1900_MONTH_CYCLE)
}

/// Stem-branch of a day, given the day offset from the epoch anchor.
pub const fn day_cycle(day_offset: i64) -> CyclicIndex {
    CyclicIndex::from_count(day_offset + EPOCH_DAY_CYCLE)
}

/// Zodiac animal of a year.
pub const fn zodiac(year: i32) -> Zodiac {
    Zodiac::from_branch(year_cycle(year).branch())
}

/// Earthly branch of the two-hour period containing `hour`.
///
/// 子 covers 23:00 to 00:59, 丑 01:00 to 02:59, and so on.
///
/// # Errors
/// Returns `LunarError::InvalidHour` for hours above 23.
pub fn time_branch(hour: u8) -> Result<u8, LunarError> {
    if hour > MAX_HOUR {
        return Err(LunarError::InvalidHour(hour));
    }
    Ok(hour_branch(hour))
}

/// Branch of an hour already known to be in `0..=23`.
pub(crate) const fn hour_branch(hour: u8) -> u8 {
    hour.div_ceil(2) % 12
}
