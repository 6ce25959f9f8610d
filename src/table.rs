//! Lunar calendar table for 1900-2100.
//!
//! Each year is packed into one 17-bit word:
//!
//! - bits 0-3: ordinal of the leap month, 0 when the year has none
//! - bits 4-15: month lengths, bit 15 for month 1 down to bit 4 for month 12
//!   (set = 30 days, clear = 29)
//! - bit 16: length of the leap month (set = 30 days, clear = 29)
//!
//! The words are decoded once into [`YearRecord`]s on first access.

use std::sync::LazyLock;

use tracing::trace;

use crate::consts::{LONG_MONTH_DAYS, MAX_LUNAR_YEAR, MAX_MONTH, MIN_LUNAR_YEAR, SHORT_MONTH_DAYS};
use crate::LunarError;

#[rustfmt::skip]
const LUNAR_INFO: [u32; (MAX_LUNAR_YEAR - MIN_LUNAR_YEAR + 1) as usize] = [
    0x04bd8, 0x04ae0, 0x0a570, 0x054d5, 0x0d260, 0x0d950, 0x16554, 0x056a0, 0x09ad0, 0x055d2, // 1900-1909
    0x04ae0, 0x0a5b6, 0x0a4d0, 0x0d250, 0x1d255, 0x0b540, 0x0d6a0, 0x0ada2, 0x095b0, 0x14977, // 1910-1919
    0x04970, 0x0a4b0, 0x0b4b5, 0x06a50, 0x06d40, 0x1ab54, 0x02b60, 0x09570, 0x052f2, 0x04970, // 1920-1929
    0x06566, 0x0d4a0, 0x0ea50, 0x16a95, 0x05ad0, 0x02b60, 0x186e3, 0x092e0, 0x1c8d7, 0x0c950, // 1930-1939
    0x0d4a0, 0x1d8a6, 0x0b550, 0x056a0, 0x1a5b4, 0x025d0, 0x092d0, 0x0d2b2, 0x0a950, 0x0b557, // 1940-1949
    0x06ca0, 0x0b550, 0x15355, 0x04da0, 0x0a5b0, 0x14573, 0x052b0, 0x0a9a8, 0x0e950, 0x06aa0, // 1950-1959
    0x0aea6, 0x0ab50, 0x04b60, 0x0aae4, 0x0a570, 0x05260, 0x0f263, 0x0d950, 0x05b57, 0x056a0, // 1960-1969
    0x096d0, 0x04dd5, 0x04ad0, 0x0a4d0, 0x0d4d4, 0x0d250, 0x0d558, 0x0b540, 0x0b6a0, 0x195a6, // 1970-1979
    0x095b0, 0x049b0, 0x0a974, 0x0a4b0, 0x0b27a, 0x06a50, 0x06d40, 0x0af46, 0x0ab60, 0x09570, // 1980-1989
    0x04af5, 0x04970, 0x064b0, 0x074a3, 0x0ea50, 0x06b58, 0x05ac0, 0x0ab60, 0x096d5, 0x092e0, // 1990-1999
    0x0c960, 0x0d954, 0x0d4a0, 0x0da50, 0x07552, 0x056a0, 0x0abb7, 0x025d0, 0x092d0, 0x0cab5, // 2000-2009
    0x0a950, 0x0b4a0, 0x0baa4, 0x0ad50, 0x055d9, 0x04ba0, 0x0a5b0, 0x15176, 0x052b0, 0x0a930, // 2010-2019
    0x07954, 0x06aa0, 0x0ad50, 0x05b52, 0x04b60, 0x0a6e6, 0x0a4e0, 0x0d260, 0x0ea65, 0x0d530, // 2020-2029
    0x05aa0, 0x076a3, 0x096d0, 0x04afb, 0x04ad0, 0x0a4d0, 0x1d0b6, 0x0d250, 0x0d520, 0x0dd45, // 2030-2039
    0x0b5a0, 0x056d0, 0x055b2, 0x049b0, 0x0a577, 0x0a4b0, 0x0aa50, 0x1b255, 0x06d20, 0x0ada0, // 2040-2049
    0x14b63, 0x09370, 0x049f8, 0x04970, 0x064b0, 0x168a6, 0x0ea50, 0x06b20, 0x1a6c4, 0x0aae0, // 2050-2059
    0x092e0, 0x0d2e3, 0x0c960, 0x0d557, 0x0d4a0, 0x0da50, 0x05d55, 0x056a0, 0x0a6d0, 0x055d4, // 2060-2069
    0x052d0, 0x0a9b8, 0x0a950, 0x0b4a0, 0x0b6a6, 0x0ad50, 0x055a0, 0x0aba4, 0x0a5b0, 0x052b0, // 2070-2079
    0x0b273, 0x06930, 0x07337, 0x06aa0, 0x0ad50, 0x14b55, 0x04b60, 0x0a570, 0x054e4, 0x0d160, // 2080-2089
    0x0e968, 0x0d520, 0x0daa0, 0x16aa6, 0x056d0, 0x04ae0, 0x0a9d4, 0x0a2d0, 0x0d150, 0x0f252, // 2090-2099
    0x0d520,                                                                                   // 2100
];

const LEAP_MONTH_MASK: u32 = 0xf;
const LEAP_LENGTH_BIT: u32 = 0x1_0000;
/// Bit for month 1; month `m` is this shifted right by `m - 1`.
const FIRST_MONTH_BIT: u32 = 0x8000;

static TABLE: LazyLock<Vec<YearRecord>> = LazyLock::new(|| {
    let records: Vec<YearRecord> = (MIN_LUNAR_YEAR..=MAX_LUNAR_YEAR)
        .zip(LUNAR_INFO)
        .map(|(year, word)| YearRecord::decode(year, word))
        .collect();
    trace!(years = records.len(), "decoded lunar calendar table");
    records
});

/// One lunar month inside a year: its ordinal, whether it is the repeated
/// leap occurrence, and its length in days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthSpan {
    pub month: u8,
    pub leap: bool,
    pub days: u16,
}

/// Decoded month layout of one lunar year.
///
/// Months are listed in calendar order, with the leap month placed right after
/// the month it repeats.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct YearRecord {
    year: u16,
    leap_month: u8,
    months: Vec<MonthSpan>,
    total_days: u16,
}

impl YearRecord {
    fn decode(year: u16, word: u32) -> Self {
        let leap_month = (word & LEAP_MONTH_MASK) as u8;
        let span = |bit_set: bool| if bit_set { LONG_MONTH_DAYS } else { SHORT_MONTH_DAYS };

        let mut months = Vec::with_capacity(13);
        for month in 1..=MAX_MONTH {
            months.push(MonthSpan {
                month,
                leap: false,
                days: span(word & (FIRST_MONTH_BIT >> (month - 1)) != 0),
            });
            if month == leap_month {
                months.push(MonthSpan {
                    month,
                    leap: true,
                    days: span(word & LEAP_LENGTH_BIT != 0),
                });
            }
        }
        let total_days = months.iter().map(|m| m.days).sum();

        Self {
            year,
            leap_month,
            months,
            total_days,
        }
    }

    pub const fn year(&self) -> u16 {
        self.year
    }

    /// Ordinal of the repeated month, if the year has one.
    pub const fn leap_month(&self) -> Option<u8> {
        if self.leap_month == 0 {
            None
        } else {
            Some(self.leap_month)
        }
    }

    /// All 12 or 13 months in calendar order.
    pub fn months(&self) -> &[MonthSpan] {
        &self.months
    }

    pub const fn total_days(&self) -> u16 {
        self.total_days
    }

    /// Length of a given month, `None` if `leap` is requested for a month that does not repeat.
    pub fn month_days(&self, month: u8, leap: bool) -> Option<u16> {
        self.months
            .iter()
            .find(|m| m.month == month && m.leap == leap)
            .map(|m| m.days)
    }
}

/// Record for lunar `year`.
///
/// # Errors
/// Returns `LunarError::OutOfRange` outside `MIN_LUNAR_YEAR..=MAX_LUNAR_YEAR`.
pub fn year_record(year: i32) -> Result<&'static YearRecord, LunarError> {
    let idx = year
        .checked_sub(i32::from(MIN_LUNAR_YEAR))
        .and_then(|i| usize::try_from(i).ok())
        .ok_or(LunarError::OutOfRange { year })?;
    TABLE.get(idx).ok_or(LunarError::OutOfRange { year })
}

/// Every tabulated year in order.
pub fn records() -> &'static [YearRecord] {
    &TABLE
}
