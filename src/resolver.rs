//! Day-offset resolution: solar date to lunar year, month and day.

use tracing::trace;

use crate::consts::{EPOCH_SOLAR, MIN_LUNAR_YEAR};
use crate::table::{records, year_record};
use crate::types::SolarDate;
use crate::{LunarError, ParseError};

/// Lunar position of a solar date, before any cyclic labels are attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResolvedDate {
    pub year: u16,
    pub month: u8,
    /// `true` for the repeated occurrence of `month`
    pub leap: bool,
    pub day: u8,
    /// Whole days since the epoch anchor
    pub day_offset: i64,
}

/// Solar date of lunar 1900, month 1, day 1.
///
/// # Errors
/// Never fails for the built-in anchor; the `Result` keeps construction checked.
pub fn epoch() -> Result<SolarDate, ParseError> {
    let (year, month, day) = EPOCH_SOLAR;
    SolarDate::new(year, month, day)
}

/// Last solar date covered by the table (last day of lunar `MAX_LUNAR_YEAR`).
///
/// # Errors
/// Propagates a failure to build the epoch anchor.
pub fn last_supported() -> Result<SolarDate, ParseError> {
    let span: i64 = records().iter().map(|r| i64::from(r.total_days())).sum();
    SolarDate::from_day_number(epoch()?.day_number() + span - 1)
}

/// Walks the calendar table from the epoch anchor to `date`.
///
/// # Errors
/// Returns `LunarError::DateOutOfRange` before the anchor or past the last
/// tabulated lunar year.
pub fn resolve(date: SolarDate) -> Result<ResolvedDate, LunarError> {
    let day_offset = epoch()?.days_until(&date);
    if day_offset < 0 {
        return Err(LunarError::DateOutOfRange { date });
    }

    let mut remaining = day_offset;
    let mut year = i32::from(MIN_LUNAR_YEAR);
    let record = loop {
        let record = match year_record(year) {
            Ok(record) => record,
            Err(LunarError::OutOfRange { .. }) => return Err(LunarError::DateOutOfRange { date }),
            Err(e) => return Err(e),
        };
        let total = i64::from(record.total_days());
        if remaining < total {
            break record;
        }
        remaining -= total;
        year += 1;
    };
    trace!(%date, year, day_of_year = remaining, "located lunar year");

    for span in record.months() {
        let days = i64::from(span.days);
        if remaining < days {
            return Ok(ResolvedDate {
                year: record.year(),
                month: span.month,
                leap: span.leap,
                // remaining < 30 here
                day: (remaining + 1) as u8,
                day_offset,
            });
        }
        remaining -= days;
    }

    // unreachable while total_days is the sum of the month spans
    Err(LunarError::DateOutOfRange { date })
}
