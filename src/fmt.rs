//! Chinese renderings of lunar date components.

use crate::consts::{BRANCHES, DEFAULT_HOUR_SUFFIX};

/// Chinese numerals; index 0 is 〇 so digits can be looked up directly.
const DIGITS: [&str; 10] = ["〇", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

const WEEKDAYS: [&str; 7] = ["日", "一", "二", "三", "四", "五", "六"];

/// Year written digit by digit, e.g. `二〇二三`.
pub fn chinese_year(year: u16) -> String {
    year.to_string()
        .bytes()
        .map(|b| DIGITS[usize::from(b - b'0')])
        .collect()
}

/// Month name including 月. Months 1, 11 and 12 are 正月, 冬月 and 腊月;
/// a leap month is prefixed with 闰.
///
/// Returns an empty string for months outside `1..=12`.
pub fn month_name(month: u8, leap: bool) -> String {
    let base = match month {
        1 => "正",
        2..=9 => DIGITS[usize::from(month)],
        10 => "十",
        11 => "冬",
        12 => "腊",
        _ => return String::new(),
    };
    let prefix = if leap { "闰" } else { "" };
    format!("{prefix}{base}月")
}

/// Day name: 初一 to 初十, 十一 to 十九, 二十, 廿一 to 廿九, 三十.
///
/// Returns an empty string for days outside `1..=30`.
pub fn day_name(day: u8) -> String {
    let tens = match day {
        1..=10 => "初",
        11..=19 => "十",
        20 => "二",
        21..=29 => "廿",
        30 => "三",
        _ => return String::new(),
    };
    let unit = match day % 10 {
        0 => "十",
        d => DIGITS[usize::from(d)],
    };
    format!("{tens}{unit}")
}

/// `星期日` through `星期六`, 0 being Sunday.
pub fn weekday_name(weekday: u8) -> String {
    format!("星期{}", WEEKDAYS[usize::from(weekday % 7)])
}

/// Name of a two-hour period from its branch, e.g. `子时`.
///
/// `suffix` defaults to `时` when `None`.
pub fn time_name(branch: u8, suffix: Option<&str>) -> String {
    let suffix = suffix.unwrap_or(DEFAULT_HOUR_SUFFIX);
    format!("{}{suffix}", BRANCHES[usize::from(branch % 12)])
}
