/// Maximum valid Gregorian year accepted on input (inclusive)
pub const MAX_YEAR: u16 = 9999;

/// Maximum valid month (December)
pub const MAX_MONTH: u8 = 12;

/// First day of month, used for lower bounds
pub const MIN_DAY: u8 = 1;

/// Month number for January
pub const JANUARY: u8 = 1;
/// Month number for February
pub const FEBRUARY: u8 = 2;

/// Days in February for leap years
pub const FEBRUARY_DAYS_LEAP: u8 = 29;

/// Maximum days in each month (index 0 is unused, months are 1-indexed)
/// February shows 28 days (non-leap year default)
pub const DAYS_IN_MONTH: [u8; 13] = [
    0,  // index 0 unused (months are 1-indexed)
    31, // January
    28, // February (non-leap, adjusted by is_leap_year check)
    31, // March
    30, // April
    31, // May
    30, // June
    31, // July
    31, // August
    30, // September
    31, // October
    30, // November
    31, // December
];

/// Leap year occurs every 4 years
pub(crate) const LEAP_YEAR_CYCLE: u16 = 4;
/// Century years are not leap years unless...
pub(crate) const CENTURY_CYCLE: u16 = 100;
/// ...they are divisible by 400 (Gregorian calendar correction)
pub(crate) const GREGORIAN_CYCLE: u16 = 400;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Alternative date component separator (`2023/01/22`)
pub const SLASH_SEPARATOR: char = '/';
/// Time component separator
pub const TIME_SEPARATOR: char = ':';

/// First lunar year covered by the calendar table
pub const MIN_LUNAR_YEAR: u16 = 1900;
/// Last lunar year covered by the calendar table (inclusive)
pub const MAX_LUNAR_YEAR: u16 = 2100;

/// Last Gregorian year with solar term data; covers the tail of lunar `MAX_LUNAR_YEAR`
pub const MAX_TERM_YEAR: u16 = 2101;

/// Solar date of lunar 1900, month 1, day 1: `(year, month, day)`
pub const EPOCH_SOLAR: (u16, u8, u8) = (1900, 1, 31);

/// Length of a common lunar month
pub const SHORT_MONTH_DAYS: u16 = 29;
/// Length of a long lunar month
pub const LONG_MONTH_DAYS: u16 = 30;

/// Any year congruent to this one modulo 60 is 甲子 (cycle position 0)
pub const SEXAGENARY_REFERENCE_YEAR: i32 = 1984;
/// Cycle position of the Epoch Anchor's day (1900-01-01 is 甲戌, 30 days earlier)
pub const EPOCH_DAY_CYCLE: i64 = 40;
/// Cycle position of January 1900 before its first node term (丙子)
pub const JANUARY_1900_MONTH_CYCLE: i64 = 12;

/// Number of entries in the stem-branch cycle
pub const SEXAGENARY_CYCLE: u8 = 60;
/// Number of solar terms in a year
pub const SOLAR_TERM_COUNT: u8 = 24;
/// Last valid hour of the day
pub const MAX_HOUR: u8 = 23;

/// The ten heavenly stems
pub const STEMS: [&str; 10] = ["甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬", "癸"];

/// The twelve earthly branches, 子 first
pub const BRANCHES: [&str; 12] = [
    "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌", "亥",
];

/// Zodiac animals, aligned with [`BRANCHES`]
pub const ZODIAC: [&str; 12] = [
    "鼠", "牛", "虎", "兔", "龙", "蛇", "马", "羊", "猴", "鸡", "狗", "猪",
];

/// Solar term names; index 0 is 小寒 (Minor Cold), index 23 is 冬至 (Winter Solstice)
pub const SOLAR_TERMS: [&str; 24] = [
    "小寒", "大寒", "立春", "雨水", "惊蛰", "春分", "清明", "谷雨", "立夏", "小满", "芒种", "夏至",
    "小暑", "大暑", "立秋", "处暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪", "冬至",
];

/// Default suffix appended to a two-hour period name (`子时`)
pub const DEFAULT_HOUR_SUFFIX: &str = "时";

/// Default local offset when a caller does not ask for UTC: China Standard Time
pub const CHINA_STANDARD_OFFSET_MINUTES: i32 = 480;
