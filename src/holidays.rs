//! Polish statutory public holidays.

use chrono::{Datelike, Days, NaiveDate};

const FIXED: [(u32, u32); 9] = [
    (1, 1),   // New Year
    (1, 6),   // Epiphany
    (5, 1),   // Labour Day
    (5, 3),   // Constitution Day
    (8, 15),  // Assumption
    (11, 1),  // All Saints
    (11, 11), // Independence Day
    (12, 25),
    (12, 26),
];

/// Christmas Eve became a day off starting with this year.
const CHRISTMAS_EVE_FROM: i32 = 2025;

pub fn is_public_holiday(date: NaiveDate) -> bool {
    let (month, day) = (date.month(), date.day());
    if FIXED.contains(&(month, day)) {
        return true;
    }
    if (month, day) == (12, 24) && date.year() >= CHRISTMAS_EVE_FROM {
        return true;
    }
    movable_holidays(date.year()).contains(&date)
}

/// Every holiday of `year`, sorted.
pub fn holidays_in_year(year: i32) -> Vec<NaiveDate> {
    let mut days: Vec<NaiveDate> = FIXED
        .iter()
        .filter_map(|&(m, d)| NaiveDate::from_ymd_opt(year, m, d))
        .chain(movable_holidays(year))
        .collect();
    if year >= CHRISTMAS_EVE_FROM {
        days.extend(NaiveDate::from_ymd_opt(year, 12, 24));
    }
    days.sort();
    days
}

fn movable_holidays(year: i32) -> Vec<NaiveDate> {
    let Some(easter) = easter_sunday(year) else {
        return Vec::new();
    };
    // Easter Sunday, Easter Monday, Pentecost, Corpus Christi.
    [0, 1, 49, 60]
        .into_iter()
        .filter_map(|offset| easter.checked_add_days(Days::new(offset)))
        .collect()
}

/// Western Easter, anonymous Gregorian algorithm.
pub fn easter_sunday(year: i32) -> Option<NaiveDate> {
    let a = year.rem_euclid(19);
    let b = year.div_euclid(100);
    let c = year.rem_euclid(100);
    let d = b.div_euclid(4);
    let e = b.rem_euclid(4);
    let f = (b + 8).div_euclid(25);
    let g = (b - f + 1).div_euclid(3);
    let h = (19 * a + b - d - g + 15).rem_euclid(30);
    let i = c.div_euclid(4);
    let k = c.rem_euclid(4);
    let l = (32 + 2 * e + 2 * i - h - k).rem_euclid(7);
    let m = (a + 11 * h + 22 * l).div_euclid(451);
    let month = (h + l - 7 * m + 114).div_euclid(31);
    let day = (h + l - 7 * m + 114).rem_euclid(31) + 1;
    NaiveDate::from_ymd_opt(year, month as u32, day as u32)
}
