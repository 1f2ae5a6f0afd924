use crate::holidays::is_public_holiday;
use crate::models::{CalendarCell, DailyRecord, DayKind, MonthCalendar};
use chrono::{Datelike, Days, NaiveDate, Weekday};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("no such month: {year}-{month:02}")]
    InvalidMonth { year: i32, month: u32 },
}

pub type Week = [NaiveDate; 7];

/// Monday-first weeks covering the whole month, padded with the neighbouring
/// months' days so every week is complete.
pub fn build_month_grid(year: i32, month: u32) -> Result<Vec<Week>, CalendarError> {
    let first = first_of_month(year, month)?;
    let last = last_of_month(year, month)?;

    let out_of_range = || CalendarError::InvalidMonth { year, month };

    let mut start = week_start(first).ok_or_else(out_of_range)?;
    let mut weeks = Vec::with_capacity(6);
    while start <= last {
        let mut week = [start; 7];
        for (offset, slot) in (0u64..).zip(week.iter_mut()) {
            *slot = start
                .checked_add_days(Days::new(offset))
                .ok_or_else(out_of_range)?;
        }
        weeks.push(week);
        match start.checked_add_days(Days::new(7)) {
            Some(next) => start = next,
            None if week[6] >= last => break,
            None => return Err(out_of_range()),
        }
    }
    Ok(weeks)
}

pub fn classify(date: NaiveDate) -> DayKind {
    match date.weekday() {
        Weekday::Sun => DayKind::HolidayOrSunday,
        _ if is_public_holiday(date) => DayKind::HolidayOrSunday,
        Weekday::Sat => DayKind::Saturday,
        _ => DayKind::Workday,
    }
}

/// The month grid with each in-month day annotated with its record, if any.
pub fn build_calendar(
    records: &[DailyRecord],
    year: i32,
    month: u32,
) -> Result<MonthCalendar, CalendarError> {
    let by_date: HashMap<NaiveDate, &DailyRecord> =
        records.iter().map(|record| (record.date, record)).collect();

    let weeks = build_month_grid(year, month)?
        .into_iter()
        .map(|week| {
            week.into_iter()
                .map(|date| {
                    let in_month = date.year() == year && date.month() == month;
                    CalendarCell {
                        date,
                        in_month,
                        kind: classify(date),
                        record: in_month
                            .then(|| by_date.get(&date).map(|r| (*r).clone()))
                            .flatten(),
                    }
                })
                .collect()
        })
        .collect();

    Ok(MonthCalendar { year, month, weeks })
}

/// `(previous, next)` months as `(year, month)` pairs.
pub fn adjacent_months(year: i32, month: u32) -> ((i32, u32), (i32, u32)) {
    let previous = if month <= 1 { (year - 1, 12) } else { (year, month - 1) };
    let next = if month >= 12 { (year + 1, 1) } else { (year, month + 1) };
    (previous, next)
}

pub fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    NaiveDate::from_ymd_opt(year, month, 1).ok_or(CalendarError::InvalidMonth { year, month })
}

fn last_of_month(year: i32, month: u32) -> Result<NaiveDate, CalendarError> {
    let ((_, _), (next_year, next_month)) = adjacent_months(year, month);
    first_of_month(year, month)?;
    first_of_month(next_year, next_month)?
        .pred_opt()
        .ok_or(CalendarError::InvalidMonth { year, month })
}

/// `None` when the Monday falls before the first representable date.
fn week_start(date: NaiveDate) -> Option<NaiveDate> {
    date.checked_sub_days(Days::new(u64::from(date.weekday().num_days_from_monday())))
}
