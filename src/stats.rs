use crate::models::{DailyPoint, DailyRecord, MonthlySummary, StatsResponse};
use chrono::Datelike;

/// Weeks a month is assumed to hold when averaging per week.
const WEEKS_PER_MONTH: f64 = 4.0;

pub fn monthly_subset(records: &[DailyRecord], year: i32, month: u32) -> Vec<DailyRecord> {
    records
        .iter()
        .filter(|record| record.date.year() == year && record.date.month() == month)
        .cloned()
        .collect()
}

pub fn total_tips(subset: &[DailyRecord]) -> f64 {
    subset.iter().map(|record| record.tip_total).sum()
}

pub fn average_tips(subset: &[DailyRecord]) -> f64 {
    if subset.is_empty() {
        return 0.0;
    }
    total_tips(subset) / subset.len() as f64
}

pub fn weekly_average(subset: &[DailyRecord]) -> f64 {
    total_tips(subset) / WEEKS_PER_MONTH
}

pub fn working_day_count(subset: &[DailyRecord]) -> usize {
    subset.len()
}

pub fn total_deliveries(subset: &[DailyRecord]) -> u64 {
    subset
        .iter()
        .map(|record| u64::from(record.delivery_count))
        .sum()
}

/// Highest-tipping day across `records`; the earliest entry wins a tie.
pub fn best_day(records: &[DailyRecord]) -> Option<&DailyRecord> {
    records.iter().fold(None, |best, record| match best {
        Some(current) if current.tip_total >= record.tip_total => Some(current),
        _ => Some(record),
    })
}

pub fn tips_per_delivery(record: &DailyRecord) -> Option<f64> {
    if record.delivery_count == 0 {
        return None;
    }
    Some(record.tip_total / f64::from(record.delivery_count))
}

pub fn build_summary(
    records: &[DailyRecord],
    year: i32,
    month: u32,
    target_days: u32,
) -> MonthlySummary {
    let subset = monthly_subset(records, year, month);

    MonthlySummary {
        year,
        month,
        total_tips: total_tips(&subset),
        average_tips: average_tips(&subset),
        weekly_average: weekly_average(&subset),
        total_deliveries: total_deliveries(&subset),
        working_days: working_day_count(&subset),
        target_days,
        best_day: best_day(records).cloned(),
    }
}

/// Per-day points of the subset, oldest first.
pub fn daily_series(subset: &[DailyRecord]) -> Vec<DailyPoint> {
    let mut points: Vec<DailyPoint> = subset
        .iter()
        .map(|record| DailyPoint {
            date: record.date,
            tip_total: record.tip_total,
            delivery_count: record.delivery_count,
            tips_per_delivery: tips_per_delivery(record),
            temperature: record.temperature,
            precipitation: record.precipitation,
        })
        .collect();
    points.sort_by_key(|point| point.date);
    points
}

pub fn build_stats(records: &[DailyRecord], year: i32, month: u32, target_days: u32) -> StatsResponse {
    StatsResponse {
        summary: build_summary(records, year, month, target_days),
        daily: daily_series(&monthly_subset(records, year, month)),
    }
}
