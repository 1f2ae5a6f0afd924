use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One worked day. The date is the key; the store never holds two records
/// for the same date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub tip_total: f64,
    pub delivery_count: u32,
    pub temperature: Option<f64>,
    pub precipitation: Option<f64>,
}

impl DailyRecord {
    pub fn new(date: NaiveDate, tip_total: f64, delivery_count: u32, weather: WeatherReading) -> Self {
        Self {
            date,
            tip_total,
            delivery_count,
            temperature: weather.temperature,
            precipitation: weather.precipitation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WeatherReading {
    /// Daily maximum, °C.
    pub temperature: Option<f64>,
    /// Daily sum, mm.
    pub precipitation: Option<f64>,
}

impl WeatherReading {
    pub const UNKNOWN: WeatherReading = WeatherReading {
        temperature: None,
        precipitation: None,
    };

    pub fn is_known(&self) -> bool {
        self.temperature.is_some() || self.precipitation.is_some()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DayKind {
    Workday,
    Saturday,
    HolidayOrSunday,
}

/// A user's edit for a single day, before weather is attached.
#[derive(Debug, Clone, Deserialize)]
pub struct EditRequest {
    pub date: NaiveDate,
    pub tip_total: f64,
    pub delivery_count: i64,
}

#[derive(Debug, Default, Deserialize)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub in_month: bool,
    pub kind: DayKind,
    pub record: Option<DailyRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MonthCalendar {
    pub year: i32,
    pub month: u32,
    pub weeks: Vec<Vec<CalendarCell>>,
}

#[derive(Debug, Serialize)]
pub struct DailyPoint {
    pub date: NaiveDate,
    pub tip_total: f64,
    pub delivery_count: u32,
    pub tips_per_delivery: Option<f64>,
    pub temperature: Option<f64>,
    pub precipitation: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct MonthlySummary {
    pub year: i32,
    pub month: u32,
    pub total_tips: f64,
    pub average_tips: f64,
    pub weekly_average: f64,
    pub total_deliveries: u64,
    pub working_days: usize,
    pub target_days: u32,
    pub best_day: Option<DailyRecord>,
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub summary: MonthlySummary,
    pub daily: Vec<DailyPoint>,
}
