use crate::models::WeatherCondition;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily summary derived from a non-empty group of measurements sharing a
/// calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyAggregate {
    pub date: NaiveDate,
    pub temperature: TemperatureSummary,
    /// Average humidity, rounded to the nearest integer percent.
    pub humidity: i64,
    /// Average pressure, rounded to the nearest integer hPa.
    pub pressure: i64,
    /// Average wind speed in km/h, rounded to 2 decimals.
    pub wind_speed: f64,
    /// Precipitation sum in mm, rounded to 2 decimals.
    pub precipitation: f64,
    /// Condition of the median-indexed sample (index floor(count/2)): the
    /// temporally central sample wins, not a mode vote.
    pub condition: WeatherCondition,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TemperatureSummary {
    pub min: f64,
    pub max: f64,
    pub average: f64,
}
