use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// One normalized provider sample: a point-in-time reading for the current
/// endpoint, or a point-in-interval reading for the 3-hourly forecast and
/// hourly historical endpoints. Immutable once constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Measurement {
    pub timestamp: DateTime<Utc>,
    /// UTC calendar date of `timestamp`. Aggregation groups on this field;
    /// using UTC rather than local time is a fixed simplification.
    pub date: NaiveDate,
    /// Air temperature in °C.
    pub temperature: f64,
    /// Relative humidity in %.
    pub humidity: f64,
    /// Atmospheric pressure in hPa.
    pub pressure: f64,
    /// Wind speed in km/h.
    pub wind_speed: f64,
    /// Wind direction in degrees; 0 when the provider omits it.
    pub wind_direction: f64,
    /// Precipitation accumulated over the sample's interval, in mm.
    pub precipitation: f64,
    pub condition: WeatherCondition,
}

/// Provider weather-condition label: main category, human description, icon code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherCondition {
    pub main: String,
    pub description: String,
    pub icon: String,
}
