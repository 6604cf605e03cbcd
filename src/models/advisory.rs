use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FrostRisk {
    None,
    Low,
    Moderate,
    High,
    Critical,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrostAlert {
    pub risk: FrostRisk,
    pub message: String,
    pub action: String,
    pub timeframe: String,
    /// Minimum temperature found in the inspected forecast window.
    pub min_temperature: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrrigationUrgency {
    #[serde(rename = "skip")]
    Skip,
    #[serde(rename = "immediate")]
    Immediate,
    #[serde(rename = "within_24h")]
    Within24h,
    #[serde(rename = "within_48h")]
    Within48h,
    #[serde(rename = "monitor")]
    Monitor,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IrrigationAlert {
    pub recommendation: IrrigationUrgency,
    pub message: String,
    pub action: String,
    /// Cumulative precipitation expected over the inspected window, in mm.
    pub expected_rain_mm: f64,
    pub temperature: f64,
    pub humidity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SprayingAlert {
    pub suitable: bool,
    pub message: String,
    pub action: String,
    /// "early morning" when a good window lands between 06:00 and 10:00.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_time: Option<String>,
    /// Hours until the next sample meeting the spraying thresholds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_window_hours: Option<u32>,
    pub wind_speed: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeatStressLevel {
    None,
    Low,
    Moderate,
    High,
    Extreme,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeatStressAlert {
    pub level: HeatStressLevel,
    pub message: String,
    pub action: String,
    pub temperature: f64,
    pub humidity: f64,
    /// 3 hours per forecast sample above 30°C.
    pub expected_duration_hours: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Full advisory for one location, built fresh on every request. Never cached
/// or persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropAdvisory {
    pub location: Location,
    pub frost: FrostAlert,
    pub irrigation: IrrigationAlert,
    pub spraying: SprayingAlert,
    pub heat_stress: HeatStressAlert,
    pub general_advice: Vec<String>,
    pub priority: Priority,
    pub generated_at: DateTime<Utc>,
}
