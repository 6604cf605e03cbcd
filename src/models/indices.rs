use serde::{Deserialize, Serialize};

/// Current-instant agronomic indices derived from the latest reading and the
/// upcoming daily aggregates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgronomicIndices {
    /// Instantaneous growing degree days (°C·day), never negative.
    pub growing_degree_days: f64,
    /// Hargreaves-style evapotranspiration proxy (mm/day), never negative.
    pub evapotranspiration: f64,
    /// Soil temperature proxy (°C), a flat scaling of air temperature.
    pub soil_temperature: f64,
    /// True when any of the next 3 days dips below 2°C.
    pub frost_risk: bool,
    pub irrigation_recommendation: IrrigationNeed,
    pub spraying_window: bool,
    pub heat_stress: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IrrigationNeed {
    #[serde(rename = "High need")]
    High,
    #[serde(rename = "Moderate need")]
    Moderate,
    #[serde(rename = "Low need")]
    Low,
    #[serde(rename = "Monitor")]
    Monitor,
}

impl IrrigationNeed {
    pub fn as_str(&self) -> &'static str {
        match self {
            IrrigationNeed::High => "High need",
            IrrigationNeed::Moderate => "Moderate need",
            IrrigationNeed::Low => "Low need",
            IrrigationNeed::Monitor => "Monitor",
        }
    }
}

impl std::fmt::Display for IrrigationNeed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
