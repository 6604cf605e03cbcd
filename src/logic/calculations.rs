use crate::models::{AgronomicIndices, DailyAggregate, IrrigationNeed, Measurement};

/// Temperature range fallback when the first forecast day is unavailable.
const ET_RANGE_FALLBACK: f64 = 10.0;

/// Instantaneous growing degree days for a single reading.
pub fn growing_degree_days(temp_c: f64, base_temp_c: f64) -> f64 {
    (temp_c - base_temp_c).max(0.0)
}

/// Cumulative GDD over a historical period, using each day's AVERAGE
/// temperature. Distinct from the instantaneous variant above.
pub fn cumulative_gdd(days: &[DailyAggregate], base_temp_c: f64) -> f64 {
    days.iter()
        .map(|d| growing_degree_days(d.temperature.average, base_temp_c))
        .sum()
}

/// Hargreaves-style evapotranspiration proxy (mm/day). The constants are
/// fixed for output compatibility; this is a coarse heuristic, not a
/// calibrated model. The diurnal range comes from the FIRST upcoming daily
/// aggregate, falling back to 10 when it is unavailable.
pub fn evapotranspiration(temp_c: f64, upcoming: &[DailyAggregate]) -> f64 {
    let range = upcoming
        .first()
        .map(|d| (d.temperature.max - d.temperature.min).abs())
        .unwrap_or(ET_RANGE_FALLBACK);

    let et = 0.0023 * (temp_c + 17.8) * range.sqrt() * (temp_c + 273.16) / 273.16 * 2.45;
    et.max(0.0)
}

/// Flat empirical air-to-soil scaling; no depth or thermal-lag modeling.
pub fn soil_temperature(temp_c: f64) -> f64 {
    temp_c * 0.85
}

/// Frost risk when any of the next three days dips below 2°C.
pub fn frost_risk(upcoming: &[DailyAggregate]) -> bool {
    upcoming.iter().take(3).any(|d| d.temperature.min < 2.0)
}

/// Irrigation need cascade, first match wins.
pub fn irrigation_need(temp_c: f64, humidity: f64) -> IrrigationNeed {
    let tiers = [
        (humidity < 40.0 && temp_c > 25.0, IrrigationNeed::High),
        (humidity < 60.0 && temp_c > 20.0, IrrigationNeed::Moderate),
        (humidity > 80.0, IrrigationNeed::Low),
    ];

    tiers
        .into_iter()
        .find_map(|(hit, need)| hit.then_some(need))
        .unwrap_or(IrrigationNeed::Monitor)
}

/// Calm wind and a dry first forecast day. Any precipitation on day 0
/// disqualifies regardless of wind; a missing day 0 counts as dry.
pub fn spraying_window(wind_speed_kmh: f64, upcoming: &[DailyAggregate]) -> bool {
    let day0_precip = upcoming.first().map(|d| d.precipitation).unwrap_or(0.0);
    wind_speed_kmh < 15.0 && day0_precip <= 0.0
}

pub fn heat_stress(temp_c: f64, humidity: f64) -> bool {
    temp_c > 35.0 || (temp_c > 30.0 && humidity > 70.0)
}

/// Derive the current-instant index set from the latest reading and the
/// upcoming daily aggregates.
pub fn derive_indices(
    current: &Measurement,
    upcoming: &[DailyAggregate],
    base_temp_c: f64,
) -> AgronomicIndices {
    AgronomicIndices {
        growing_degree_days: growing_degree_days(current.temperature, base_temp_c),
        evapotranspiration: evapotranspiration(current.temperature, upcoming),
        soil_temperature: soil_temperature(current.temperature),
        frost_risk: frost_risk(upcoming),
        irrigation_recommendation: irrigation_need(current.temperature, current.humidity),
        spraying_window: spraying_window(current.wind_speed, upcoming),
        heat_stress: heat_stress(current.temperature, current.humidity),
    }
}
