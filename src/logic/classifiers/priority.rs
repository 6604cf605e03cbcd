use super::{frost, heat, irrigation, spraying};
use crate::models::{
    CropAdvisory, FrostAlert, FrostRisk, HeatStressAlert, HeatStressLevel, IrrigationAlert,
    IrrigationUrgency, Location, Measurement, Priority, SprayingAlert,
};
use chrono::Utc;

/// Collapse the three escalating alerts into one overall priority. Spraying
/// never raises the priority; it only contributes advice.
pub fn overall_priority(
    frost: &FrostAlert,
    irrigation: &IrrigationAlert,
    heat: &HeatStressAlert,
) -> Priority {
    if frost.risk == FrostRisk::Critical
        || heat.level == HeatStressLevel::Extreme
        || irrigation.recommendation == IrrigationUrgency::Immediate
    {
        Priority::Urgent
    } else if frost.risk == FrostRisk::High
        || heat.level == HeatStressLevel::High
        || irrigation.recommendation == IrrigationUrgency::Within24h
    {
        Priority::High
    } else if frost.risk == FrostRisk::Moderate
        || heat.level == HeatStressLevel::Moderate
        || irrigation.recommendation == IrrigationUrgency::Within48h
    {
        Priority::Medium
    } else {
        Priority::Low
    }
}

/// Advice strings are appended independently of the priority computation.
pub fn general_advice(
    frost: &FrostAlert,
    irrigation: &IrrigationAlert,
    spraying: &SprayingAlert,
    heat: &HeatStressAlert,
) -> Vec<String> {
    let mut advice = Vec::new();

    if spraying.suitable {
        advice.push(
            "Conditions are favorable for spraying; see the spraying window for timing."
                .to_string(),
        );
    } else {
        advice.push("Hold off on spraying until conditions improve.".to_string());
    }

    if irrigation.recommendation == IrrigationUrgency::Skip {
        advice.push(format!(
            "Rain expected ({:.1}mm within 48 hours); skip scheduled irrigation.",
            irrigation.expected_rain_mm
        ));
    }

    if frost.risk == FrostRisk::None && heat.level == HeatStressLevel::None {
        advice.push("Optimal temperature conditions for most field work.".to_string());
    }

    advice
}

/// Run all four classifiers over the current reading and forecast window and
/// assemble the advisory.
pub fn build_advisory(
    location: Location,
    current: &Measurement,
    window: &[Measurement],
) -> CropAdvisory {
    let frost = frost::classify(current, window);
    let irrigation = irrigation::classify(current, window);
    let spraying = spraying::classify(current, window);
    let heat_stress = heat::classify(current, window);

    let priority = overall_priority(&frost, &irrigation, &heat_stress);
    let general_advice = general_advice(&frost, &irrigation, &spraying, &heat_stress);

    CropAdvisory {
        location,
        frost,
        irrigation,
        spraying,
        heat_stress,
        general_advice,
        priority,
        generated_at: Utc::now(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeatherCondition;
    use chrono::{TimeZone, Utc};

    fn reading(temp: f64, humidity: f64, wind: f64) -> Measurement {
        let timestamp = Utc.with_ymd_and_hms(2025, 4, 2, 9, 0, 0).unwrap();
        Measurement {
            timestamp,
            date: timestamp.date_naive(),
            temperature: temp,
            humidity,
            pressure: 1015.0,
            wind_speed: wind,
            wind_direction: 0.0,
            precipitation: 0.0,
            condition: WeatherCondition::default(),
        }
    }

    fn location() -> Location {
        Location {
            latitude: 18.5,
            longitude: 73.8,
        }
    }

    #[test]
    fn critical_frost_is_urgent() {
        let window = vec![reading(-3.0, 60.0, 5.0); 8];
        let advisory = build_advisory(location(), &reading(4.0, 60.0, 5.0), &window);
        assert_eq!(advisory.priority, Priority::Urgent);
    }

    #[test]
    fn extreme_heat_is_urgent() {
        let window = vec![reading(34.0, 60.0, 5.0); 8];
        let advisory = build_advisory(location(), &reading(38.0, 75.0, 5.0), &window);
        assert_eq!(advisory.priority, Priority::Urgent);
    }

    #[test]
    fn moderate_tiers_map_to_medium() {
        // Window minimum 1.5°C: frost Moderate; mild current conditions
        let window = vec![reading(1.5, 60.0, 5.0); 8];
        let advisory = build_advisory(location(), &reading(18.0, 60.0, 5.0), &window);
        assert_eq!(advisory.priority, Priority::Medium);
    }

    #[test]
    fn calm_mild_conditions_are_low() {
        let window = vec![reading(12.0, 60.0, 5.0); 8];
        let advisory = build_advisory(location(), &reading(18.0, 65.0, 5.0), &window);
        assert_eq!(advisory.priority, Priority::Low);
    }

    #[test]
    fn optimal_conditions_advice_when_no_frost_and_no_heat() {
        let window = vec![reading(12.0, 60.0, 5.0); 8];
        let advisory = build_advisory(location(), &reading(18.0, 65.0, 5.0), &window);
        assert!(advisory
            .general_advice
            .iter()
            .any(|a| a.contains("Optimal temperature conditions")));
    }

    #[test]
    fn rain_skip_advice_is_independent_of_priority() {
        // Heavy rain in the window plus critical frost: priority stays urgent
        // while the rain advice is still appended.
        let mut window = vec![reading(-3.0, 60.0, 5.0); 8];
        for m in window.iter_mut() {
            m.precipitation = 1.0;
        }
        let advisory = build_advisory(location(), &reading(4.0, 60.0, 5.0), &window);
        assert_eq!(advisory.priority, Priority::Urgent);
        assert!(advisory
            .general_advice
            .iter()
            .any(|a| a.contains("skip scheduled irrigation")));
    }

    #[test]
    fn spraying_advice_always_present() {
        let window = vec![reading(12.0, 60.0, 5.0); 8];
        let advisory = build_advisory(location(), &reading(18.0, 65.0, 25.0), &window);
        assert!(advisory
            .general_advice
            .iter()
            .any(|a| a.contains("spraying")));
    }
}
