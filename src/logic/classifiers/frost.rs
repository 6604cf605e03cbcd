use crate::models::{FrostAlert, FrostRisk, Measurement};

/// Samples inspected for the overnight minimum (~24h at 3-hour resolution).
const FROST_WINDOW: usize = 8;

/// Ordered tier table, ascending strictness. The first threshold the window
/// minimum does not exceed wins; anything above 5°C is no risk.
const TIERS: [(f64, FrostRisk); 4] = [
    (-2.0, FrostRisk::Critical),
    (0.0, FrostRisk::High),
    (2.0, FrostRisk::Moderate),
    (5.0, FrostRisk::Low),
];

pub fn classify(current: &Measurement, window: &[Measurement]) -> FrostAlert {
    let min_temperature = window
        .iter()
        .take(FROST_WINDOW)
        .map(|m| m.temperature)
        .min_by(|a, b| a.partial_cmp(b).unwrap())
        .unwrap_or(current.temperature);

    let risk = TIERS
        .iter()
        .find(|(threshold, _)| min_temperature <= *threshold)
        .map(|(_, risk)| *risk)
        .unwrap_or(FrostRisk::None);

    let (message, action) = match risk {
        FrostRisk::Critical => (
            format!(
                "Severe frost expected, temperatures down to {:.1}°C. Crops at high risk of damage.",
                min_temperature
            ),
            "Deploy frost protection now: covers, wind machines, or overhead irrigation.",
        ),
        FrostRisk::High => (
            format!("Frost likely, minimum around {:.1}°C.", min_temperature),
            "Prepare frost covers and irrigate soil in the afternoon to retain heat.",
        ),
        FrostRisk::Moderate => (
            format!("Temperatures near freezing expected ({:.1}°C).", min_temperature),
            "Monitor sensitive crops and have covers ready.",
        ),
        FrostRisk::Low => (
            format!("Cool night ahead, minimum around {:.1}°C.", min_temperature),
            "No action needed for hardy crops; watch low-lying frost pockets.",
        ),
        FrostRisk::None => (
            "No frost risk in the forecast window.".to_string(),
            "No action needed.",
        ),
    };

    FrostAlert {
        risk,
        message,
        action: action.to_string(),
        timeframe: "next 24 hours".to_string(),
        min_temperature,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeatherCondition;
    use chrono::{TimeZone, Utc};

    fn reading(temp: f64) -> Measurement {
        let timestamp = Utc.with_ymd_and_hms(2025, 1, 10, 18, 0, 0).unwrap();
        Measurement {
            timestamp,
            date: timestamp.date_naive(),
            temperature: temp,
            humidity: 60.0,
            pressure: 1013.0,
            wind_speed: 5.0,
            wind_direction: 0.0,
            precipitation: 0.0,
            condition: WeatherCondition::default(),
        }
    }

    fn window(temps: &[f64]) -> Vec<Measurement> {
        temps.iter().map(|&t| reading(t)).collect()
    }

    #[test]
    fn tier_thresholds_are_closed_at_the_upper_bound() {
        let current = reading(10.0);
        let cases = [
            (-3.0, FrostRisk::Critical),
            (-2.0, FrostRisk::Critical),
            (-1.0, FrostRisk::High),
            (0.0, FrostRisk::High),
            (1.0, FrostRisk::Moderate),
            (2.0, FrostRisk::Moderate),
            (4.0, FrostRisk::Low),
            (5.0, FrostRisk::Low),
            (5.1, FrostRisk::None),
        ];
        for (min, expected) in cases {
            let alert = classify(&current, &window(&[8.0, min, 9.0]));
            assert_eq!(alert.risk, expected, "min {}", min);
            assert_eq!(alert.min_temperature, min);
        }
    }

    #[test]
    fn only_first_eight_samples_are_inspected() {
        let mut temps = vec![10.0; 8];
        temps.push(-10.0); // 9th sample, outside the window
        let alert = classify(&reading(10.0), &window(&temps));
        assert_eq!(alert.risk, FrostRisk::None);
    }

    #[test]
    fn empty_window_falls_back_to_current_temperature() {
        let alert = classify(&reading(-4.0), &[]);
        assert_eq!(alert.risk, FrostRisk::Critical);
        assert_eq!(alert.min_temperature, -4.0);
    }
}
