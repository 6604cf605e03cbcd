use crate::models::{IrrigationAlert, IrrigationUrgency, Measurement};

/// Samples inspected for upcoming rain (~48h at 3-hour resolution).
const RAIN_WINDOW: usize = 16;

/// Cumulative rainfall above which irrigation is skipped outright.
const RAIN_SKIP_MM: f64 = 5.0;

pub fn classify(current: &Measurement, window: &[Measurement]) -> IrrigationAlert {
    let expected_rain_mm: f64 = window
        .iter()
        .take(RAIN_WINDOW)
        .map(|m| m.precipitation)
        .sum();

    let temperature = current.temperature;
    let humidity = current.humidity;

    // Rain pre-empts the water-stress logic entirely.
    if expected_rain_mm > RAIN_SKIP_MM {
        return IrrigationAlert {
            recommendation: IrrigationUrgency::Skip,
            message: format!(
                "{:.1}mm of rain expected within 48 hours.",
                expected_rain_mm
            ),
            action: "Skip irrigation and let the rain do the work.".to_string(),
            expected_rain_mm,
            temperature,
            humidity,
        };
    }

    // Water-stress tiers, most urgent first.
    let tiers = [
        (
            temperature > 35.0 && humidity < 35.0,
            IrrigationUrgency::Immediate,
        ),
        (
            temperature > 30.0 && humidity < 40.0,
            IrrigationUrgency::Within24h,
        ),
        (
            temperature > 25.0 && humidity < 50.0,
            IrrigationUrgency::Within48h,
        ),
    ];

    let recommendation = tiers
        .into_iter()
        .find_map(|(hit, urgency)| hit.then_some(urgency))
        .unwrap_or(IrrigationUrgency::Monitor);

    let (message, action) = match recommendation {
        IrrigationUrgency::Immediate => (
            format!(
                "Extreme water stress: {:.0}°C with {:.0}% humidity and no rain expected.",
                temperature, humidity
            ),
            "Irrigate immediately, preferably in the early morning or evening.",
        ),
        IrrigationUrgency::Within24h => (
            format!(
                "High water stress: {:.0}°C with {:.0}% humidity.",
                temperature, humidity
            ),
            "Irrigate within the next 24 hours.",
        ),
        IrrigationUrgency::Within48h => (
            format!(
                "Moderate water stress building at {:.0}°C and {:.0}% humidity.",
                temperature, humidity
            ),
            "Plan irrigation within the next 48 hours.",
        ),
        _ => (
            "No significant water stress at current conditions.".to_string(),
            "Monitor soil moisture and recheck with the next forecast.",
        ),
    };

    IrrigationAlert {
        recommendation,
        message,
        action: action.to_string(),
        expected_rain_mm,
        temperature,
        humidity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::WeatherCondition;
    use chrono::{TimeZone, Utc};

    fn reading(temp: f64, humidity: f64, precipitation: f64) -> Measurement {
        let timestamp = Utc.with_ymd_and_hms(2025, 7, 1, 12, 0, 0).unwrap();
        Measurement {
            timestamp,
            date: timestamp.date_naive(),
            temperature: temp,
            humidity,
            pressure: 1010.0,
            wind_speed: 8.0,
            wind_direction: 0.0,
            precipitation,
            condition: WeatherCondition::default(),
        }
    }

    #[test]
    fn rain_preempts_extreme_water_stress() {
        // 16 samples at 0.4mm each = 6.4mm > 5mm
        let window: Vec<_> = (0..16).map(|_| reading(20.0, 80.0, 0.4)).collect();
        let alert = classify(&reading(42.0, 10.0, 0.0), &window);
        assert_eq!(alert.recommendation, IrrigationUrgency::Skip);
        assert!((alert.expected_rain_mm - 6.4).abs() < 1e-9);
    }

    #[test]
    fn rain_beyond_the_window_does_not_count() {
        // 16 dry samples, then heavy rain on the 17th
        let mut window: Vec<_> = (0..16).map(|_| reading(20.0, 80.0, 0.0)).collect();
        window.push(reading(20.0, 80.0, 50.0));
        let alert = classify(&reading(36.0, 30.0, 0.0), &window);
        assert_eq!(alert.recommendation, IrrigationUrgency::Immediate);
    }

    #[test]
    fn stress_tiers_in_strict_order() {
        let dry: Vec<Measurement> = Vec::new();
        let cases = [
            (36.0, 30.0, IrrigationUrgency::Immediate),
            (31.0, 38.0, IrrigationUrgency::Within24h),
            (26.0, 45.0, IrrigationUrgency::Within48h),
            (22.0, 45.0, IrrigationUrgency::Monitor),
        ];
        for (temp, humidity, expected) in cases {
            let alert = classify(&reading(temp, humidity, 0.0), &dry);
            assert_eq!(alert.recommendation, expected, "{}°C {}%", temp, humidity);
        }
    }

    #[test]
    fn a_day_satisfying_multiple_tiers_gets_the_most_urgent() {
        // 36/30 satisfies all three stress predicates
        let alert = classify(&reading(36.0, 30.0, 0.0), &[]);
        assert_eq!(alert.recommendation, IrrigationUrgency::Immediate);
    }

    #[test]
    fn humid_heat_falls_through_to_monitor() {
        let alert = classify(&reading(38.0, 75.0, 0.0), &[]);
        assert_eq!(alert.recommendation, IrrigationUrgency::Monitor);
    }
}
