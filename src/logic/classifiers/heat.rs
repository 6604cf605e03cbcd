use crate::models::{HeatStressAlert, HeatStressLevel, Measurement};

pub fn classify(current: &Measurement, forecast: &[Measurement]) -> HeatStressAlert {
    let t = current.temperature;
    let h = current.humidity;

    // Ordered tier table, most severe first.
    let tiers = [
        (t > 40.0 || (t > 35.0 && h > 70.0), HeatStressLevel::Extreme),
        (t > 35.0 || (t > 30.0 && h > 80.0), HeatStressLevel::High),
        (t > 30.0 || (t > 25.0 && h > 85.0), HeatStressLevel::Moderate),
        (t > 25.0, HeatStressLevel::Low),
    ];

    let level = tiers
        .into_iter()
        .find_map(|(hit, level)| hit.then_some(level))
        .unwrap_or(HeatStressLevel::None);

    // 3 hours per forecast sample above 30°C.
    let expected_duration_hours =
        3 * forecast.iter().filter(|m| m.temperature > 30.0).count() as u32;

    let (message, action) = match level {
        HeatStressLevel::Extreme => (
            format!(
                "Extreme heat stress at {:.0}°C and {:.0}% humidity. Crop damage likely.",
                t, h
            ),
            "Irrigate to cool the canopy, provide shade where possible, and suspend field work.",
        ),
        HeatStressLevel::High => (
            format!("High heat stress at {:.0}°C and {:.0}% humidity.", t, h),
            "Increase irrigation frequency and avoid midday operations.",
        ),
        HeatStressLevel::Moderate => (
            format!("Moderate heat stress at {:.0}°C and {:.0}% humidity.", t, h),
            "Watch sensitive crops and keep soil moisture up.",
        ),
        HeatStressLevel::Low => (
            format!("Warm conditions at {:.0}°C.", t),
            "No special measures needed; maintain normal irrigation.",
        ),
        HeatStressLevel::None => (
            "No heat stress at current conditions.".to_string(),
            "No action needed.",
        ),
    };

    HeatStressAlert {
        level,
        message,
        action: action.to_string(),
        temperature: t,
        humidity: h,
        expected_duration_hours,
    }
}
