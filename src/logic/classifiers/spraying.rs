use crate::models::{Measurement, SprayingAlert};
use chrono::Timelike;

/// Samples inspected for a spraying window (~24h at 3-hour resolution).
const SPRAY_WINDOW: usize = 8;

fn good_window(m: &Measurement) -> bool {
    m.wind_speed < 15.0
        && m.precipitation <= 0.0
        && m.temperature > 10.0
        && m.temperature < 30.0
}

/// Offset i within the window is 3·(i+1) hours ahead: the first forecast
/// sample sits one interval out.
fn hours_ahead(offset: usize) -> u32 {
    3 * (offset as u32 + 1)
}

pub fn classify(current: &Measurement, window: &[Measurement]) -> SprayingAlert {
    let window = &window[..window.len().min(SPRAY_WINDOW)];
    let next_good = window.iter().position(good_window);
    let wind_speed = current.wind_speed;

    if wind_speed > 20.0 {
        let next_window_hours = next_good.map(hours_ahead);
        let message = match next_window_hours {
            Some(h) => format!(
                "Wind too strong for spraying ({:.0} km/h). Next calm window in about {} hours.",
                wind_speed, h
            ),
            None => format!(
                "Wind too strong for spraying ({:.0} km/h), with no calm window in the next 24 hours.",
                wind_speed
            ),
        };
        return SprayingAlert {
            suitable: false,
            message,
            action: "Postpone spraying until the wind drops below 15 km/h.".to_string(),
            best_time: None,
            next_window_hours,
            wind_speed,
        };
    }

    if current.temperature > 30.0 {
        return SprayingAlert {
            suitable: false,
            message: format!(
                "Too hot for spraying ({:.0}°C); evaporation and drift losses are high.",
                current.temperature
            ),
            action: "Wait for temperatures below 30°C before spraying.".to_string(),
            best_time: None,
            next_window_hours: None,
            wind_speed,
        };
    }

    match next_good {
        Some(offset) => {
            let current_hour = current.timestamp.hour();
            let early_morning = window
                .iter()
                .enumerate()
                .filter(|(_, m)| good_window(m))
                .any(|(i, _)| {
                    let hour = (current_hour + hours_ahead(i)) % 24;
                    (6..=10).contains(&hour)
                });

            SprayingAlert {
                suitable: true,
                message: "Conditions suitable for spraying within the next 24 hours.".to_string(),
                action: "Apply treatments during the identified window; avoid the midday heat."
                    .to_string(),
                best_time: early_morning.then(|| "early morning".to_string()),
                next_window_hours: Some(hours_ahead(offset)),
                wind_speed,
            }
        }
        None => SprayingAlert {
            suitable: false,
            message: "No suitable spraying window in the next 24 hours.".to_string(),
            action: "Recheck conditions in 12 hours.".to_string(),
            best_time: None,
            next_window_hours: None,
            wind_speed,
        },
    }
}
