use super::round2;
use crate::models::{DailyAggregate, Measurement, TemperatureSummary};
use chrono::NaiveDate;
use std::collections::HashMap;

/// Group measurements by calendar date and reduce each group to a daily
/// summary, ordered by ascending date. Empty input yields an empty output.
/// Insertion order within a group is preserved, which equals chronological
/// order since provider samples arrive time-ordered; the median-indexed
/// condition is therefore the temporally central one. Missing hours are not
/// interpolated, only present samples contribute.
pub fn aggregate_by_day(samples: &[Measurement]) -> Vec<DailyAggregate> {
    let mut by_date: HashMap<NaiveDate, Vec<&Measurement>> = HashMap::new();
    for sample in samples {
        by_date.entry(sample.date).or_default().push(sample);
    }

    let mut days: Vec<DailyAggregate> = by_date
        .into_iter()
        .map(|(date, group)| aggregate_day(date, &group))
        .collect();

    days.sort_by_key(|d| d.date);
    days
}

fn aggregate_day(date: NaiveDate, group: &[&Measurement]) -> DailyAggregate {
    let count = group.len() as f64;

    let min = group
        .iter()
        .map(|m| m.temperature)
        .min_by(|a, b| a.partial_cmp(b).unwrap())
        .unwrap_or(0.0);

    let max = group
        .iter()
        .map(|m| m.temperature)
        .max_by(|a, b| a.partial_cmp(b).unwrap())
        .unwrap_or(0.0);

    let average = group.iter().map(|m| m.temperature).sum::<f64>() / count;

    let humidity = (group.iter().map(|m| m.humidity).sum::<f64>() / count).round() as i64;
    let pressure = (group.iter().map(|m| m.pressure).sum::<f64>() / count).round() as i64;
    let wind_speed = round2(group.iter().map(|m| m.wind_speed).sum::<f64>() / count);
    let precipitation = round2(group.iter().map(|m| m.precipitation).sum::<f64>());

    let condition = group[group.len() / 2].condition.clone();

    DailyAggregate {
        date,
        temperature: TemperatureSummary { min, max, average },
        humidity,
        pressure,
        wind_speed,
        precipitation,
        condition,
    }
}
