use crate::config::OpenWeatherMapConfig;
use crate::error::{CropcastError, Result};
use crate::models::{Measurement, WeatherCondition};
use chrono::{DateTime, Utc};
use serde::Deserialize;

/// Provider wind speeds arrive in m/s with `units=metric`; measurements
/// carry km/h.
const MPS_TO_KMH: f64 = 3.6;

pub struct OpenWeatherMapClient {
    client: reqwest::Client,
    config: OpenWeatherMapConfig,
}

// OpenWeatherMap API response structures. The current, forecast, and
// historical endpoints share the per-sample shape apart from optional
// blocks, so one raw struct covers all three. Required numeric fields are
// optional here so absence is reported as a malformed sample instead of
// being silently defaulted.
#[derive(Debug, Deserialize)]
struct OwmListResponse {
    #[serde(default)]
    list: Vec<OwmSample>,
}

#[derive(Debug, Deserialize)]
struct OwmSample {
    dt: i64,
    main: Option<OwmMain>,
    #[serde(default)]
    weather: Vec<OwmWeather>,
    wind: Option<OwmWind>,
    #[serde(default)]
    rain: Option<OwmPrecipitation>,
    #[serde(default)]
    snow: Option<OwmPrecipitation>,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: Option<f64>,
    humidity: Option<f64>,
    pressure: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmWeather {
    main: String,
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwmWind {
    speed: Option<f64>,
    #[serde(default)]
    deg: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwmPrecipitation {
    #[serde(rename = "3h", default)]
    three_hour: Option<f64>,
    #[serde(rename = "1h", default)]
    one_hour: Option<f64>,
}

impl OwmPrecipitation {
    fn amount(&self) -> f64 {
        self.three_hour.or(self.one_hour).unwrap_or(0.0)
    }
}

impl OpenWeatherMapClient {
    pub fn new(config: OpenWeatherMapConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch current conditions as a single normalized measurement.
    pub async fn fetch_current(&self, lat: f64, lon: f64) -> Result<Measurement> {
        let url = format!(
            "{}/weather?lat={}&lon={}&appid={}&units=metric",
            self.config.base_url, lat, lon, self.config.api_key
        );
        let sample: OwmSample = self.get_json(&url).await?;
        normalize_sample(&sample)
    }

    /// Fetch the 5-day/3-hour forecast. One malformed sample fails the whole
    /// batch; the orchestration layer decides what that means for the request.
    pub async fn fetch_forecast(&self, lat: f64, lon: f64) -> Result<Vec<Measurement>> {
        let url = format!(
            "{}/forecast?lat={}&lon={}&appid={}&units=metric",
            self.config.base_url, lat, lon, self.config.api_key
        );
        let response: OwmListResponse = self.get_json(&url).await?;
        response.list.iter().map(normalize_sample).collect()
    }

    /// Fetch hourly historical samples for a UTC time range.
    pub async fn fetch_historical(
        &self,
        lat: f64,
        lon: f64,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Measurement>> {
        let url = format!(
            "{}/history/city?lat={}&lon={}&type=hour&start={}&end={}&appid={}&units=metric",
            self.config.base_url,
            lat,
            lon,
            start.timestamp(),
            end.timestamp(),
            self.config.api_key
        );
        let response: OwmListResponse = self.get_json(&url).await?;
        response.list.iter().map(normalize_sample).collect()
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CropcastError::ProviderUnavailable(format!("OpenWeatherMap: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(CropcastError::ProviderUnavailable(format!(
                "OpenWeatherMap returned {}",
                status
            )));
        }

        response.json::<T>().await.map_err(|e| {
            CropcastError::MalformedSample(format!(
                "failed to decode OpenWeatherMap payload: {}",
                e
            ))
        })
    }
}

/// Canonicalize one provider sample. Missing precipitation or wind direction
/// defaults to 0; missing required numeric fields are an error.
fn normalize_sample(sample: &OwmSample) -> Result<Measurement> {
    let main = sample
        .main
        .as_ref()
        .ok_or_else(|| missing_field("main", sample.dt))?;
    let temperature = main.temp.ok_or_else(|| missing_field("main.temp", sample.dt))?;
    let humidity = main
        .humidity
        .ok_or_else(|| missing_field("main.humidity", sample.dt))?;
    let pressure = main
        .pressure
        .ok_or_else(|| missing_field("main.pressure", sample.dt))?;

    let wind = sample
        .wind
        .as_ref()
        .ok_or_else(|| missing_field("wind", sample.dt))?;
    let wind_speed = wind
        .speed
        .ok_or_else(|| missing_field("wind.speed", sample.dt))?
        * MPS_TO_KMH;
    let wind_direction = wind.deg.unwrap_or(0.0);

    let timestamp = DateTime::from_timestamp(sample.dt, 0).ok_or_else(|| {
        CropcastError::MalformedSample(format!("out-of-range timestamp {}", sample.dt))
    })?;

    let precipitation = sample.rain.as_ref().map(OwmPrecipitation::amount).unwrap_or(0.0)
        + sample.snow.as_ref().map(OwmPrecipitation::amount).unwrap_or(0.0);

    let condition = sample
        .weather
        .first()
        .map(|w| WeatherCondition {
            main: w.main.clone(),
            description: w.description.clone(),
            icon: w.icon.clone(),
        })
        .unwrap_or_default();

    Ok(Measurement {
        timestamp,
        // UTC date component, a fixed simplification
        date: timestamp.date_naive(),
        temperature,
        humidity,
        pressure,
        wind_speed,
        wind_direction,
        precipitation,
        condition,
    })
}

fn missing_field(field: &str, dt: i64) -> CropcastError {
    CropcastError::MalformedSample(format!(
        "sample at dt={} is missing required field {}",
        dt, field
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_from(value: serde_json::Value) -> OwmSample {
        serde_json::from_value(value).unwrap()
    }

    fn full_sample() -> serde_json::Value {
        json!({
            "dt": 1750000000,
            "main": { "temp": 24.5, "humidity": 58.0, "pressure": 1012.0 },
            "weather": [{ "main": "Clouds", "description": "scattered clouds", "icon": "03d" }],
            "wind": { "speed": 4.0, "deg": 220.0 },
            "rain": { "3h": 1.2 }
        })
    }

    #[test]
    fn normalizes_a_complete_sample() {
        let m = normalize_sample(&sample_from(full_sample())).unwrap();
        assert_eq!(m.temperature, 24.5);
        assert_eq!(m.humidity, 58.0);
        assert_eq!(m.pressure, 1012.0);
        assert_eq!(m.wind_speed, 4.0 * 3.6);
        assert_eq!(m.wind_direction, 220.0);
        assert_eq!(m.precipitation, 1.2);
        assert_eq!(m.condition.main, "Clouds");
        assert_eq!(m.timestamp.timestamp(), 1750000000);
        assert_eq!(m.date, m.timestamp.date_naive());
    }

    #[test]
    fn missing_precipitation_defaults_to_zero() {
        let mut value = full_sample();
        value.as_object_mut().unwrap().remove("rain");
        let m = normalize_sample(&sample_from(value)).unwrap();
        assert_eq!(m.precipitation, 0.0);
    }

    #[test]
    fn missing_wind_direction_defaults_to_zero() {
        let value = json!({
            "dt": 1750000000,
            "main": { "temp": 24.5, "humidity": 58.0, "pressure": 1012.0 },
            "wind": { "speed": 4.0 }
        });
        let m = normalize_sample(&sample_from(value)).unwrap();
        assert_eq!(m.wind_direction, 0.0);
    }

    #[test]
    fn rain_and_snow_amounts_are_combined() {
        let value = json!({
            "dt": 1750000000,
            "main": { "temp": 1.0, "humidity": 90.0, "pressure": 1000.0 },
            "wind": { "speed": 2.0 },
            "rain": { "3h": 0.5 },
            "snow": { "3h": 1.5 }
        });
        let m = normalize_sample(&sample_from(value)).unwrap();
        assert_eq!(m.precipitation, 2.0);
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let value = json!({
            "dt": 1750000000,
            "main": { "temp": 24.5, "pressure": 1012.0 },
            "wind": { "speed": 4.0 }
        });
        let err = normalize_sample(&sample_from(value)).unwrap_err();
        assert!(matches!(err, CropcastError::MalformedSample(_)));
        assert!(err.to_string().contains("main.humidity"));
    }

    #[test]
    fn missing_wind_block_is_rejected() {
        let value = json!({
            "dt": 1750000000,
            "main": { "temp": 24.5, "humidity": 58.0, "pressure": 1012.0 }
        });
        let err = normalize_sample(&sample_from(value)).unwrap_err();
        assert!(matches!(err, CropcastError::MalformedSample(_)));
    }

    #[test]
    fn one_hour_rain_used_when_three_hour_absent() {
        let value = json!({
            "dt": 1750000000,
            "main": { "temp": 24.5, "humidity": 58.0, "pressure": 1012.0 },
            "wind": { "speed": 4.0 },
            "rain": { "1h": 0.7 }
        });
        let m = normalize_sample(&sample_from(value)).unwrap();
        assert_eq!(m.precipitation, 0.7);
    }
}
