use super::{ApiResponse, AppState};
use crate::error::{CropcastError, Result};
use crate::logic::{aggregation, calculations, classifiers};
use crate::models::{
    AgronomicIndices, CropAdvisory, DailyAggregate, Location, MarketPrice, Measurement,
};
use axum::extract::{Query, State};
use axum::Json;
use chrono::{Duration, NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub lat: f64,
    pub lon: f64,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

#[derive(Debug, Serialize)]
pub struct ForecastPayload {
    pub hourly: Vec<Measurement>,
    pub daily: Vec<DailyAggregate>,
}

#[derive(Debug, Serialize)]
pub struct HistoryPayload {
    pub daily: Vec<DailyAggregate>,
    /// GDD accumulated over the requested window, from daily averages.
    pub cumulative_gdd: f64,
}

#[derive(Debug, Serialize)]
pub struct InsightsPayload {
    pub current: Measurement,
    pub indices: AgronomicIndices,
    pub daily: Vec<DailyAggregate>,
}

pub async fn health() -> Json<ApiResponse<&'static str>> {
    Json(ApiResponse::success("ok"))
}

pub async fn current_weather(
    State(state): State<AppState>,
    Query(q): Query<Coordinates>,
) -> Result<Json<ApiResponse<Measurement>>> {
    let current = state.weather.fetch_current(q.lat, q.lon).await?;
    Ok(Json(ApiResponse::success(current)))
}

pub async fn forecast(
    State(state): State<AppState>,
    Query(q): Query<Coordinates>,
) -> Result<Json<ApiResponse<ForecastPayload>>> {
    let hourly = state.weather.fetch_forecast(q.lat, q.lon).await?;
    let daily = aggregation::aggregate_by_day(&hourly);
    Ok(Json(ApiResponse::success(ForecastPayload { hourly, daily })))
}

pub async fn history(
    State(state): State<AppState>,
    Query(q): Query<HistoryQuery>,
) -> Result<Json<ApiResponse<HistoryPayload>>> {
    if q.end < q.start {
        return Err(CropcastError::InvalidData(format!(
            "end date {} precedes start date {}",
            q.end, q.start
        )));
    }

    let start = q.start.and_time(NaiveTime::MIN).and_utc();
    let end = q.end.and_time(NaiveTime::MIN).and_utc() + Duration::days(1);

    let samples = state.weather.fetch_historical(q.lat, q.lon, start, end).await?;
    let daily = aggregation::aggregate_by_day(&samples);
    let cumulative_gdd = calculations::cumulative_gdd(&daily, state.base_temp_c);

    Ok(Json(ApiResponse::success(HistoryPayload {
        daily,
        cumulative_gdd,
    })))
}

pub async fn insights(
    State(state): State<AppState>,
    Query(q): Query<Coordinates>,
) -> Result<Json<ApiResponse<InsightsPayload>>> {
    let (current, hourly) = fetch_current_and_forecast(&state, q.lat, q.lon).await?;
    let daily = aggregation::aggregate_by_day(&hourly);
    let indices = calculations::derive_indices(&current, &daily, state.base_temp_c);

    Ok(Json(ApiResponse::success(InsightsPayload {
        current,
        indices,
        daily,
    })))
}

pub async fn advisory(
    State(state): State<AppState>,
    Query(q): Query<Coordinates>,
) -> Result<Json<ApiResponse<CropAdvisory>>> {
    let (current, hourly) = fetch_current_and_forecast(&state, q.lat, q.lon).await?;
    let location = Location {
        latitude: q.lat,
        longitude: q.lon,
    };
    let advisory = classifiers::build_advisory(location, &current, &hourly);
    Ok(Json(ApiResponse::success(advisory)))
}

pub async fn market_prices(
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<MarketPrice>>> {
    let prices = state.market_prices.read().await.clone();
    Json(ApiResponse::success(prices))
}

/// Both upstream legs run concurrently; either failure fails the whole
/// request. Partial advisories are never produced.
async fn fetch_current_and_forecast(
    state: &AppState,
    lat: f64,
    lon: f64,
) -> Result<(Measurement, Vec<Measurement>)> {
    tokio::try_join!(
        state.weather.fetch_current(lat, lon),
        state.weather.fetch_forecast(lat, lon)
    )
    .map_err(|e| CropcastError::IncompleteUpstreamData(e.to_string()))
}
