pub mod handlers;

use crate::datasources::OpenWeatherMapClient;
use crate::models::MarketPrice;
use axum::{routing::get, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers. The market cache is the only
/// mutable slot; everything downstream of a fetch is a pure computation.
#[derive(Clone)]
pub struct AppState {
    pub weather: Arc<OpenWeatherMapClient>,
    pub market_prices: Arc<RwLock<Vec<MarketPrice>>>,
    pub base_temp_c: f64,
}

/// Uniform response envelope for every endpoint.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now(),
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            timestamp: Utc::now(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api_routes())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/weather/current", get(handlers::current_weather))
        .route("/weather/forecast", get(handlers::forecast))
        .route("/weather/history", get(handlers::history))
        .route("/insights", get(handlers::insights))
        .route("/advisory", get(handlers::advisory))
        .route("/market/prices", get(handlers::market_prices))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_envelope_shape() {
        let envelope = ApiResponse::success(42);
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["data"], 42);
        assert!(value.get("error").is_none());
        assert!(value.get("timestamp").is_some());
    }

    #[test]
    fn failure_envelope_shape() {
        let envelope = ApiResponse::<()>::failure("provider unavailable");
        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "provider unavailable");
        assert!(value.get("data").is_none());
    }
}
