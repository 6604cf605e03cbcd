use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CropcastError {
    #[error("Malformed provider sample: {0}")]
    MalformedSample(String),

    #[error("Incomplete upstream data: {0}")]
    IncompleteUpstreamData(String),

    #[error("Provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, CropcastError>;

/// Every error leaving a handler becomes a `{success: false, error, timestamp}`
/// envelope; nothing propagates past the routing layer uncaught.
impl IntoResponse for CropcastError {
    fn into_response(self) -> Response {
        let status = match &self {
            CropcastError::ProviderUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            CropcastError::MalformedSample(_) | CropcastError::IncompleteUpstreamData(_) => {
                StatusCode::BAD_GATEWAY
            }
            CropcastError::InvalidData(_) => StatusCode::BAD_REQUEST,
            CropcastError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = crate::api::ApiResponse::<()>::failure(self.to_string());
        (status, Json(body)).into_response()
    }
}
