//! Error handling for the Farmkeep server
//!
//! Every failure leaves the API as `{"error": {"code", "message", "fields"?}}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::{FormErrors, UnknownSelector};
use thiserror::Error;

use crate::store::StoreError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    /// Field-keyed form errors, raised before a write reaches the store
    #[error("Validation error: {0}")]
    Validation(FormErrors),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Weather data unavailable")]
    WeatherUnavailable,

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => AppError::NotFound(err.to_string()),
            StoreError::NoWeatherData => AppError::WeatherUnavailable,
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<FormErrors> for AppError {
    fn from(errors: FormErrors) -> Self {
        AppError::Validation(errors)
    }
}

impl From<UnknownSelector> for AppError {
    fn from(err: UnknownSelector) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FormErrors>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = match &self {
            AppError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message: message.clone(),
                    fields: None,
                },
            ),
            AppError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: "Please fix the highlighted fields".to_string(),
                    fields: Some(errors.clone()),
                },
            ),
            AppError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "BAD_REQUEST".to_string(),
                    message: message.clone(),
                    fields: None,
                },
            ),
            AppError::WeatherUnavailable => (
                StatusCode::SERVICE_UNAVAILABLE,
                ErrorDetail {
                    code: "WEATHER_UNAVAILABLE".to_string(),
                    message: "Weather data is not available".to_string(),
                    fields: None,
                },
            ),
            AppError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "INTERNAL_ERROR".to_string(),
                    message: "An internal server error occurred".to_string(),
                    fields: None,
                },
            ),
        };

        match &self {
            AppError::NotFound(_) => tracing::warn!("{}", self),
            _ if status.is_server_error() => tracing::error!("Error: {:?}", self),
            _ => tracing::debug!("Request rejected: {}", self),
        }

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
