//! Error handling for the user service.
//!
//! Two layers, converted in one place:
//!
//! 1. **Internal (`ServiceError`)**: infrastructure failures inside the
//!    store/pool/configuration, with context for logging.
//! 2. **Public (`ApiError`)**: the JSON error contract of the HTTP surface.
//!
//! Validation problems are deliberately NOT errors at this level: they travel
//! as accumulated field errors inside the registration disposition (see
//! `handlers::register_logic`) and never abort a request.

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use thiserror::Error;

/// Internal service failures. These map to HTTP 500 and are never produced
/// by invalid user input.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("database error: {0}")]
    Database(String),

    #[error("connection pool error: {0}")]
    Pool(String),

    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ServiceError {
    pub fn database(msg: impl Into<String>) -> Self {
        ServiceError::Database(msg.into())
    }

    pub fn pool(msg: impl Into<String>) -> Self {
        ServiceError::Pool(msg.into())
    }

    pub fn configuration(msg: impl Into<String>) -> Self {
        ServiceError::Configuration(msg.into())
    }
}

/// API error response structure.
///
/// Serialized as `{"status": ..., "message": ...}` with the HTTP status code
/// derived from the `status` identifier.
#[derive(Debug, Serialize)]
pub struct ApiError {
    /// Machine-readable error status (e.g. "not_found").
    pub status: String,
    /// Human-readable error message.
    pub message: String,
}

impl ApiError {
    /// Creates a not found error for a missing resource.
    pub fn not_found(resource: &str) -> Self {
        ApiError {
            status: "not_found".to_string(),
            message: format!("{} not found", resource),
        }
    }

    /// Creates an internal server error.
    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError {
            status: "internal_error".to_string(),
            message: msg.into(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        tracing::error!(error = %err, "request failed with service error");
        ApiError::internal(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.status.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}
