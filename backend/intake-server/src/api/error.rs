//! REST API error types
//!
//! Every variant maps to exactly one HTTP status and renders the uniform
//! `{"error": "<message>"}` body. Client-facing messages stay generic:
//! a denied caller learns nothing about which permission was missing.

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad request (400)
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },

    /// Missing or invalid credentials (401)
    #[error("Unauthorized: {detail} {location}")]
    Unauthorized {
        /// Logged, never sent to the caller
        detail: String,
        location: ErrorLocation,
    },

    /// Authenticated but not permitted (403)
    #[error("Forbidden {location}")]
    Forbidden { location: ErrorLocation },

    /// Resource not found (404)
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// Internal server error (500)
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Log with location for debugging; the response body stays generic
        log::debug!("{}", self);

        let (status, message) = match self {
            ApiError::BadRequest { message, .. } => (StatusCode::BAD_REQUEST, message),
            ApiError::Unauthorized { .. } => (
                StatusCode::UNAUTHORIZED,
                "Authentication required".to_string(),
            ),
            ApiError::Forbidden { .. } => (StatusCode::FORBIDDEN, "Access denied".to_string()),
            ApiError::NotFound { message, .. } => (StatusCode::NOT_FOUND, message),
            ApiError::Internal { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };

        (status, Json(ApiErrorResponse { error: message })).into_response()
    }
}

/// Convert auth errors into the generic 401
impl From<intake_auth::AuthError> for ApiError {
    #[track_caller]
    fn from(e: intake_auth::AuthError) -> Self {
        ApiError::Unauthorized {
            detail: e.to_string(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
