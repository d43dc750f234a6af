// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// No token triple has been stored yet; the OAuth consent flow must run first.
    #[error("Not connected to Strava")]
    NotAuthenticated,

    /// A token triple is already stored; it must be disconnected before another consent.
    #[error("Already connected to Strava")]
    AlreadyConnected,

    #[error("Authentication required")]
    Unauthorized,

    /// The authorization server rejected a code exchange or refresh.
    #[error("Strava authentication failed: {0}")]
    AuthenticationFailure(String),

    /// A page of the activity listing could not be fetched.
    #[error("Strava API error: {0}")]
    RemoteFetch(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Message used when Strava answers 429.
    pub const STRAVA_RATE_LIMIT: &'static str = "Strava rate limit exceeded";
    /// Message used when Strava rejects the bearer token.
    pub const STRAVA_TOKEN_ERROR: &'static str = "Strava rejected the access token";

    /// True if this error came from Strava throttling us.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, AppError::RemoteFetch(msg) if msg == Self::STRAVA_RATE_LIMIT)
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::NotAuthenticated => (
                StatusCode::CONFLICT,
                "not_connected",
                Some("Connect a Strava account before syncing".to_string()),
            ),
            AppError::AlreadyConnected => (
                StatusCode::CONFLICT,
                "already_connected",
                Some("Disconnect the current Strava account first".to_string()),
            ),
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, "unauthorized", None),
            AppError::AuthenticationFailure(msg) => (
                StatusCode::BAD_GATEWAY,
                "authentication_failed",
                Some(msg.clone()),
            ),
            AppError::RemoteFetch(msg) => {
                (StatusCode::BAD_GATEWAY, "strava_error", Some(msg.clone()))
            }
            AppError::Storage(msg) => {
                tracing::error!(error = %msg, "Storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None)
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", None)
            }
        };

        let body = ErrorResponse {
            error: error.to_string(),
            details,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
