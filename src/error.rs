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
    /// Missing credentials on an authenticated route
    #[error("unauthorized access")]
    Unauthorized,

    /// Bad signature, malformed token or expired token
    #[error("Unauthorized token")]
    InvalidToken,

    /// Authenticated, but the caller lacks the admin role
    #[error("forbidden access")]
    Forbidden,

    /// Authenticated, but the caller does not own the requested resource
    #[error("Forbidden access")]
    NotOwner,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Stripe API error: {0}")]
    Gateway(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

/// JSON error response body: `{error: true, message}`.
#[derive(Serialize)]
struct ErrorResponse {
    error: bool,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, self.to_string()),
            AppError::Forbidden => (StatusCode::FORBIDDEN, self.to_string()),
            AppError::NotOwner => (StatusCode::FORBIDDEN, self.to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Gateway(msg) => {
                tracing::error!(error = %msg, "Payment gateway error");
                (StatusCode::BAD_GATEWAY, "payment gateway error".to_string())
            }
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "database error".to_string())
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: true,
            message,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
