// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent responses.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::shot::ShotError;
use crate::storage::StorageError;

/// Application error type.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The backend rejected the bearer token.
    #[error("Session is no longer valid (HTTP {0})")]
    SessionInvalid(u16),

    /// No response was received from the backend.
    #[error("Backend unreachable: {0}")]
    NetworkUnavailable(String),

    /// Server-side form rejection; the message is shown verbatim.
    #[error("{0}")]
    ValidationFailed(String),

    #[error("Backend error: HTTP {0}: {1}")]
    Backend(u16, String),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Shot(#[from] ShotError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// True when no response was received, so stored tokens must be kept.
    pub fn is_transient(&self) -> bool {
        matches!(self, AppError::NetworkUnavailable(_))
    }

    /// True when the backend answered with a non-2xx status.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            AppError::SessionInvalid(_) | AppError::ValidationFailed(_) | AppError::Backend(..)
        )
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AppError::Internal(anyhow::anyhow!("Malformed response body: {}", err))
        } else {
            AppError::NetworkUnavailable(err.to_string())
        }
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
            AppError::SessionInvalid(_) => (StatusCode::UNAUTHORIZED, "session_invalid", None),
            AppError::NetworkUnavailable(msg) => (
                StatusCode::BAD_GATEWAY,
                "network_unavailable",
                Some(msg.clone()),
            ),
            AppError::ValidationFailed(msg) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "validation_failed",
                Some(msg.clone()),
            ),
            AppError::Backend(code, _) => {
                tracing::warn!(status = code, "Backend error");
                (StatusCode::BAD_GATEWAY, "backend_error", None)
            }
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "bad_request", Some(msg.clone()))
            }
            AppError::Shot(err) => (StatusCode::BAD_REQUEST, "malformed_token", Some(err.to_string())),
            AppError::Storage(err) => {
                tracing::error!(error = %err, "Storage error");
                (StatusCode::INTERNAL_SERVER_ERROR, "storage_error", None)
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal error");
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

/// Result type alias
pub type Result<T> = std::result::Result<T, AppError>;
