//! Common error types for the media relay

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use crate::provider::traits::MediaKind;

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Missing prompt")]
    MissingPrompt,

    #[error("Invalid request body: {0}")]
    InvalidRequest(String),

    /// The provider answered with a non-success status
    #[error("{kind} provider error: status {status}")]
    Provider {
        kind: MediaKind,
        status: u16,
        body: String,
    },

    /// The provider answered 2xx but the body was not JSON
    #[error("Invalid JSON from {kind} provider: {details}")]
    InvalidJson { kind: MediaKind, details: String },

    #[error("Invalid base64 payload: {0}")]
    InvalidBase64(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body returned for anticipated failures
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: None,
            details: None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let structured = match self {
            AppError::MissingPrompt => Some((
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("Missing prompt"),
            )),
            AppError::InvalidRequest(ref details) => Some((
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    details: Some(details.clone()),
                    ..ErrorResponse::new("Invalid request body")
                },
            )),
            AppError::Provider {
                kind,
                status,
                ref body,
            } => Some((
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    code: Some(status),
                    details: Some(body.clone()),
                    ..ErrorResponse::new(format!("{} provider error", kind))
                },
            )),
            AppError::InvalidJson { ref details, .. } => Some((
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse {
                    details: Some(details.clone()),
                    ..ErrorResponse::new("Invalid JSON")
                },
            )),
            _ => None,
        };

        if let Some((status, body)) = structured {
            return (status, Json(body)).into_response();
        }

        // Everything else is an unanticipated failure and gets a bare status page
        error!(error = %self, "Request failed");
        let status = match &self {
            AppError::HttpClient(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            AppError::HttpClient(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let reason = status.canonical_reason().unwrap_or("Error");

        (status, reason).into_response()
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, AppError>;
