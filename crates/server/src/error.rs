//! Application error handling

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use servicerec_core::CodeTableError;
use thiserror::Error;

/// Webhook-level error type
#[derive(Debug, Error)]
pub enum AppError {
    #[error("No registered action found for name '{0}'")]
    ActionNotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    TooManyRequests(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    action_name: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::ActionNotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
        };
        let action_name = match &self {
            AppError::ActionNotFound(name) => Some(name.clone()),
            _ => None,
        };

        let body = ErrorBody {
            error: self.to_string(),
            action_name,
        };
        (status, Json(body)).into_response()
    }
}

/// Failure talking to a remote service
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request to {service} failed: {source}")]
    Request {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("{service} returned {status}: {body}")]
    Status {
        service: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Failed to parse {service} response: {source}")]
    Decode {
        service: &'static str,
        #[source]
        source: reqwest::Error,
    },
}

/// Errors that stop the server from starting
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    CodeTables(#[from] CodeTableError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}
