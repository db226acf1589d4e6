//! Error handling for the shelf HTTP layer

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use uuid::{Timestamp, Uuid};

/// Envelope wrapping every JSON error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

/// Standard error body format
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: Vec<serde_json::Value>,
    pub trace_id: String,
    pub timestamp: String,
}

/// Application error types that map to HTTP responses
#[derive(Error, Debug)]
pub enum AppError {
    /// Answered with a bare 404; lookups of absent records carry no body.
    #[error("not found: {message}")]
    NotFound { message: String },

    #[error("bad request: {message}")]
    BadRequest {
        details: Vec<serde_json::Value>,
        code: String,
        message: String,
    },
}

impl AppError {
    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Create a bad request error
    pub fn bad_request(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::BadRequest {
            details: Vec::new(),
            code: code.into(),
            message: message.into(),
        }
    }

    /// Attach structured details to a bad request error
    pub fn with_details(self, extra: Vec<serde_json::Value>) -> Self {
        match self {
            AppError::BadRequest {
                mut details,
                code,
                message,
            } => {
                details.extend(extra);
                AppError::BadRequest {
                    details,
                    code,
                    message,
                }
            }
            other => other,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request("invalid_body", rejection.body_text()).with_details(vec![json!({
            "source": "body",
            "status": rejection.status().as_u16(),
        })])
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::bad_request("invalid_path", rejection.body_text()).with_details(vec![json!({
            "source": "path",
            "status": rejection.status().as_u16(),
        })])
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request("invalid_query", rejection.body_text()).with_details(vec![json!({
            "source": "query",
            "status": rejection.status().as_u16(),
        })])
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let (code, message, details) = match self {
            AppError::NotFound { message } => {
                tracing::warn!(status_code = %status.as_u16(), %message, "Request error");
                return status.into_response();
            }
            AppError::BadRequest {
                details,
                code,
                message,
            } => (code, message, details),
        };

        let trace_id = Uuid::new_v7(Timestamp::now(uuid::NoContext));
        let now = OffsetDateTime::now_utc();
        let timestamp = now.format(&Rfc3339).unwrap_or_else(|_| now.to_string());

        tracing::warn!(
            error_id = %trace_id,
            error_code = %code,
            status_code = %status.as_u16(),
            %message,
            "Request error"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code,
                message,
                details,
                trace_id: trace_id.to_string(),
                timestamp,
            },
        };

        (status, Json(body)).into_response()
    }
}
