use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::NotesError;
use crate::validation::{self, ValidationErrors};

const INTERNAL_MESSAGE: &str = "An unexpected error occurred";

/// Failure of a single request, rendered as
/// `{ "error": { "code", "message", "details"? } }`.
#[derive(Debug)]
pub enum ApiError {
    Validation(ValidationErrors),
    NotFound(String),
    Conflict(String),
    PayloadTooLarge(String),
    /// Detail is logged, never sent to the client.
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: ErrorDetail<'a>,
}

#[derive(Serialize)]
struct ErrorDetail<'a> {
    code: &'static str,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<&'a ValidationErrors>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION_ERROR",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Conflict(_) => "CONFLICT",
            ApiError::PayloadTooLarge(_) => "PAYLOAD_TOO_LARGE",
            ApiError::Internal(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn invalid_body(message: String) -> Self {
        ApiError::Validation(ValidationErrors::single("", message))
    }
}

impl From<NotesError> for ApiError {
    fn from(err: NotesError) -> Self {
        match err {
            NotesError::Validation(errors) => ApiError::Validation(errors),
            NotesError::NotFound(msg) => ApiError::NotFound(msg),
            NotesError::Conflict(msg) => ApiError::Conflict(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            return ApiError::PayloadTooLarge("Request body is too large".to_string());
        }
        ApiError::invalid_body(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::invalid_body(rejection.body_text())
    }
}

/// The only path parameter is the note id, so any failure to extract it
/// is reported against `id`.
impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!(error = %rejection.body_text(), "rejected path parameter");
        ApiError::Validation(ValidationErrors::single("id", validation::INVALID_ID_MESSAGE))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code();
        let (message, details) = match &self {
            ApiError::Validation(errors) => ("Request validation failed", Some(errors)),
            ApiError::NotFound(msg) | ApiError::Conflict(msg) | ApiError::PayloadTooLarge(msg) => {
                (msg.as_str(), None)
            }
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "unhandled error");
                (INTERNAL_MESSAGE, None)
            }
        };

        let body = ErrorBody {
            error: ErrorDetail {
                code,
                message,
                details,
            },
        };
        (status, Json(body)).into_response()
    }
}
