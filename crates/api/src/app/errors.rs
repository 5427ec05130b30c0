use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use serde::Serialize;

use catalog_core::DomainError;

const VALIDATION_MESSAGE: &str = "Input validation failed. Please check the errors below.";
const UNEXPECTED_MESSAGE: &str = "An unexpected error occurred. Please try again later.";

/// Handler error: a `DomainError` on its way to the client.
///
/// `into_response` only sets the status and stashes the error in the response
/// extensions; `middleware::render_errors` writes the body, because only it
/// knows the request path.
#[derive(Debug)]
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut response = status_for(&self.0).into_response();
        response.extensions_mut().insert(self.0);
        response
    }
}

pub fn status_for(err: &DomainError) -> StatusCode {
    match err {
        DomainError::InvalidArgument(_) | DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::NotFound(_) => StatusCode::NOT_FOUND,
        DomainError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Wire shape of every error the service returns.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub timestamp: DateTime<Utc>,
    pub status: u16,
    pub error: &'static str,
    pub message: String,
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<Vec<String>>,
}

impl ErrorBody {
    pub fn new(err: &DomainError, path: &str) -> Self {
        let status = status_for(err);
        let (error, message, errors) = match err {
            DomainError::InvalidArgument(msg) => ("Bad Request", msg.clone(), None),
            DomainError::Validation(fields) => (
                "Validation Failed",
                VALIDATION_MESSAGE.to_string(),
                Some(fields.clone()),
            ),
            DomainError::NotFound(msg) => ("Not Found", msg.clone(), None),
            // Internal detail stays in the logs.
            DomainError::Unexpected(_) => ("Internal Server Error", UNEXPECTED_MESSAGE.to_string(), None),
        };

        Self {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error,
            message,
            path: path.to_string(),
            errors,
        }
    }

    /// Body for a status the router produced on its own, without a `DomainError`.
    pub fn for_status(status: StatusCode, message: String, path: &str) -> Self {
        Self {
            timestamp: Utc::now(),
            status: status.as_u16(),
            error: status.canonical_reason().unwrap_or("Error"),
            message,
            path: path.to_string(),
            errors: None,
        }
    }
}

/// Full JSON error response for `err` raised while serving `path`.
pub fn json_error(err: &DomainError, path: &str) -> Response {
    (status_for(err), axum::Json(ErrorBody::new(err, path))).into_response()
}

/// JSON error response for a bare router status such as 405.
pub fn status_error(status: StatusCode, message: String, path: &str) -> Response {
    (status, axum::Json(ErrorBody::for_status(status, message, path))).into_response()
}
