use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use skipper_core::error::CoreError;

/// Terminal failure state of a request, rendered as a plain-text response.
///
/// The update path walks these strictly in order and short-circuits on the
/// first hit: Unauthorized, Unprocessable, Forbidden, NotFound, Internal.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or invalid bearer credential.
    Unauthorized,
    /// Wrong method or missing required form fields.
    Unprocessable,
    /// Service name not in the whitelist.
    Forbidden,
    /// The name resolved to zero services, or to more than one.
    NotFound(String),
    /// The orchestration layer failed (unreachable, rejected spec, stale
    /// version token). Never aborts the serving loop.
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Unprocessable => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn message(&self) -> String {
        match self {
            ApiError::Unauthorized => "Not Authorized".to_string(),
            ApiError::Unprocessable => {
                "POST attributes 'name' and 'image' are required".to_string()
            }
            ApiError::Forbidden => "Service Not Whitelisted".to_string(),
            ApiError::NotFound(name) => format!("Service {name:?} not found."),
            ApiError::Internal(message) => message.clone(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.message()).into_response()
    }
}

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ServiceNotFound(name) => ApiError::NotFound(name),
            CoreError::Orchestrator(err) => ApiError::Internal(err.to_string()),
        }
    }
}
