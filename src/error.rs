use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

/// Headers attached to every flow-error response (RFC 6749 Section 5.2).
type ErrorResponseHeaders = [(header::HeaderName, &'static str); 2];
const ERROR_HEADERS: ErrorResponseHeaders = [
    (header::CACHE_CONTROL, "no-store"),
    (header::PRAGMA, "no-cache"),
];

/// OAuth 2.0 error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub error_description: &'static str,
}

/// Policy violation raised while evaluating the `prompt` and `max_age`
/// request parameters.
///
/// All variants are client errors: the gate converts them into a JSON error
/// payload at its boundary, never into a process failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFlowError {
    /// Malformed or contradictory `prompt` value.
    InvalidRequest,
    /// Re-authentication is required but could not be established.
    LoginRequired,
    /// Prior consent is required but none was recorded.
    ConsentRequired,
    /// The client asked for account selection, which the host must implement.
    AccountSelectionRequired,
}

impl AuthFlowError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AuthFlowError::InvalidRequest => "invalid_request",
            AuthFlowError::LoginRequired => "login_required",
            AuthFlowError::ConsentRequired => "consent_required",
            AuthFlowError::AccountSelectionRequired => "account_selection_required",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthFlowError::InvalidRequest
            | AuthFlowError::LoginRequired
            | AuthFlowError::ConsentRequired
            | AuthFlowError::AccountSelectionRequired => StatusCode::BAD_REQUEST,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            AuthFlowError::InvalidRequest => {
                "The request is missing a required parameter, includes an \
                 unsupported parameter value, or is otherwise malformed."
            }
            AuthFlowError::LoginRequired => {
                "The Authorization Server requires End-User authentication."
            }
            AuthFlowError::ConsentRequired => {
                "The Authorization Server requires End-User consent."
            }
            AuthFlowError::AccountSelectionRequired => {
                "The End-User is required to select a session at the \
                 Authorization Server."
            }
        }
    }
}

impl IntoResponse for AuthFlowError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.error_code(),
            error_description: self.description(),
        };
        (self.status_code(), ERROR_HEADERS, Json(body)).into_response()
    }
}

impl std::fmt::Display for AuthFlowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.description())
    }
}

impl std::error::Error for AuthFlowError {}
