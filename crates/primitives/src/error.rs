use axum::response::{IntoResponse, Response};
use axum::Json;
use diesel::r2d2;
use http::StatusCode;
use serde_json::{json, Value};
use std::fmt;

/// Normalized failure taxonomy for partner banking backends. Every adapter
/// maps its partner's wire-level failures into one of these variants before
/// anything crosses the provider contract boundary.
#[derive(Debug)]
pub enum ProviderError {
    /// 401/403 from the partner. Triggers refresh-or-reauthenticate in the
    /// client base and is never retried as-is.
    Authentication(String),
    /// Business-rule rejection for an underfunded source wallet.
    InsufficientFunds(String),
    /// Malformed caller input or a partner 4xx. Retrying cannot succeed.
    Validation(String),
    /// Transport-level failure (connect, timeout, DNS).
    Network(String),
    /// Any other non-2xx partner response, carrying the machine-readable
    /// code, HTTP status, and raw partner payload for diagnostics.
    Api {
        code: String,
        status: u16,
        message: String,
        body: Option<Value>,
    },
}

impl ProviderError {
    pub fn api(
        code: impl Into<String>,
        status: u16,
        message: impl Into<String>,
        body: Option<Value>,
    ) -> Self {
        ProviderError::Api {
            code: code.into(),
            status,
            message: message.into(),
            body,
        }
    }

    /// Only transport failures and partner 5xx responses are worth another
    /// attempt; everything else fails the same way every time.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Network(_) => true,
            ProviderError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Authentication(msg) => {
                write!(f, "Provider authentication error: {}", msg)
            }
            ProviderError::InsufficientFunds(msg) => write!(f, "Insufficient funds: {}", msg),
            ProviderError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ProviderError::Network(msg) => write!(f, "Provider network error: {}", msg),
            ProviderError::Api {
                code,
                status,
                message,
                ..
            } => {
                write!(f, "Provider error [{} {}]: {}", status, code, message)
            }
        }
    }
}

impl std::error::Error for ProviderError {}

#[derive(Debug)]
pub enum ApiError {
    Database(diesel::result::Error),
    DatabaseConnection(String),
    Validation(validator::ValidationErrors),
    BadRequest(String),
    NotFound(String),
    Conflict(String),
    Provider(ProviderError),
    Webhook(String),
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Database(e) => write!(f, "Database error: {}", e),
            ApiError::DatabaseConnection(e) => write!(f, "Database connection error: {}", e),
            ApiError::Validation(e) => write!(f, "Validation error: {}", e),
            ApiError::BadRequest(e) => write!(f, "Bad request: {}", e),
            ApiError::NotFound(e) => write!(f, "Not found: {}", e),
            ApiError::Conflict(e) => write!(f, "Conflict: {}", e),
            ApiError::Provider(e) => write!(f, "{}", e),
            ApiError::Webhook(e) => write!(f, "Webhook error: {}", e),
            ApiError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Database(e) => Some(e),
            ApiError::Validation(e) => Some(e),
            ApiError::Provider(e) => Some(e),
            _ => None,
        }
    }
}

impl From<r2d2::Error> for ApiError {
    fn from(err: r2d2::Error) -> Self {
        ApiError::DatabaseConnection(err.to_string())
    }
}

impl From<diesel::result::Error> for ApiError {
    fn from(err: diesel::result::Error) -> Self {
        ApiError::Database(err)
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        ApiError::Validation(err)
    }
}

impl From<ProviderError> for ApiError {
    fn from(err: ProviderError) -> Self {
        ApiError::Provider(err)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::Provider(ProviderError::Network(err.to_string()))
    }
}

impl From<ApiError> for (StatusCode, String) {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Database(e) => match e {
                diesel::result::Error::NotFound => {
                    (StatusCode::NOT_FOUND, "Record not found".to_string())
                }
                diesel::result::Error::DatabaseError(
                    diesel::result::DatabaseErrorKind::UniqueViolation,
                    _,
                ) => (
                    StatusCode::CONFLICT,
                    "Duplicate record for unique field".to_string(),
                ),
                _ => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Database error: {}", e),
                ),
            },
            ApiError::DatabaseConnection(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database connection error: {}", e),
            ),
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                format!("Validation error: {}", errors),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Provider(e) => match e {
                ProviderError::Authentication(msg) => (StatusCode::UNAUTHORIZED, msg),
                ProviderError::InsufficientFunds(msg) => (StatusCode::PAYMENT_REQUIRED, msg),
                ProviderError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
                ProviderError::Network(msg) => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Provider unreachable: {}", msg),
                ),
                ProviderError::Api {
                    status,
                    message,
                    code,
                    ..
                } => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Provider error [{} {}]: {}", status, code, message),
                ),
            },
            ApiError::Webhook(msg) => (StatusCode::BAD_REQUEST, format!("Webhook error: {}", msg)),
            ApiError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Internal error: {}", msg),
            ),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message): (StatusCode, String) = self.into();
        let body = json!({ "success": false, "error": message });
        (status, Json(body)).into_response()
    }
}
