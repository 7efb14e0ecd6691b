use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ErrorResponse;
use crate::services::{AuthError, GadgetError};

pub const NO_TOKEN: &str = "Access Denied. No Token Provided.";
pub const BAD_TOKEN: &str = "Invalid or Expired Token.";

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    ValidationError(String),

    Unauthorized(String),

    Forbidden(String),

    Conflict(String),

    DatabaseError(String),

    InternalError(String),

    /// A store failure the client is allowed to see the cause of.
    OperationFailed { message: String, details: String },
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
            ApiError::OperationFailed { message, details } => {
                write!(f, "{}: {}", message, details)
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, ErrorResponse::new(msg)),
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, ErrorResponse::new(msg)),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, ErrorResponse::new(msg)),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, ErrorResponse::new(msg)),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, ErrorResponse::new(msg)),
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Internal Server Error"),
                )
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("Internal Server Error"),
                )
            }
            ApiError::OperationFailed { message, details } => {
                tracing::error!("{}: {}", message, details);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::with_details(message, details),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::MissingCredentials => {
                ApiError::validation("Username and password required")
            }
            AuthError::InvalidCredentials => ApiError::validation("Invalid credentials"),
            AuthError::UsernameTaken(_) => ApiError::Conflict("Username already taken".to_string()),
            AuthError::InvalidToken(_) => ApiError::Forbidden(BAD_TOKEN.to_string()),
            AuthError::Internal(msg) => ApiError::InternalError(msg),
        }
    }
}

impl From<GadgetError> for ApiError {
    fn from(err: GadgetError) -> Self {
        match err {
            GadgetError::NotFound(_) => ApiError::gadget_not_found(),
            GadgetError::AlreadyDestroyed => ApiError::validation("Gadget is already destroyed"),
            GadgetError::IllegalTransition { .. } => ApiError::Conflict(err.to_string()),
            GadgetError::Database(msg) => ApiError::DatabaseError(msg),
        }
    }
}

impl ApiError {
    pub fn gadget_not_found() -> Self {
        ApiError::NotFound("Gadget not found".to_string())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }

    /// Maps a gadget error, exposing store failures under `message` with
    /// their cause in `details`.
    pub fn with_details(message: &str) -> impl FnOnce(GadgetError) -> Self + '_ {
        move |err| match err {
            GadgetError::Database(details) => ApiError::OperationFailed {
                message: message.to_string(),
                details,
            },
            other => other.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GadgetStatus;

    #[test]
    fn test_gadget_error_status_codes() {
        let cases = [
            (
                GadgetError::NotFound("x".into()),
                StatusCode::NOT_FOUND,
            ),
            (GadgetError::AlreadyDestroyed, StatusCode::BAD_REQUEST),
            (
                GadgetError::IllegalTransition {
                    from: GadgetStatus::Destroyed,
                    to: GadgetStatus::Deployed,
                },
                StatusCode::CONFLICT,
            ),
            (
                GadgetError::Database("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_auth_error_status_codes() {
        let cases = [
            (AuthError::MissingCredentials, StatusCode::BAD_REQUEST),
            (AuthError::InvalidCredentials, StatusCode::BAD_REQUEST),
            (AuthError::UsernameTaken("a".into()), StatusCode::CONFLICT),
            (AuthError::InvalidToken("b".into()), StatusCode::FORBIDDEN),
            (
                AuthError::Internal("c".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_with_details_only_wraps_store_failures() {
        let err = ApiError::with_details("Error updating gadget")(GadgetError::Database(
            "disk full".into(),
        ));
        assert!(matches!(
            err,
            ApiError::OperationFailed { ref message, ref details }
                if message == "Error updating gadget" && details == "disk full"
        ));

        let err = ApiError::with_details("Error updating gadget")(GadgetError::NotFound(
            "x".into(),
        ));
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
