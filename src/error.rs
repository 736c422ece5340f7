//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the service.
//! It centralizes error management, providing a consistent way to handle and represent
//! the failure modes of registration, login and token verification.
//!
//! `AppError` implements `actix_web::error::ResponseError` to convert errors into
//! HTTP responses with JSON bodies. `From` implementations for `sqlx::Error`,
//! `validator::ValidationErrors`, `jsonwebtoken::errors::Error`, `bcrypt::BcryptError`
//! and `actix_web::error::BlockingError` allow for easy conversion using `?`.
//!
//! Every `Unauthorized` error renders the same body. The carried message is an internal
//! reason for logs only and never reaches the client.

use actix_web::{error::BlockingError, error::ResponseError, http::StatusCode, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Body text shared by every 401 response.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized";

/// Represents all possible errors that can occur within the service.
#[derive(Debug)]
pub enum AppError {
    /// Bad credentials or a bad token (HTTP 401).
    /// The message is an internal reason; responses always use `UNAUTHORIZED_MESSAGE`.
    Unauthorized(String),
    /// Represents a client-side error due to a malformed request (HTTP 400).
    BadRequest(String),
    /// The resource already exists, e.g. a duplicate email on registration (HTTP 409).
    Conflict(String),
    /// Represents an unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// Represents an error originating from the user store (HTTP 500).
    DatabaseError(String),
    /// Input failed field validation (HTTP 400).
    ValidationError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

/// Converts `AppError` variants into `HttpResponse` objects.
impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::BadRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::InternalServerError(_) | AppError::DatabaseError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AppError::Unauthorized(_) => UNAUTHORIZED_MESSAGE.to_string(),
            // Store and server internals stay in the logs.
            AppError::InternalServerError(msg) | AppError::DatabaseError(msg) => {
                log::error!("{}", msg);
                "Internal server error".to_string()
            }
            AppError::BadRequest(msg)
            | AppError::Conflict(msg)
            | AppError::ValidationError(msg) => msg.clone(),
        };
        HttpResponse::build(self.status_code()).json(json!({ "error": message }))
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// A unique-constraint violation becomes `Conflict`, anything else is a `DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match error {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::Conflict("Email already registered".into())
            }
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for AppError {
    fn from(error: sqlx::migrate::MigrateError) -> AppError {
        AppError::DatabaseError(format!("Migration failed: {}", error))
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`.
///
/// The detailed validation messages are preserved.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Any JWT decoding or verification failure is an authentication failure.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(error: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(format!("Invalid token: {:?}", error.kind()))
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
///
/// This handles errors during password hashing or verification.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}

/// The blocking pool was shut down or the blocking closure panicked.
impl From<BlockingError> for AppError {
    fn from(error: BlockingError) -> AppError {
        AppError::InternalServerError(format!("Blocking task failed: {}", error))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_responses() {
        let error = AppError::Unauthorized("Invalid token".into());
        assert_eq!(error.error_response().status(), 401);

        let error = AppError::BadRequest("Invalid input".into());
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::ValidationError("email: invalid".into());
        assert_eq!(error.error_response().status(), 400);

        let error = AppError::Conflict("Email already registered".into());
        assert_eq!(error.error_response().status(), 409);

        let error = AppError::InternalServerError("Server error".into());
        assert_eq!(error.error_response().status(), 500);
    }

    #[actix_rt::test]
    async fn test_unauthorized_body_hides_reason() {
        let expired = AppError::Unauthorized("Invalid token: ExpiredSignature".into());
        let orphaned = AppError::Unauthorized("token subject no longer exists".into());

        let expired_body = actix_web::body::to_bytes(expired.error_response().into_body())
            .await
            .unwrap();
        let orphaned_body = actix_web::body::to_bytes(orphaned.error_response().into_body())
            .await
            .unwrap();

        assert_eq!(expired_body, orphaned_body);
        let json: serde_json::Value = serde_json::from_slice(&expired_body).unwrap();
        assert_eq!(json["error"], UNAUTHORIZED_MESSAGE);
    }

    #[actix_rt::test]
    async fn test_database_error_body_is_generic() {
        let error = AppError::DatabaseError("connection refused to 10.0.0.3".into());
        let body = actix_web::body::to_bytes(error.error_response().into_body())
            .await
            .unwrap();
        assert!(!String::from_utf8_lossy(&body).contains("10.0.0.3"));
    }
}
