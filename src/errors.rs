//! Custom error types for the slug shortener.
//!
//! Implements error handling with automatic HTTP response conversion.
//! Client mistakes (malformed input, unknown slug, unknown user) map to 400,
//! upstream failures (store, identity provider, timeouts) map to 500.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use std::fmt;
use std::time::Duration;

use crate::models::ErrorResponse;

/// Application-level errors
#[derive(Debug)]
pub enum AppError {
    /// Lookup yielded no record
    NotFound(String),
    /// Malformed input data
    ValidationError(String),
    /// Identity is not registered with the identity provider
    UnknownUser(String),
    /// Store operation failed
    DatabaseError(String),
    /// Store operation exceeded its time budget
    StoreTimeout(String),
    /// Identity provider failed for a reason other than "not found"
    IdentityProviderError(String),
    /// Invalid configuration
    ConfigError(String),
    /// Internal server error
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::UnknownUser(msg) => write!(f, "Unknown user: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            AppError::StoreTimeout(msg) => write!(f, "Store timeout: {}", msg),
            AppError::IdentityProviderError(msg) => write!(f, "Identity provider error: {}", msg),
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

// ============================================================================
// Constructor Methods
// ============================================================================

impl AppError {
    /// Create a NotFound error for a slug token
    pub fn slug_not_found(slug: &str) -> Self {
        AppError::NotFound(format!("Slug '{}' not found", slug))
    }

    /// Create an UnknownUser error for a user id
    pub fn user_not_found(user_id: &str) -> Self {
        AppError::UnknownUser(format!("User '{}' not found", user_id))
    }

    /// Create a StoreTimeout error for an operation that ran out of time
    pub fn store_timeout(timeout: Duration) -> Self {
        AppError::StoreTimeout(format!(
            "Store operation did not complete within {}s",
            timeout.as_secs()
        ))
    }

    /// Create a ValidationError with a message
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::ValidationError(message.into())
    }

    /// Create an IdentityProviderError with a message
    pub fn identity(message: impl Into<String>) -> Self {
        AppError::IdentityProviderError(message.into())
    }

    /// Create a ConfigError with a message
    pub fn config(message: impl Into<String>) -> Self {
        AppError::ConfigError(message.into())
    }

    /// Create an InternalError with a message
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::InternalError(message.into())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::UnknownUser(_) => StatusCode::BAD_REQUEST,
            AppError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::StoreTimeout(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::IdentityProviderError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ConfigError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let (error_code, message) = match self {
            AppError::NotFound(msg) => ("NOT_FOUND", msg.clone()),
            AppError::ValidationError(msg) => ("VALIDATION_ERROR", msg.clone()),
            AppError::UnknownUser(msg) => ("USER_NOT_FOUND", msg.clone()),
            AppError::DatabaseError(msg) => ("DATABASE_ERROR", msg.clone()),
            AppError::StoreTimeout(msg) => ("STORE_TIMEOUT", msg.clone()),
            AppError::IdentityProviderError(msg) => ("IDENTITY_PROVIDER_ERROR", msg.clone()),
            AppError::ConfigError(msg) => ("CONFIG_ERROR", msg.clone()),
            AppError::InternalError(msg) => ("INTERNAL_ERROR", msg.clone()),
        };

        HttpResponse::build(self.status_code()).json(ErrorResponse::new(message, error_code))
    }
}

/// Convert rusqlite errors to AppError
impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        log::error!("Database error: {:?}", err);
        AppError::DatabaseError(err.to_string())
    }
}

/// Convert r2d2 pool errors to AppError
impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        log::error!("Connection pool error: {:?}", err);
        AppError::DatabaseError(format!("Connection pool error: {}", err))
    }
}

/// Convert identity provider transport errors to AppError
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        log::error!("Identity provider request failed: {:?}", err);
        AppError::IdentityProviderError(err.to_string())
    }
}

/// Convert assertion signing errors to AppError
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        AppError::IdentityProviderError(format!("Failed to sign token assertion: {}", err))
    }
}
