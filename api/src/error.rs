//! Unified error types for the school locator API
//!
//! This module defines error types for each layer:
//! - `DomainError`: Persistence failures surfaced through repository ports
//! - `ServiceError`: Outcome of an application service call
//! - `RateLimitError`: Rate limit counter store failures
//! - `ConfigError`: Startup configuration problems
//! - `AppError`: HTTP layer errors, rendered into the response envelope

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::domain::validation::{ValidationErrors, ValidationIssue};
use crate::response::ApiResponse;

/// Domain layer errors - raised by repository adapters
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Application service errors
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Input failed its contract; nothing was read or written
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Rate limit store errors
#[derive(Debug, Error)]
pub enum RateLimitError {
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Unexpected store reply: {0}")]
    Reply(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Configuration errors raised at startup
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value:?} ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Application layer errors - used by HTTP handlers and middleware
#[derive(Debug, Error)]
pub enum AppError {
    /// Rendered as 400 with the validation issues attached
    #[error("{message}")]
    BadRequest {
        message: &'static str,
        issues: Vec<ValidationIssue>,
    },

    /// Rendered as 500; `cause` is logged and never sent to the client
    #[error("{message}: {cause}")]
    Internal {
        message: &'static str,
        cause: String,
    },
}

impl AppError {
    /// Map a service error onto the envelope messages of one endpoint
    pub fn from_service(
        err: ServiceError,
        bad_request_message: &'static str,
        internal_message: &'static str,
    ) -> Self {
        match err {
            ServiceError::Validation(errors) => AppError::BadRequest {
                message: bad_request_message,
                issues: errors.into_issues(),
            },
            ServiceError::Domain(e) => AppError::Internal {
                message: internal_message,
                cause: e.to_string(),
            },
        }
    }
}

impl From<RateLimitError> for AppError {
    fn from(e: RateLimitError) -> Self {
        AppError::Internal {
            message: "Internal server error",
            cause: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::BadRequest { message, issues } => (
                StatusCode::BAD_REQUEST,
                ApiResponse::failure(message, Some(issues)),
            )
                .into_response(),
            AppError::Internal { message, cause } => {
                tracing::error!(error = %cause, "{}", message);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiResponse::failure(message, None),
                )
                    .into_response()
            }
        }
    }
}
