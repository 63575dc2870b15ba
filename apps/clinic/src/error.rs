//! # Screen Error Type
//!
//! Unified error for screen handlers.
//!
//! ## Error Flow
//! ```text
//! ValidationError (vetfin-core) ──┐
//! CoreError (vetfin-core) ────────┼──► ScreenError { code, message }
//! DbError (vetfin-db) ────────────┘         │
//!                                           ▼
//!                               shown inline on the screen;
//!                               raw database detail goes to the log,
//!                               not to the person at the desk
//! ```

use serde::Serialize;
use thiserror::Error;
use vetfin_core::{CoreError, ValidationError};
use vetfin_db::DbError;

/// Error returned from screen handlers.
#[derive(Debug, Clone, Error, Serialize)]
#[error("{message}")]
pub struct ScreenError {
    /// Machine-readable code for branching in the presentation layer.
    pub code: ErrorCode,

    /// Human-readable message for inline display.
    pub message: String,
}

/// Error codes for screen responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Record not found.
    NotFound,

    /// Form input failed validation.
    ValidationError,

    /// The store rejected or failed the operation.
    DatabaseError,

    /// Wrong username or password.
    AuthFailed,

    /// Screen requires the admin role.
    Forbidden,

    /// Anything else.
    Internal,
}

impl ScreenError {
    /// Creates a new screen error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ScreenError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ScreenError::new(ErrorCode::ValidationError, message)
    }

    /// Creates the admin-gate error.
    pub fn forbidden() -> Self {
        ScreenError::new(ErrorCode::Forbidden, "This screen requires the admin role")
    }

    /// Creates the failed-login error. One message for both bad username
    /// and bad password.
    pub fn auth_failed() -> Self {
        ScreenError::new(ErrorCode::AuthFailed, "Wrong username or password")
    }
}

/// Converts database errors to screen errors.
impl From<DbError> for ScreenError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ScreenError::new(
                ErrorCode::NotFound,
                format!("{} not found: {}", entity, id),
            ),
            DbError::UniqueViolation { field, value } => ScreenError::new(
                ErrorCode::ValidationError,
                format!("{} '{}' already exists", field, value),
            ),
            other => {
                // Full detail to the log, a generic line to the screen.
                tracing::error!(error = %other, "Database operation failed");
                ScreenError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

impl From<CoreError> for ScreenError {
    fn from(err: CoreError) -> Self {
        ScreenError::validation(err.to_string())
    }
}

impl From<ValidationError> for ScreenError {
    fn from(err: ValidationError) -> Self {
        ScreenError::validation(err.to_string())
    }
}
