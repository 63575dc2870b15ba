//! # Error Types
//!
//! Domain-specific error types for vetfin-core.
//!
//! ## Error Hierarchy
//! ```text
//! vetfin-core errors (this file)
//! ├── CoreError        - Domain rule violations
//! └── ValidationError  - Form-input validation failures
//!
//! vetfin-db errors (separate crate)
//! └── DbError          - Store operation failures
//!
//! Screen errors (apps/clinic)
//! └── ScreenError      - What the interaction layer reports inline
//!
//! Flow: ValidationError → CoreError → DbError → ScreenError
//! ```

use thiserror::Error;

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Named employee does not exist on the roster.
    #[error("Employee not found: {0}")]
    EmployeeNotFound(String),

    /// A shift report was submitted without the required crew.
    ///
    /// ## When This Occurs
    /// Every shift must name one veterinarian and at least one technician;
    /// the reception form enforces it before any write.
    #[error("Shift report is missing {0}")]
    IncompleteCrew(&'static str),

    /// An invoice marked paid carries no payment date.
    #[error("Invoice {0} is marked paid but has no paid date")]
    PaidWithoutDate(i64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

/// Input validation errors.
///
/// These occur when a submitted form doesn't meet requirements. They are
/// raised before any business logic runs and always block the write.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format or inconsistent combination of fields.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. duplicate employee name).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::IncompleteCrew("at least one technician");
        assert_eq!(
            err.to_string(),
            "Shift report is missing at least one technician"
        );

        let err = ValidationError::Required {
            field: "supplier".to_string(),
        };
        assert_eq!(err.to_string(), "supplier is required");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "amount".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
