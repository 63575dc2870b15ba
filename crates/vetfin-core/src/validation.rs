//! # Validation Module
//!
//! Form-input checks run by the screens before any write.
//!
//! The store only enforces presence and uniqueness; the remaining form
//! rules (lengths, positivity, paired fields) happen here so that a
//! rejected form never reaches the database.

use chrono::NaiveDate;

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validates a staff name (employee, veterinarian, or technician).
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 100 characters
///
/// ## Returns
/// The trimmed name.
pub fn validate_person_name(name: &str) -> ValidationResult<String> {
    validate_required_text("name", name, 100)
}

/// Validates a supplier or customer field on an invoice form.
pub fn validate_counterparty(field: &'static str, value: &str) -> ValidationResult<String> {
    validate_required_text(field, value, 200)
}

/// Validates an amount in grosz. Zero and negative amounts block submission.
pub fn validate_amount_cents(field: &'static str, cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates an amount in grosz where zero is a legal value, like a
/// salary not yet agreed or an empty till. Negatives block submission.
pub fn validate_non_negative_cents(field: &'static str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates the shift crew: one or more technicians must be named.
pub fn validate_crew(technicians: &[String]) -> ValidationResult<()> {
    if technicians.iter().all(|t| t.trim().is_empty()) {
        return Err(ValidationError::Required {
            field: "technicians".to_string(),
        });
    }
    Ok(())
}

/// Validates the paid flag / paid date combination on an invoice form:
/// `paid` requires a date, an unpaid invoice must not carry one.
pub fn validate_paid_date(paid: bool, paid_date: Option<NaiveDate>) -> ValidationResult<()> {
    match (paid, paid_date) {
        (true, None) => Err(ValidationError::Required {
            field: "paid_date".to_string(),
        }),
        (false, Some(_)) => Err(ValidationError::InvalidFormat {
            field: "paid_date".to_string(),
            reason: "must be empty while the invoice is unpaid".to_string(),
        }),
        _ => Ok(()),
    }
}

/// Validates a lease contract window.
pub fn validate_lease_window(start: NaiveDate, end: NaiveDate) -> ValidationResult<()> {
    if end < start {
        return Err(ValidationError::InvalidFormat {
            field: "end_date".to_string(),
            reason: "must not be before start_date".to_string(),
        });
    }
    Ok(())
}

fn validate_required_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> ValidationResult<String> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(value.to_string())
}
