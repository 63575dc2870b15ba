//! # Employees Screen
//!
//! The staff roster. Admin only: salaries are the biggest line on the
//! cost side. People who leave are deactivated so historical shift
//! reports keep resolving by name; hard delete is for typo rows only.

use serde::Deserialize;
use tracing::warn;

use crate::error::ScreenError;
use crate::session::Session;
use vetfin_core::validation::{validate_non_negative_cents, validate_person_name};
use vetfin_core::{attribute_shift_revenue, Employee, EmployeeRole, StaffMonthlyStats, YearMonth};
use vetfin_db::Database;

/// The hire form.
#[derive(Debug, Clone, Deserialize)]
pub struct EmployeeForm {
    pub name: String,
    pub role: EmployeeRole,
    pub monthly_salary_cents: i64,
}

/// Validates and adds a new roster member. Returns the new id. Duplicate
/// names surface as a validation error.
pub async fn hire(
    db: &Database,
    session: &Session,
    form: EmployeeForm,
) -> Result<i64, ScreenError> {
    session.require_admin()?;

    let name = validate_person_name(&form.name)?;
    // Zero is legal: quick-added staff start without an agreed salary.
    validate_non_negative_cents("monthly_salary", form.monthly_salary_cents)?;

    let employee = Employee {
        id: 0,
        name,
        role: form.role,
        monthly_salary_cents: form.monthly_salary_cents,
        active: true,
    };
    let id = db.employees().insert(&employee).await?;
    Ok(id)
}

/// Changes a roster member's role or salary.
pub async fn update_terms(
    db: &Database,
    session: &Session,
    id: i64,
    role: EmployeeRole,
    monthly_salary_cents: i64,
) -> Result<(), ScreenError> {
    session.require_admin()?;
    validate_non_negative_cents("monthly_salary", monthly_salary_cents)?;

    let mut employee = db
        .employees()
        .get(id)
        .await?
        .ok_or_else(|| ScreenError::from(vetfin_db::DbError::not_found("employee", id)))?;
    employee.role = role;
    employee.monthly_salary_cents = monthly_salary_cents;
    db.employees().update(&employee).await?;
    Ok(())
}

/// Takes someone off the active roster; their salary stops counting and
/// they disappear from the shift-form pickers.
pub async fn deactivate(db: &Database, session: &Session, id: i64) -> Result<(), ScreenError> {
    session.require_admin()?;
    db.employees().set_active(id, false).await?;
    Ok(())
}

/// Puts someone back on the active roster.
pub async fn reactivate(db: &Database, session: &Session, id: i64) -> Result<(), ScreenError> {
    session.require_admin()?;
    db.employees().set_active(id, true).await?;
    Ok(())
}

/// Removes a roster row entirely. Meant for misspelled or duplicate
/// entries; a real departure goes through [`deactivate`].
pub async fn remove(db: &Database, session: &Session, id: i64) -> Result<(), ScreenError> {
    session.require_admin()?;
    db.employees().delete(id).await?;
    Ok(())
}

/// Per-person shift counts and attributed revenue for one month, highest
/// revenue first. Every active roster member appears, zeros included.
pub async fn monthly_attribution(
    db: &Database,
    session: &Session,
    month: YearMonth,
) -> Result<Vec<StaffMonthlyStats>, ScreenError> {
    session.require_admin()?;

    let (first, last) = month.bounds();
    let employees = db.employees();
    let shifts = db.shifts();
    let (roster, stats) = tokio::try_join!(employees.roster(), shifts.shift_stats(first, last))?;
    Ok(attribute_shift_revenue(&roster, &stats))
}

/// The full roster, former staff included. Degrades to empty on store
/// failure.
pub async fn full_roster(db: &Database, session: &Session) -> Result<Vec<Employee>, ScreenError> {
    session.require_admin()?;
    match db.employees().list_all().await {
        Ok(employees) => Ok(employees),
        Err(err) => {
            warn!(error = %err, "Roster listing unavailable, rendering empty");
            Ok(Vec::new())
        }
    }
}
