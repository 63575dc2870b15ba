//! # Reception Screen
//!
//! Daily shift entry: date, morning or afternoon, cash and terminal
//! takings, the attending veterinarian, and the technician crew. Staff
//! pickers are fed from the active roster.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

use crate::error::ScreenError;
use crate::session::Session;
use vetfin_core::validation::{validate_crew, validate_person_name};
use vetfin_core::{
    Employee, EmployeeRole, Shift, ShiftReport, ShiftReportWithCrew, ValidationError, YearMonth,
};
use vetfin_db::Database;

/// The shift entry form.
#[derive(Debug, Clone, Deserialize)]
pub struct ShiftForm {
    pub report_date: NaiveDate,
    pub shift: Shift,
    pub cash_cents: i64,
    pub terminal_cents: i64,
    pub veterinarian: String,
    pub technicians: Vec<String>,
    pub notes: Option<String>,
}

/// Options for the staff pickers: active veterinarians and technicians.
#[derive(Debug, Clone, Default)]
pub struct CrewOptions {
    pub veterinarians: Vec<String>,
    pub technicians: Vec<String>,
}

/// Validates and saves a shift report. Returns the new report id.
pub async fn submit_shift(db: &Database, form: ShiftForm) -> Result<i64, ScreenError> {
    let (report, technicians) = validate_form(&form)?;
    let id = db.shifts().insert(&report, &technicians).await?;
    Ok(id)
}

/// Validates and overwrites an existing report and its crew.
pub async fn update_shift(db: &Database, id: i64, form: ShiftForm) -> Result<(), ScreenError> {
    let (mut report, technicians) = validate_form(&form)?;
    report.id = id;
    db.shifts().update(&report, &technicians).await?;
    Ok(())
}

/// Deletes a report; the crew rows cascade away with it. Admin only.
pub async fn delete_shift(db: &Database, session: &Session, id: i64) -> Result<(), ScreenError> {
    session.require_admin()?;
    db.shifts().delete(id).await?;
    Ok(())
}

/// The month's reports for the listing table, newest first. Degrades to
/// empty on store failure.
pub async fn month_reports(db: &Database, month: YearMonth) -> Vec<ShiftReportWithCrew> {
    let (first, last) = month.bounds();
    match db.shifts().list_between(first, last).await {
        Ok(reports) => reports,
        Err(err) => {
            warn!(error = %err, %month, "Shift listing unavailable, rendering empty");
            Vec::new()
        }
    }
}

/// Picker options from the active roster. Degrades to empty pickers.
pub async fn crew_options(db: &Database) -> CrewOptions {
    let employees = db.employees();
    let veterinarians = employees.names_by_role(EmployeeRole::Veterinarian);
    let technicians = employees.names_by_role(EmployeeRole::Technician);

    match tokio::try_join!(veterinarians, technicians) {
        Ok((veterinarians, technicians)) => CrewOptions {
            veterinarians,
            technicians,
        },
        Err(err) => {
            warn!(error = %err, "Roster unavailable, rendering empty pickers");
            CrewOptions::default()
        }
    }
}

/// Adds a staff member from the reception desk so a new hire can appear
/// on the shift form without waiting for the owner. The salary stays zero
/// until admin fills it in on the employees screen.
pub async fn quick_add_staff(
    db: &Database,
    name: &str,
    role: EmployeeRole,
) -> Result<i64, ScreenError> {
    let name = validate_person_name(name)?;
    let id = db
        .employees()
        .insert(&Employee {
            id: 0,
            name,
            role,
            monthly_salary_cents: 0,
            active: true,
        })
        .await?;
    Ok(id)
}

fn validate_form(form: &ShiftForm) -> Result<(ShiftReport, Vec<String>), ScreenError> {
    let veterinarian = validate_person_name(&form.veterinarian)?;

    let technicians: Vec<String> = form
        .technicians
        .iter()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect();
    validate_crew(&technicians)?;

    non_negative("cash", form.cash_cents)?;
    non_negative("terminal", form.terminal_cents)?;

    let report = ShiftReport {
        id: 0,
        report_date: form.report_date,
        shift: form.shift,
        cash_cents: form.cash_cents,
        terminal_cents: form.terminal_cents,
        veterinarian,
        notes: form.notes.clone(),
    };
    Ok((report, technicians))
}

// A zero-takings shift is legal (slow day); negatives are typos.
fn non_negative(field: &'static str, cents: i64) -> Result<(), ValidationError> {
    if cents < 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}
