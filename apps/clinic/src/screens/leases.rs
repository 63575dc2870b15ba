//! # Leases Screen
//!
//! Equipment leases. Admin only: installments feed straight into the
//! monthly cost side, so the desk account cannot touch them.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

use crate::error::ScreenError;
use crate::session::Session;
use vetfin_core::validation::{validate_amount_cents, validate_counterparty, validate_lease_window};
use vetfin_core::{Lease, YearMonth};
use vetfin_db::Database;

/// The lease form.
#[derive(Debug, Clone, Deserialize)]
pub struct LeaseForm {
    pub name: String,
    pub monthly_amount_cents: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub notes: Option<String>,
}

/// Validates and saves a lease. Returns the new id.
pub async fn submit_lease(
    db: &Database,
    session: &Session,
    form: LeaseForm,
) -> Result<i64, ScreenError> {
    session.require_admin()?;
    let lease = validate_form(&form)?;
    let id = db.leases().insert(&lease).await?;
    Ok(id)
}

/// Validates and overwrites an existing lease.
pub async fn update_lease(
    db: &Database,
    session: &Session,
    id: i64,
    form: LeaseForm,
) -> Result<(), ScreenError> {
    session.require_admin()?;
    let mut lease = validate_form(&form)?;
    lease.id = id;
    db.leases().update(&lease).await?;
    Ok(())
}

/// Deletes a lease.
pub async fn remove(db: &Database, session: &Session, id: i64) -> Result<(), ScreenError> {
    session.require_admin()?;
    db.leases().delete(id).await?;
    Ok(())
}

/// All leases for the listing. Degrades to empty on store failure.
pub async fn all_leases(db: &Database, session: &Session) -> Result<Vec<Lease>, ScreenError> {
    session.require_admin()?;
    match db.leases().list_all().await {
        Ok(leases) => Ok(leases),
        Err(err) => {
            warn!(error = %err, "Lease listing unavailable, rendering empty");
            Ok(Vec::new())
        }
    }
}

/// Leases billed in the given month, with names; the screen shows which
/// contracts make up the month's installment total.
pub async fn active_in_month(
    db: &Database,
    session: &Session,
    month: YearMonth,
) -> Result<Vec<Lease>, ScreenError> {
    session.require_admin()?;
    let (first, last) = month.bounds();
    match db.leases().active_in(first, last).await {
        Ok(leases) => Ok(leases),
        Err(err) => {
            warn!(error = %err, %month, "Active-lease listing unavailable, rendering empty");
            Ok(Vec::new())
        }
    }
}

fn validate_form(form: &LeaseForm) -> Result<Lease, ScreenError> {
    let name = validate_counterparty("name", &form.name)?;
    validate_amount_cents("monthly_amount", form.monthly_amount_cents)?;
    validate_lease_window(form.start_date, form.end_date)?;

    Ok(Lease {
        id: 0,
        name,
        monthly_amount_cents: form.monthly_amount_cents,
        start_date: form.start_date,
        end_date: form.end_date,
        notes: form.notes.clone(),
    })
}
