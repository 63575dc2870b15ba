//! # Receivables Screen
//!
//! Customer invoices: entry, the filtered listing, settling, the aging
//! report, and CSV export for the accountant. The listing and the export
//! share one [`ReceivableFilter`] so what you see is what you export.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

use crate::error::ScreenError;
use crate::export;
use crate::session::Session;
use vetfin_core::validation::{validate_amount_cents, validate_counterparty, validate_paid_date};
use vetfin_core::{AgingReport, ReceivableInvoice, ValidationError};
use vetfin_db::{Database, ReceivableFilter};

/// The customer invoice form.
#[derive(Debug, Clone, Deserialize)]
pub struct ReceivableForm {
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub customer: String,
    pub number: Option<String>,
    pub category: Option<String>,
    pub amount_cents: i64,
    pub notes: Option<String>,
    /// Set when recording an invoice the customer settled on the spot.
    #[serde(default)]
    pub paid: bool,
    #[serde(default)]
    pub paid_date: Option<NaiveDate>,
}

/// Validates and saves a customer invoice. Returns the new id.
pub async fn submit_invoice(db: &Database, form: ReceivableForm) -> Result<i64, ScreenError> {
    let invoice = validate_form(&form)?;
    let id = db.receivables().insert(&invoice).await?;
    Ok(id)
}

/// Validates and overwrites an existing invoice, preserving paid state.
pub async fn update_invoice(
    db: &Database,
    id: i64,
    form: ReceivableForm,
) -> Result<(), ScreenError> {
    let current = db
        .receivables()
        .get(id)
        .await?
        .ok_or_else(|| ScreenError::from(vetfin_db::DbError::not_found("AR invoice", id)))?;

    let mut invoice = validate_form(&form)?;
    invoice.id = id;
    invoice.paid = current.paid;
    invoice.paid_date = current.paid_date;
    db.receivables().update(&invoice).await?;
    Ok(())
}

/// Marks an invoice collected on the given date. The desk records
/// incoming payments, so no gate here.
pub async fn settle(db: &Database, id: i64, paid_date: NaiveDate) -> Result<(), ScreenError> {
    db.receivables().mark_paid(id, paid_date).await?;
    Ok(())
}

/// Reverts an invoice to unpaid. Admin only.
pub async fn reopen(db: &Database, session: &Session, id: i64) -> Result<(), ScreenError> {
    session.require_admin()?;
    db.receivables().mark_unpaid(id).await?;
    Ok(())
}

/// Deletes an invoice. Admin only.
pub async fn remove(db: &Database, session: &Session, id: i64) -> Result<(), ScreenError> {
    session.require_admin()?;
    db.receivables().delete(id).await?;
    Ok(())
}

/// The filtered listing, newest first. Degrades to empty on store failure.
pub async fn list(db: &Database, filter: &ReceivableFilter) -> Vec<ReceivableInvoice> {
    match db.receivables().list(filter).await {
        Ok(invoices) => invoices,
        Err(err) => {
            warn!(error = %err, "AR listing unavailable, rendering empty");
            Vec::new()
        }
    }
}

/// Renders the current listing as CSV. An explicit action, so failures
/// propagate instead of degrading to an empty file.
pub async fn export_csv(db: &Database, filter: &ReceivableFilter) -> Result<String, ScreenError> {
    let invoices = db.receivables().list(filter).await?;
    Ok(export::receivables_csv(&invoices))
}

/// Buckets every unpaid invoice by days past due as of `as_of`.
pub async fn aging(db: &Database, as_of: NaiveDate) -> Result<AgingReport, ScreenError> {
    let unpaid = db.receivables().outstanding().await?;
    Ok(AgingReport::build(as_of, &unpaid))
}

fn validate_form(form: &ReceivableForm) -> Result<ReceivableInvoice, ScreenError> {
    let customer = validate_counterparty("customer", &form.customer)?;
    validate_amount_cents("amount", form.amount_cents)?;
    validate_paid_date(form.paid, form.paid_date)?;

    if form.due_date < form.issue_date {
        return Err(ValidationError::InvalidFormat {
            field: "due_date".to_string(),
            reason: "due date precedes the issue date".to_string(),
        }
        .into());
    }

    Ok(ReceivableInvoice {
        id: 0,
        issue_date: form.issue_date,
        due_date: form.due_date,
        customer,
        number: form.number.clone(),
        category: form.category.clone(),
        amount_cents: form.amount_cents,
        notes: form.notes.clone(),
        paid: form.paid,
        paid_date: form.paid_date,
    })
}
