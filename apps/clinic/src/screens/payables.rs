//! # Payables Screen
//!
//! Supplier invoices: entry, monthly listing with an unpaid-only toggle,
//! settling, and the due-soon box shown at the top of the screen.

use chrono::NaiveDate;
use serde::Deserialize;
use tracing::warn;

use crate::error::ScreenError;
use crate::session::Session;
use vetfin_core::validation::{validate_amount_cents, validate_counterparty};
use vetfin_core::{PayableInvoice, ValidationError, YearMonth};
use vetfin_db::Database;

/// Default horizon of the due-soon box; the screen offers 7 to 60 days.
pub const DEFAULT_DUE_SOON_DAYS: u64 = 14;

/// The supplier invoice form.
#[derive(Debug, Clone, Deserialize)]
pub struct PayableForm {
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    pub supplier: String,
    pub number: Option<String>,
    pub category: Option<String>,
    pub amount_cents: i64,
    pub notes: Option<String>,
}

/// Validates and saves a supplier invoice. Returns the new id.
pub async fn submit_invoice(db: &Database, form: PayableForm) -> Result<i64, ScreenError> {
    let invoice = validate_form(&form)?;
    let id = db.payables().insert(&invoice).await?;
    Ok(id)
}

/// Validates and overwrites an existing invoice. Paid state is managed
/// through [`settle`] / [`reopen`] and survives the edit.
pub async fn update_invoice(db: &Database, id: i64, form: PayableForm) -> Result<(), ScreenError> {
    let current = db
        .payables()
        .get(id)
        .await?
        .ok_or_else(|| ScreenError::from(vetfin_db::DbError::not_found("AP invoice", id)))?;

    let mut invoice = validate_form(&form)?;
    invoice.id = id;
    invoice.paid = current.paid;
    invoice.paid_date = current.paid_date;
    db.payables().update(&invoice).await?;
    Ok(())
}

/// Marks an invoice paid on the given date. Only the owner settles
/// supplier invoices.
pub async fn settle(
    db: &Database,
    session: &Session,
    id: i64,
    paid_date: NaiveDate,
) -> Result<(), ScreenError> {
    session.require_admin()?;
    db.payables().mark_paid(id, paid_date).await?;
    Ok(())
}

/// Reverts an invoice to unpaid. Admin only.
pub async fn reopen(db: &Database, session: &Session, id: i64) -> Result<(), ScreenError> {
    session.require_admin()?;
    db.payables().mark_unpaid(id).await?;
    Ok(())
}

/// Deletes an invoice. Admin only.
pub async fn remove(db: &Database, session: &Session, id: i64) -> Result<(), ScreenError> {
    session.require_admin()?;
    db.payables().delete(id).await?;
    Ok(())
}

/// The month's invoices, newest first. Degrades to empty on store failure.
pub async fn month_invoices(
    db: &Database,
    month: YearMonth,
    unpaid_only: bool,
) -> Vec<PayableInvoice> {
    let (first, last) = month.bounds();
    match db.payables().list_between(first, last, unpaid_only).await {
        Ok(invoices) => invoices,
        Err(err) => {
            warn!(error = %err, %month, "AP listing unavailable, rendering empty");
            Vec::new()
        }
    }
}

/// Unpaid invoices falling due within `horizon_days` of `today`, most
/// urgent first. Degrades to empty on store failure.
pub async fn due_soon(db: &Database, today: NaiveDate, horizon_days: u64) -> Vec<PayableInvoice> {
    match db.payables().due_within(today, horizon_days).await {
        Ok(invoices) => invoices,
        Err(err) => {
            warn!(error = %err, "Due-soon box unavailable, rendering empty");
            Vec::new()
        }
    }
}

fn validate_form(form: &PayableForm) -> Result<PayableInvoice, ScreenError> {
    let supplier = validate_counterparty("supplier", &form.supplier)?;
    validate_amount_cents("amount", form.amount_cents)?;

    if form.due_date < form.invoice_date {
        return Err(ValidationError::InvalidFormat {
            field: "due_date".to_string(),
            reason: "due date precedes the invoice date".to_string(),
        }
        .into());
    }

    Ok(PayableInvoice {
        id: 0,
        invoice_date: form.invoice_date,
        due_date: form.due_date,
        supplier,
        number: form.number.clone(),
        category: form.category.clone(),
        amount_cents: form.amount_cents,
        notes: form.notes.clone(),
        paid: false,
        paid_date: None,
    })
}
