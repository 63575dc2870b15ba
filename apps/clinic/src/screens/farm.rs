//! # Farm Screen
//!
//! Livestock work: warehouse and field entries, viewed one month at a
//! time. Tracked on its own, outside the clinic summary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ScreenError;
use crate::session::Session;
use vetfin_core::validation::validate_amount_cents;
use vetfin_core::{FarmEntryKind, FarmReport, Money, YearMonth};
use vetfin_db::Database;

/// The livestock entry form.
#[derive(Debug, Clone, Deserialize)]
pub struct FarmForm {
    pub report_date: NaiveDate,
    pub kind: FarmEntryKind,
    pub amount_cents: i64,
    pub notes: Option<String>,
}

/// One month of livestock entries with per-kind totals.
#[derive(Debug, Clone, Serialize)]
pub struct FarmMonth {
    pub month: YearMonth,
    pub entries: Vec<FarmReport>,
    pub warehouse_total: Money,
    pub field_total: Money,
    pub total: Money,
}

/// Validates and saves an entry. Returns the new id.
pub async fn record_entry(db: &Database, form: FarmForm) -> Result<i64, ScreenError> {
    validate_amount_cents("amount", form.amount_cents)?;

    let report = FarmReport {
        id: 0,
        report_date: form.report_date,
        kind: form.kind,
        amount_cents: form.amount_cents,
        notes: form.notes,
    };
    let id = db.farm().insert(&report).await?;
    Ok(id)
}

/// Deletes an entry. Admin only.
pub async fn remove(db: &Database, session: &Session, id: i64) -> Result<(), ScreenError> {
    session.require_admin()?;
    db.farm().delete(id).await?;
    Ok(())
}

/// Assembles one month of livestock entries. Degrades to an empty month
/// on store failure.
pub async fn month(db: &Database, month: YearMonth) -> FarmMonth {
    let (first, last) = month.bounds();
    let repo = db.farm();

    let fetched = tokio::try_join!(
        repo.list_between(first, last),
        repo.total_between(first, last, Some(FarmEntryKind::Warehouse)),
        repo.total_between(first, last, Some(FarmEntryKind::Field)),
    );

    match fetched {
        Ok((entries, warehouse, field)) => {
            let warehouse_total = Money::from_cents(warehouse);
            let field_total = Money::from_cents(field);
            FarmMonth {
                month,
                entries,
                warehouse_total,
                field_total,
                total: warehouse_total + field_total,
            }
        }
        Err(err) => {
            warn!(error = %err, %month, "Farm month unavailable, rendering empty");
            FarmMonth {
                month,
                entries: Vec::new(),
                warehouse_total: Money::zero(),
                field_total: Money::zero(),
                total: Money::zero(),
            }
        }
    }
}
