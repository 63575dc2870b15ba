//! # Receivable Repository
//!
//! Database operations for customer (accounts receivable) invoices.
//!
//! Listing goes through [`ReceivableFilter`](crate::filter::ReceivableFilter)
//! so the screen and its CSV export share one query path.

use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{DbError, DbResult};
use crate::filter::ReceivableFilter;
use vetfin_core::ReceivableInvoice;

const SELECT_INVOICE: &str = "SELECT id, issue_date, due_date, customer, number, category, \
     amount_cents, notes, paid, paid_date FROM ar_invoices";

/// Repository for accounts-receivable database operations.
#[derive(Debug, Clone)]
pub struct ReceivableRepository {
    pool: SqlitePool,
}

impl ReceivableRepository {
    /// Creates a new ReceivableRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReceivableRepository { pool }
    }

    /// Inserts an invoice, returning the assigned id.
    pub async fn insert(&self, invoice: &ReceivableInvoice) -> DbResult<i64> {
        debug!(customer = %invoice.customer, amount = invoice.amount_cents, "Inserting AR invoice");

        let result = sqlx::query(
            "INSERT INTO ar_invoices \
             (issue_date, due_date, customer, number, category, amount_cents, notes, paid, paid_date) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(invoice.issue_date)
        .bind(invoice.due_date)
        .bind(&invoice.customer)
        .bind(&invoice.number)
        .bind(&invoice.category)
        .bind(invoice.amount_cents)
        .bind(&invoice.notes)
        .bind(invoice.paid)
        .bind(invoice.paid_date)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Gets an invoice by id.
    pub async fn get(&self, id: i64) -> DbResult<Option<ReceivableInvoice>> {
        let invoice =
            sqlx::query_as::<_, ReceivableInvoice>(&format!("{SELECT_INVOICE} WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(invoice)
    }

    /// Lists invoices matching a filter, newest first. A settled invoice
    /// sorts by the day the money arrived, an open one by its issue date.
    pub async fn list(&self, filter: &ReceivableFilter) -> DbResult<Vec<ReceivableInvoice>> {
        debug!(?filter, "Listing AR invoices");

        let mut qb: QueryBuilder<'_, Sqlite> =
            QueryBuilder::new(format!("{SELECT_INVOICE} WHERE 1 = 1"));
        filter.push_where(&mut qb);
        qb.push(" ORDER BY CASE WHEN paid = 1 THEN paid_date ELSE issue_date END DESC, id DESC");

        let invoices = qb
            .build_query_as::<ReceivableInvoice>()
            .fetch_all(&self.pool)
            .await?;

        Ok(invoices)
    }

    /// Updates all invoice fields.
    pub async fn update(&self, invoice: &ReceivableInvoice) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE ar_invoices SET issue_date = ?1, due_date = ?2, customer = ?3, \
             number = ?4, category = ?5, amount_cents = ?6, notes = ?7, paid = ?8, \
             paid_date = ?9 WHERE id = ?10",
        )
        .bind(invoice.issue_date)
        .bind(invoice.due_date)
        .bind(&invoice.customer)
        .bind(&invoice.number)
        .bind(&invoice.category)
        .bind(invoice.amount_cents)
        .bind(&invoice.notes)
        .bind(invoice.paid)
        .bind(invoice.paid_date)
        .bind(invoice.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("AR invoice", invoice.id));
        }
        Ok(())
    }

    /// Marks an invoice paid on the given date.
    pub async fn mark_paid(&self, id: i64, paid_date: NaiveDate) -> DbResult<()> {
        debug!(id, %paid_date, "Marking AR invoice paid");

        let result =
            sqlx::query("UPDATE ar_invoices SET paid = 1, paid_date = ?1 WHERE id = ?2")
                .bind(paid_date)
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("AR invoice", id));
        }
        Ok(())
    }

    /// Reverts an invoice to unpaid, clearing its paid date.
    pub async fn mark_unpaid(&self, id: i64) -> DbResult<()> {
        let result =
            sqlx::query("UPDATE ar_invoices SET paid = 0, paid_date = NULL WHERE id = ?1")
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("AR invoice", id));
        }
        Ok(())
    }

    /// Deletes an invoice.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM ar_invoices WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("AR invoice", id));
        }
        Ok(())
    }

    /// Sum of invoices collected inside a window, in grosz. Scoped by paid
    /// date, matching the AP side.
    pub async fn paid_total_between(&self, from: NaiveDate, to: NaiveDate) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount_cents), 0) FROM ar_invoices \
             WHERE paid = 1 AND paid_date BETWEEN ?1 AND ?2",
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// Per-day totals of invoices collected inside a window, grouped by paid
    /// date. Days without a collection are absent from the result.
    pub async fn daily_paid(&self, from: NaiveDate, to: NaiveDate) -> DbResult<Vec<(NaiveDate, i64)>> {
        let rows: Vec<(NaiveDate, i64)> = sqlx::query_as(
            "SELECT paid_date, SUM(amount_cents) FROM ar_invoices \
             WHERE paid = 1 AND paid_date BETWEEN ?1 AND ?2 \
             GROUP BY paid_date ORDER BY paid_date",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// All unpaid invoices, earliest due first. Input for the aging report.
    pub async fn outstanding(&self) -> DbResult<Vec<ReceivableInvoice>> {
        let invoices = sqlx::query_as::<_, ReceivableInvoice>(&format!(
            "{SELECT_INVOICE} WHERE paid = 0 ORDER BY due_date, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }
}
