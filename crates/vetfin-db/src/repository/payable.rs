//! # Payable Repository
//!
//! Database operations for supplier (accounts payable) invoices.

use chrono::{Days, NaiveDate};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use vetfin_core::PayableInvoice;

const SELECT_INVOICE: &str = "SELECT id, invoice_date, due_date, supplier, number, category, \
     amount_cents, notes, paid, paid_date FROM ap_invoices";

/// Repository for accounts-payable database operations.
#[derive(Debug, Clone)]
pub struct PayableRepository {
    pool: SqlitePool,
}

impl PayableRepository {
    /// Creates a new PayableRepository.
    pub fn new(pool: SqlitePool) -> Self {
        PayableRepository { pool }
    }

    /// Inserts an invoice, returning the assigned id.
    pub async fn insert(&self, invoice: &PayableInvoice) -> DbResult<i64> {
        debug!(supplier = %invoice.supplier, amount = invoice.amount_cents, "Inserting AP invoice");

        let result = sqlx::query(
            "INSERT INTO ap_invoices \
             (invoice_date, due_date, supplier, number, category, amount_cents, notes, paid, paid_date) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        )
        .bind(invoice.invoice_date)
        .bind(invoice.due_date)
        .bind(&invoice.supplier)
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
    pub async fn get(&self, id: i64) -> DbResult<Option<PayableInvoice>> {
        let invoice = sqlx::query_as::<_, PayableInvoice>(&format!("{SELECT_INVOICE} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(invoice)
    }

    /// Lists invoices dated inside a window, newest first.
    pub async fn list_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        unpaid_only: bool,
    ) -> DbResult<Vec<PayableInvoice>> {
        debug!(%from, %to, unpaid_only, "Listing AP invoices");

        let sql = if unpaid_only {
            format!(
                "{SELECT_INVOICE} WHERE invoice_date BETWEEN ?1 AND ?2 AND paid = 0 \
                 ORDER BY invoice_date DESC, id DESC"
            )
        } else {
            format!(
                "{SELECT_INVOICE} WHERE invoice_date BETWEEN ?1 AND ?2 \
                 ORDER BY invoice_date DESC, id DESC"
            )
        };

        let invoices = sqlx::query_as::<_, PayableInvoice>(&sql)
            .bind(from)
            .bind(to)
            .fetch_all(&self.pool)
            .await?;

        Ok(invoices)
    }

    /// Updates all invoice fields.
    pub async fn update(&self, invoice: &PayableInvoice) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE ap_invoices SET invoice_date = ?1, due_date = ?2, supplier = ?3, \
             number = ?4, category = ?5, amount_cents = ?6, notes = ?7, paid = ?8, \
             paid_date = ?9 WHERE id = ?10",
        )
        .bind(invoice.invoice_date)
        .bind(invoice.due_date)
        .bind(&invoice.supplier)
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
            return Err(DbError::not_found("AP invoice", invoice.id));
        }
        Ok(())
    }

    /// Marks an invoice paid on the given date.
    pub async fn mark_paid(&self, id: i64, paid_date: NaiveDate) -> DbResult<()> {
        debug!(id, %paid_date, "Marking AP invoice paid");

        let result =
            sqlx::query("UPDATE ap_invoices SET paid = 1, paid_date = ?1 WHERE id = ?2")
                .bind(paid_date)
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("AP invoice", id));
        }
        Ok(())
    }

    /// Reverts an invoice to unpaid, clearing its paid date.
    pub async fn mark_unpaid(&self, id: i64) -> DbResult<()> {
        let result =
            sqlx::query("UPDATE ap_invoices SET paid = 0, paid_date = NULL WHERE id = ?1")
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("AP invoice", id));
        }
        Ok(())
    }

    /// Deletes an invoice.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM ap_invoices WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("AP invoice", id));
        }
        Ok(())
    }

    /// Sum of invoices paid inside a window, in grosz.
    ///
    /// Scoped by paid date, not invoice date: the monthly summary counts
    /// money when it leaves the account.
    pub async fn paid_total_between(&self, from: NaiveDate, to: NaiveDate) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount_cents), 0) FROM ap_invoices \
             WHERE paid = 1 AND paid_date BETWEEN ?1 AND ?2",
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// Per-day totals of invoices settled inside a window, grouped by paid
    /// date. Days without a payment are absent from the result.
    pub async fn daily_paid(&self, from: NaiveDate, to: NaiveDate) -> DbResult<Vec<(NaiveDate, i64)>> {
        let rows: Vec<(NaiveDate, i64)> = sqlx::query_as(
            "SELECT paid_date, SUM(amount_cents) FROM ap_invoices \
             WHERE paid = 1 AND paid_date BETWEEN ?1 AND ?2 \
             GROUP BY paid_date ORDER BY paid_date",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Unpaid invoices falling due in the next `days` days, most urgent
    /// first. Already-overdue invoices are outside the window; they show
    /// in the unpaid listing instead.
    pub async fn due_within(&self, today: NaiveDate, days: u64) -> DbResult<Vec<PayableInvoice>> {
        let horizon = today
            .checked_add_days(Days::new(days))
            .unwrap_or(NaiveDate::MAX);

        let invoices = sqlx::query_as::<_, PayableInvoice>(&format!(
            "{SELECT_INVOICE} WHERE paid = 0 AND due_date BETWEEN ?1 AND ?2 ORDER BY due_date, id"
        ))
        .bind(today)
        .bind(horizon)
        .fetch_all(&self.pool)
        .await?;

        Ok(invoices)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn invoice(invoice_date: &str, due_date: &str, supplier: &str, amount: i64) -> PayableInvoice {
        PayableInvoice {
            id: 0,
            invoice_date: d(invoice_date),
            due_date: d(due_date),
            supplier: supplier.to_string(),
            number: None,
            category: None,
            amount_cents: amount,
            notes: None,
            paid: false,
            paid_date: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_mark_paid() {
        let db = test_db().await;
        let repo = db.payables();

        let id = repo
            .insert(&invoice("2024-05-02", "2024-05-16", "VetSupply", 45_000))
            .await
            .unwrap();

        repo.mark_paid(id, d("2024-05-20")).await.unwrap();

        let found = repo.get(id).await.unwrap().unwrap();
        assert!(found.paid);
        assert_eq!(found.paid_date, Some(d("2024-05-20")));
    }

    #[tokio::test]
    async fn test_paid_total_scoped_by_paid_date() {
        let db = test_db().await;
        let repo = db.payables();

        // Dated April, settled in May: counts toward May.
        let id = repo
            .insert(&invoice("2024-04-25", "2024-05-09", "VetSupply", 30_000))
            .await
            .unwrap();
        repo.mark_paid(id, d("2024-05-03")).await.unwrap();

        // Still unpaid: counts toward nothing.
        repo.insert(&invoice("2024-05-10", "2024-05-24", "LabCo", 99_000))
            .await
            .unwrap();

        let april = repo
            .paid_total_between(d("2024-04-01"), d("2024-04-30"))
            .await
            .unwrap();
        let may = repo
            .paid_total_between(d("2024-05-01"), d("2024-05-31"))
            .await
            .unwrap();

        assert_eq!(april, 0);
        assert_eq!(may, 30_000);
    }

    #[tokio::test]
    async fn test_daily_paid_groups_by_settlement_day() {
        let db = test_db().await;
        let repo = db.payables();

        let a = repo
            .insert(&invoice("2024-05-01", "2024-05-15", "VetSupply", 10_000))
            .await
            .unwrap();
        let b = repo
            .insert(&invoice("2024-05-02", "2024-05-16", "LabCo", 5_000))
            .await
            .unwrap();
        let c = repo
            .insert(&invoice("2024-05-03", "2024-05-17", "VetSupply", 7_000))
            .await
            .unwrap();

        repo.mark_paid(a, d("2024-05-10")).await.unwrap();
        repo.mark_paid(b, d("2024-05-10")).await.unwrap();
        repo.mark_paid(c, d("2024-05-12")).await.unwrap();

        let daily = repo
            .daily_paid(d("2024-05-01"), d("2024-05-31"))
            .await
            .unwrap();
        assert_eq!(daily, vec![(d("2024-05-10"), 15_000), (d("2024-05-12"), 7_000)]);
    }

    #[tokio::test]
    async fn test_due_within_is_a_forward_window() {
        let db = test_db().await;
        let repo = db.payables();

        // Already overdue: not in the forward window.
        repo.insert(&invoice("2024-04-01", "2024-04-15", "Overdue Co", 1_000))
            .await
            .unwrap();
        repo.insert(&invoice("2024-05-01", "2024-05-10", "Today Co", 1_500))
            .await
            .unwrap();
        repo.insert(&invoice("2024-05-01", "2024-05-12", "Soon Co", 2_000))
            .await
            .unwrap();
        repo.insert(&invoice("2024-05-01", "2024-07-01", "Later Co", 3_000))
            .await
            .unwrap();

        let due = repo.due_within(d("2024-05-10"), 7).await.unwrap();
        let suppliers: Vec<&str> = due.iter().map(|i| i.supplier.as_str()).collect();
        assert_eq!(suppliers, vec!["Today Co", "Soon Co"]);

        // Settling drops an invoice out of the due list.
        repo.mark_paid(due[0].id, d("2024-05-10")).await.unwrap();
        let due = repo.due_within(d("2024-05-10"), 7).await.unwrap();
        let suppliers: Vec<&str> = due.iter().map(|i| i.supplier.as_str()).collect();
        assert_eq!(suppliers, vec!["Soon Co"]);
    }

    #[tokio::test]
    async fn test_mark_paid_missing_row_is_not_found() {
        let db = test_db().await;
        let err = db.payables().mark_paid(404, d("2024-05-01")).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }
}
