//! # Shop Repository
//!
//! Database operations for the retail shop: daily takings and purchase
//! invoices. The shop is tracked on its own and does not feed the clinic
//! monthly summary.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use vetfin_core::{ShopExpense, ShopSale};

/// Repository for shop database operations.
#[derive(Debug, Clone)]
pub struct ShopRepository {
    pool: SqlitePool,
}

impl ShopRepository {
    /// Creates a new ShopRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ShopRepository { pool }
    }

    // =========================================================================
    // Sales
    // =========================================================================

    /// Inserts a takings entry, returning the assigned id.
    pub async fn insert_sale(&self, sale: &ShopSale) -> DbResult<i64> {
        debug!(date = %sale.sale_date, "Inserting shop sale");

        let result = sqlx::query(
            "INSERT INTO shop_sales (sale_date, cash_cents, terminal_cents) VALUES (?1, ?2, ?3)",
        )
        .bind(sale.sale_date)
        .bind(sale.cash_cents)
        .bind(sale.terminal_cents)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Takings entries in a window, newest first.
    pub async fn sales_between(&self, from: NaiveDate, to: NaiveDate) -> DbResult<Vec<ShopSale>> {
        let sales = sqlx::query_as::<_, ShopSale>(
            "SELECT id, sale_date, cash_cents, terminal_cents FROM shop_sales \
             WHERE sale_date BETWEEN ?1 AND ?2 ORDER BY sale_date DESC, id DESC",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(sales)
    }

    /// Total takings (cash + terminal) in a window, in grosz.
    pub async fn sales_total_between(&self, from: NaiveDate, to: NaiveDate) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(cash_cents + terminal_cents), 0) FROM shop_sales \
             WHERE sale_date BETWEEN ?1 AND ?2",
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// Per-day takings totals in a window. Days without a sale are absent
    /// from the result.
    pub async fn daily_sales(&self, from: NaiveDate, to: NaiveDate) -> DbResult<Vec<(NaiveDate, i64)>> {
        let rows: Vec<(NaiveDate, i64)> = sqlx::query_as(
            "SELECT sale_date, SUM(cash_cents + terminal_cents) FROM shop_sales \
             WHERE sale_date BETWEEN ?1 AND ?2 \
             GROUP BY sale_date ORDER BY sale_date",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Deletes a takings entry.
    pub async fn delete_sale(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM shop_sales WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("shop sale", id));
        }
        Ok(())
    }

    // =========================================================================
    // Expenses
    // =========================================================================

    /// Inserts a purchase invoice, returning the assigned id.
    pub async fn insert_expense(&self, expense: &ShopExpense) -> DbResult<i64> {
        debug!(date = %expense.expense_date, amount = expense.amount_cents, "Inserting shop expense");

        let result = sqlx::query(
            "INSERT INTO shop_expenses (expense_date, amount_cents, invoice_number, supplier, paid) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(expense.expense_date)
        .bind(expense.amount_cents)
        .bind(&expense.invoice_number)
        .bind(&expense.supplier)
        .bind(expense.paid)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Purchase invoices in a window, newest first.
    pub async fn expenses_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DbResult<Vec<ShopExpense>> {
        let expenses = sqlx::query_as::<_, ShopExpense>(
            "SELECT id, expense_date, amount_cents, invoice_number, supplier, paid \
             FROM shop_expenses WHERE expense_date BETWEEN ?1 AND ?2 \
             ORDER BY expense_date DESC, id DESC",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(expenses)
    }

    /// Total expenses in a window, in grosz.
    pub async fn expenses_total_between(&self, from: NaiveDate, to: NaiveDate) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount_cents), 0) FROM shop_expenses \
             WHERE expense_date BETWEEN ?1 AND ?2",
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// Total of settled purchase invoices in a window, in grosz.
    pub async fn paid_expenses_total_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(amount_cents), 0) FROM shop_expenses \
             WHERE paid = 1 AND expense_date BETWEEN ?1 AND ?2",
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// Per-day totals of settled purchase invoices in a window. Unpaid
    /// invoices are excluded so the shop chart shows money actually spent.
    pub async fn daily_paid_expenses(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DbResult<Vec<(NaiveDate, i64)>> {
        let rows: Vec<(NaiveDate, i64)> = sqlx::query_as(
            "SELECT expense_date, SUM(amount_cents) FROM shop_expenses \
             WHERE paid = 1 AND expense_date BETWEEN ?1 AND ?2 \
             GROUP BY expense_date ORDER BY expense_date",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Toggles the paid flag on a purchase invoice.
    pub async fn set_expense_paid(&self, id: i64, paid: bool) -> DbResult<()> {
        let result = sqlx::query("UPDATE shop_expenses SET paid = ?1 WHERE id = ?2")
            .bind(paid)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("shop expense", id));
        }
        Ok(())
    }

    /// Deletes a purchase invoice.
    pub async fn delete_expense(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM shop_expenses WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("shop expense", id));
        }
        Ok(())
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

    #[tokio::test]
    async fn test_month_totals() {
        let db = test_db().await;
        let repo = db.shop();

        repo.insert_sale(&ShopSale {
            id: 0,
            sale_date: d("2024-05-03"),
            cash_cents: 12_000,
            terminal_cents: 8_000,
        })
        .await
        .unwrap();
        repo.insert_sale(&ShopSale {
            id: 0,
            sale_date: d("2024-06-01"),
            cash_cents: 50_000,
            terminal_cents: 0,
        })
        .await
        .unwrap();
        repo.insert_expense(&ShopExpense {
            id: 0,
            expense_date: d("2024-05-15"),
            amount_cents: 7_500,
            invoice_number: Some("FV/2024/051".to_string()),
            supplier: Some("Karma-Plus".to_string()),
            paid: false,
        })
        .await
        .unwrap();

        let first = d("2024-05-01");
        let last = d("2024-05-31");
        assert_eq!(repo.sales_total_between(first, last).await.unwrap(), 20_000);
        assert_eq!(repo.expenses_total_between(first, last).await.unwrap(), 7_500);
    }

    #[tokio::test]
    async fn test_daily_series_and_paid_expense_total() {
        let db = test_db().await;
        let repo = db.shop();

        for (date, cash) in [("2024-05-03", 5_000), ("2024-05-03", 3_000), ("2024-05-07", 9_000)] {
            repo.insert_sale(&ShopSale {
                id: 0,
                sale_date: d(date),
                cash_cents: cash,
                terminal_cents: 1_000,
            })
            .await
            .unwrap();
        }
        for (date, amount, paid) in [
            ("2024-05-04", 4_000, true),
            ("2024-05-04", 2_000, false),
            ("2024-05-09", 6_000, true),
        ] {
            repo.insert_expense(&ShopExpense {
                id: 0,
                expense_date: d(date),
                amount_cents: amount,
                invoice_number: None,
                supplier: None,
                paid,
            })
            .await
            .unwrap();
        }

        let first = d("2024-05-01");
        let last = d("2024-05-31");

        let sales = repo.daily_sales(first, last).await.unwrap();
        assert_eq!(sales, vec![(d("2024-05-03"), 10_000), (d("2024-05-07"), 10_000)]);

        let expenses = repo.daily_paid_expenses(first, last).await.unwrap();
        assert_eq!(expenses, vec![(d("2024-05-04"), 4_000), (d("2024-05-09"), 6_000)]);

        assert_eq!(
            repo.paid_expenses_total_between(first, last).await.unwrap(),
            10_000
        );
    }

    #[tokio::test]
    async fn test_set_expense_paid() {
        let db = test_db().await;
        let repo = db.shop();

        let id = repo
            .insert_expense(&ShopExpense {
                id: 0,
                expense_date: d("2024-05-15"),
                amount_cents: 7_500,
                invoice_number: None,
                supplier: None,
                paid: false,
            })
            .await
            .unwrap();

        repo.set_expense_paid(id, true).await.unwrap();

        let expenses = repo
            .expenses_between(d("2024-05-01"), d("2024-05-31"))
            .await
            .unwrap();
        assert!(expenses[0].paid);
    }
}
