//! # Shop Screen
//!
//! The retail shop's own books: daily takings and purchase invoices,
//! viewed one month at a time. The shop stays out of the clinic summary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ScreenError;
use crate::session::Session;
use vetfin_core::validation::validate_amount_cents;
use vetfin_core::{fill_daily, Money, ShopExpense, ShopSale, ValidationError, YearMonth};
use vetfin_db::Database;

/// The daily takings form.
#[derive(Debug, Clone, Deserialize)]
pub struct SaleForm {
    pub sale_date: NaiveDate,
    pub cash_cents: i64,
    pub terminal_cents: i64,
}

/// The purchase invoice form.
#[derive(Debug, Clone, Deserialize)]
pub struct ExpenseForm {
    pub expense_date: NaiveDate,
    pub amount_cents: i64,
    pub invoice_number: Option<String>,
    pub supplier: Option<String>,
    pub paid: bool,
}

/// One month of the shop's books.
#[derive(Debug, Clone, Serialize)]
pub struct ShopMonth {
    pub month: YearMonth,
    pub sales: Vec<ShopSale>,
    pub expenses: Vec<ShopExpense>,
    pub sales_total: Money,
    pub expenses_total: Money,
    /// Settled purchase invoices only; the chart tracks money actually spent.
    pub paid_expenses_total: Money,
    pub net: Money,
    /// Takings per calendar day, zero-filled.
    pub daily_sales: Vec<(NaiveDate, Money)>,
    /// Settled purchase invoices per calendar day, zero-filled.
    pub daily_paid_expenses: Vec<(NaiveDate, Money)>,
}

/// Validates and saves a takings entry. Returns the new id.
pub async fn record_sale(db: &Database, form: SaleForm) -> Result<i64, ScreenError> {
    non_negative("cash", form.cash_cents)?;
    non_negative("terminal", form.terminal_cents)?;

    let sale = ShopSale {
        id: 0,
        sale_date: form.sale_date,
        cash_cents: form.cash_cents,
        terminal_cents: form.terminal_cents,
    };
    let id = db.shop().insert_sale(&sale).await?;
    Ok(id)
}

/// Validates and saves a purchase invoice. Returns the new id.
pub async fn record_expense(db: &Database, form: ExpenseForm) -> Result<i64, ScreenError> {
    validate_amount_cents("amount", form.amount_cents)?;

    let expense = ShopExpense {
        id: 0,
        expense_date: form.expense_date,
        amount_cents: form.amount_cents,
        invoice_number: form.invoice_number,
        supplier: form.supplier,
        paid: form.paid,
    };
    let id = db.shop().insert_expense(&expense).await?;
    Ok(id)
}

/// Toggles the paid flag on a purchase invoice. Admin only, both ways;
/// payment state drives the spend chart.
pub async fn set_expense_paid(
    db: &Database,
    session: &Session,
    id: i64,
    paid: bool,
) -> Result<(), ScreenError> {
    session.require_admin()?;
    db.shop().set_expense_paid(id, paid).await?;
    Ok(())
}

/// Deletes a takings entry. Admin only.
pub async fn remove_sale(db: &Database, session: &Session, id: i64) -> Result<(), ScreenError> {
    session.require_admin()?;
    db.shop().delete_sale(id).await?;
    Ok(())
}

/// Deletes a purchase invoice. Admin only.
pub async fn remove_expense(db: &Database, session: &Session, id: i64) -> Result<(), ScreenError> {
    session.require_admin()?;
    db.shop().delete_expense(id).await?;
    Ok(())
}

/// Assembles one month of the shop's books. Degrades to an empty month
/// on store failure.
pub async fn month(db: &Database, month: YearMonth) -> ShopMonth {
    let (first, last) = month.bounds();
    let repo = db.shop();

    let fetched = tokio::try_join!(
        repo.sales_between(first, last),
        repo.expenses_between(first, last),
        repo.sales_total_between(first, last),
        repo.expenses_total_between(first, last),
        repo.paid_expenses_total_between(first, last),
        repo.daily_sales(first, last),
        repo.daily_paid_expenses(first, last),
    );

    match fetched {
        Ok((sales, expenses, sales_total, expenses_total, paid_expenses_total, sale_rows, paid_rows)) => {
            let sales_total = Money::from_cents(sales_total);
            let expenses_total = Money::from_cents(expenses_total);
            ShopMonth {
                month,
                sales,
                expenses,
                sales_total,
                expenses_total,
                paid_expenses_total: Money::from_cents(paid_expenses_total),
                net: sales_total - expenses_total,
                daily_sales: fill_daily(first, last, &sale_rows),
                daily_paid_expenses: fill_daily(first, last, &paid_rows),
            }
        }
        Err(err) => {
            warn!(error = %err, %month, "Shop month unavailable, rendering empty");
            ShopMonth {
                month,
                sales: Vec::new(),
                expenses: Vec::new(),
                sales_total: Money::zero(),
                expenses_total: Money::zero(),
                paid_expenses_total: Money::zero(),
                net: Money::zero(),
                daily_sales: Vec::new(),
                daily_paid_expenses: Vec::new(),
            }
        }
    }
}

fn non_negative(field: &'static str, cents: i64) -> Result<(), ValidationError> {
    if cents < 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vetfin_db::DbConfig;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_month_assembly() {
        let db = test_db().await;

        record_sale(
            &db,
            SaleForm {
                sale_date: d("2024-05-03"),
                cash_cents: 12_000,
                terminal_cents: 8_000,
            },
        )
        .await
        .unwrap();
        record_expense(
            &db,
            ExpenseForm {
                expense_date: d("2024-05-15"),
                amount_cents: 7_500,
                invoice_number: None,
                supplier: Some("Karma-Plus".to_string()),
                paid: false,
            },
        )
        .await
        .unwrap();

        record_expense(
            &db,
            ExpenseForm {
                expense_date: d("2024-05-20"),
                amount_cents: 3_000,
                invoice_number: None,
                supplier: None,
                paid: true,
            },
        )
        .await
        .unwrap();

        let overview = month(&db, YearMonth::new(2024, 5).unwrap()).await;

        assert_eq!(overview.sales.len(), 1);
        assert_eq!(overview.expenses.len(), 2);
        assert_eq!(overview.sales_total, Money::from_cents(20_000));
        assert_eq!(overview.expenses_total, Money::from_cents(10_500));
        assert_eq!(overview.paid_expenses_total, Money::from_cents(3_000));
        assert_eq!(overview.net, Money::from_cents(9_500));

        // The daily series span the whole month with gaps zero-filled.
        assert_eq!(overview.daily_sales.len(), 31);
        assert_eq!(overview.daily_sales[2], (d("2024-05-03"), Money::from_cents(20_000)));
        assert_eq!(overview.daily_paid_expenses[19], (d("2024-05-20"), Money::from_cents(3_000)));
        // Unpaid invoices never reach the spend series.
        assert_eq!(overview.daily_paid_expenses[14], (d("2024-05-15"), Money::zero()));
    }

    #[tokio::test]
    async fn test_mutations_require_admin() {
        let db = test_db().await;

        let sale_id = record_sale(
            &db,
            SaleForm {
                sale_date: d("2024-05-03"),
                cash_cents: 12_000,
                terminal_cents: 0,
            },
        )
        .await
        .unwrap();
        let expense_id = record_expense(
            &db,
            ExpenseForm {
                expense_date: d("2024-05-15"),
                amount_cents: 7_500,
                invoice_number: None,
                supplier: None,
                paid: false,
            },
        )
        .await
        .unwrap();

        let desk = Session::login("pracownik", "kubajestsuper").unwrap();
        for err in [
            remove_sale(&db, &desk, sale_id).await.unwrap_err(),
            remove_expense(&db, &desk, expense_id).await.unwrap_err(),
            set_expense_paid(&db, &desk, expense_id, true).await.unwrap_err(),
        ] {
            assert_eq!(err.code, crate::error::ErrorCode::Forbidden);
        }

        let admin = Session::login("admin", "Grubybob").unwrap();
        set_expense_paid(&db, &admin, expense_id, true).await.unwrap();
        remove_sale(&db, &admin, sale_id).await.unwrap();
        remove_expense(&db, &admin, expense_id).await.unwrap();

        let overview = month(&db, YearMonth::new(2024, 5).unwrap()).await;
        assert!(overview.sales.is_empty());
        assert!(overview.expenses.is_empty());
    }
}
