//! # Domain Types
//!
//! The seven record types held by the store, plus the store enums.
//!
//! ## Record Streams
//! ```text
//! ShiftReport ──┐
//! Receivable  ──┤
//! Payable     ──┼──► monthly summary / 12-month trend (summary module)
//! Lease       ──┤
//! Employee    ──┘
//! ShopSale / ShopExpense ──► shop month overview
//! FarmReport             ──► farm month overview
//! ```
//!
//! Identifiers are auto-increment row ids (`i64`); dates are calendar days
//! (`NaiveDate`, ISO-8601 text in the store); amounts are integer grosz
//! wrapped by [`Money`](crate::Money) at computation boundaries.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Store Enums
// =============================================================================

/// Half-day work period of a shift report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum Shift {
    Morning,
    Afternoon,
}

/// Role of a clinic employee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum EmployeeRole {
    Veterinarian,
    Technician,
}

/// Origin of a livestock (farm) entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum FarmEntryKind {
    Warehouse,
    Field,
}

// =============================================================================
// Shift Report
// =============================================================================

/// A daily cash-register shift report.
///
/// Technicians live in a child table (`shift_technicians`, cascade-deleted
/// with the report); see [`ShiftReportWithCrew`] for the assembled view.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ShiftReport {
    pub id: i64,
    pub report_date: NaiveDate,
    pub shift: Shift,
    pub cash_cents: i64,
    pub terminal_cents: i64,
    /// The one attending veterinarian.
    pub veterinarian: String,
    pub notes: Option<String>,
}

impl ShiftReport {
    /// Revenue of a shift = cash + card terminal.
    #[inline]
    pub fn revenue(&self) -> Money {
        Money::from_cents(self.cash_cents + self.terminal_cents)
    }
}

/// A shift report together with its attending technicians.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShiftReportWithCrew {
    pub report: ShiftReport,
    /// One or more attending technicians.
    pub technicians: Vec<String>,
}

// =============================================================================
// Invoices
// =============================================================================

/// An accounts-payable invoice (owed by the clinic to a supplier).
///
/// Invariant: `paid == true` implies `paid_date.is_some()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PayableInvoice {
    pub id: i64,
    pub invoice_date: NaiveDate,
    pub due_date: NaiveDate,
    pub supplier: String,
    pub number: Option<String>,
    pub category: Option<String>,
    pub amount_cents: i64,
    pub notes: Option<String>,
    pub paid: bool,
    pub paid_date: Option<NaiveDate>,
}

impl PayableInvoice {
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

/// An accounts-receivable invoice (owed to the clinic by a customer).
///
/// Invariant: `paid == true` implies `paid_date.is_some()`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ReceivableInvoice {
    pub id: i64,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub customer: String,
    pub number: Option<String>,
    pub category: Option<String>,
    pub amount_cents: i64,
    pub notes: Option<String>,
    pub paid: bool,
    pub paid_date: Option<NaiveDate>,
}

impl ReceivableInvoice {
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }
}

// =============================================================================
// Lease
// =============================================================================

/// An equipment lease with a fixed monthly installment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Lease {
    pub id: i64,
    pub name: String,
    pub monthly_amount_cents: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub notes: Option<String>,
}

impl Lease {
    #[inline]
    pub fn monthly_amount(&self) -> Money {
        Money::from_cents(self.monthly_amount_cents)
    }

    /// A lease contributes to month [first, last] iff its active interval
    /// overlaps that month: `start_date <= last && end_date >= first`.
    pub fn active_in(&self, first: NaiveDate, last: NaiveDate) -> bool {
        self.start_date <= last && self.end_date >= first
    }
}

// =============================================================================
// Employee
// =============================================================================

/// A clinic employee. Names are unique and serve as the business key
/// (shift reports reference staff by name).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub role: EmployeeRole,
    pub monthly_salary_cents: i64,
    /// Only active employees contribute to payroll totals.
    pub active: bool,
}

impl Employee {
    #[inline]
    pub fn monthly_salary(&self) -> Money {
        Money::from_cents(self.monthly_salary_cents)
    }
}

// =============================================================================
// Shop
// =============================================================================

/// A retail-shop daily takings entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ShopSale {
    pub id: i64,
    pub sale_date: NaiveDate,
    pub cash_cents: i64,
    pub terminal_cents: i64,
}

impl ShopSale {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.cash_cents + self.terminal_cents)
    }
}

/// A retail-shop purchase invoice.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ShopExpense {
    pub id: i64,
    pub expense_date: NaiveDate,
    pub amount_cents: i64,
    pub invoice_number: Option<String>,
    pub supplier: Option<String>,
    pub paid: bool,
}

// =============================================================================
// Farm
// =============================================================================

/// A livestock-related transaction (warehouse or field work).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct FarmReport {
    pub id: i64,
    pub report_date: NaiveDate,
    pub kind: FarmEntryKind,
    pub amount_cents: i64,
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_shift_revenue_is_cash_plus_terminal() {
        let report = ShiftReport {
            id: 1,
            report_date: d("2024-05-10"),
            shift: Shift::Morning,
            cash_cents: 12_000,
            terminal_cents: 8_050,
            veterinarian: "Anna Kowalska".to_string(),
            notes: None,
        };
        assert_eq!(report.revenue(), Money::from_cents(20_050));
    }

    #[test]
    fn test_lease_month_overlap() {
        let lease = Lease {
            id: 1,
            name: "X-ray unit".to_string(),
            monthly_amount_cents: 150_000,
            start_date: d("2024-01-15"),
            end_date: d("2024-03-10"),
            notes: None,
        };

        // January, February, March 2024: overlapping
        assert!(lease.active_in(d("2024-01-01"), d("2024-01-31")));
        assert!(lease.active_in(d("2024-02-01"), d("2024-02-29")));
        assert!(lease.active_in(d("2024-03-01"), d("2024-03-31")));

        // December 2023 and April 2024: outside the interval
        assert!(!lease.active_in(d("2023-12-01"), d("2023-12-31")));
        assert!(!lease.active_in(d("2024-04-01"), d("2024-04-30")));
    }
}
