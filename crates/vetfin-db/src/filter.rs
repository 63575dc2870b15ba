//! # Listing Filters
//!
//! Typed, composable predicates for the receivables listing.
//!
//! The listing screen combines several optional filters (paid status, date
//! window, category, free-text search). Instead of concatenating WHERE
//! fragments from strings, each predicate is a typed field here and the SQL
//! is assembled through `sqlx::QueryBuilder` with bound parameters.

use chrono::NaiveDate;
use sqlx::{QueryBuilder, Sqlite};

/// Paid-status predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaidStatus {
    #[default]
    Any,
    UnpaidOnly,
    PaidOnly,
}

/// Which date column the window applies to.
///
/// Filtering by paid date implies paid-only: unpaid invoices have no paid
/// date to fall inside the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateField {
    #[default]
    IssueDate,
    PaidDate,
}

/// The receivables listing filter.
///
/// ## Example
/// ```rust,ignore
/// let filter = ReceivableFilter::window(first, last)
///     .status(PaidStatus::UnpaidOnly)
///     .category("Usługi gabinet")
///     .search("Kowal");
/// let rows = db.receivables().list(&filter).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ReceivableFilter {
    pub status: PaidStatus,
    pub date_field: DateField,
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub category: Option<String>,
    /// Substring match against customer or invoice number.
    pub search: Option<String>,
}

impl ReceivableFilter {
    /// A filter over the given date window with no further predicates.
    pub fn window(from: NaiveDate, to: NaiveDate) -> Self {
        ReceivableFilter {
            status: PaidStatus::Any,
            date_field: DateField::IssueDate,
            from,
            to,
            category: None,
            search: None,
        }
    }

    pub fn status(mut self, status: PaidStatus) -> Self {
        self.status = status;
        self
    }

    pub fn date_field(mut self, field: DateField) -> Self {
        self.date_field = field;
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        let query = query.into().trim().to_string();
        self.search = if query.is_empty() { None } else { Some(query) };
        self
    }

    /// Appends the WHERE clause for this filter, binding all values.
    pub(crate) fn push_where(&self, qb: &mut QueryBuilder<'_, Sqlite>) {
        match self.status {
            PaidStatus::Any => {}
            PaidStatus::UnpaidOnly => {
                qb.push(" AND paid = 0");
            }
            PaidStatus::PaidOnly => {
                qb.push(" AND paid = 1");
            }
        }

        match self.date_field {
            DateField::IssueDate => {
                qb.push(" AND issue_date BETWEEN ");
                qb.push_bind(self.from);
                qb.push(" AND ");
                qb.push_bind(self.to);
            }
            DateField::PaidDate => {
                qb.push(" AND paid = 1 AND paid_date BETWEEN ");
                qb.push_bind(self.from);
                qb.push(" AND ");
                qb.push_bind(self.to);
            }
        }

        if let Some(category) = &self.category {
            qb.push(" AND category = ");
            qb.push_bind(category.clone());
        }

        if let Some(search) = &self.search {
            let pattern = format!("%{}%", search);
            qb.push(" AND (customer LIKE ");
            qb.push_bind(pattern.clone());
            qb.push(" OR IFNULL(number, '') LIKE ");
            qb.push_bind(pattern);
            qb.push(")");
        }
    }
}
