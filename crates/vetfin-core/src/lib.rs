//! # vetfin-core: Pure Business Logic for VetFinance
//!
//! The heart of the clinic's bookkeeping. Every non-trivial computation
//! (month-bounded sums, the trailing-12-month series, receivables aging,
//! per-employee shift-revenue attribution) lives here as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! apps/clinic (screens, session gate)
//!        │
//!        ▼
//! vetfin-core (THIS CRATE)  ← types, money, period, aging, summary
//!        │                    NO I/O • NO DATABASE • PURE FUNCTIONS
//!        ▼
//! vetfin-db (SQLite queries, migrations, repositories)
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain records (shifts, invoices, leases, employees, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point)
//! - [`period`] - Calendar-month bounds and trailing-month series
//! - [`aging`] - Receivables aging buckets
//! - [`summary`] - Monthly net result, daily series, revenue attribution
//! - [`validation`] - Form-input presence/positivity checks
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure functions**: same input, same output
//! 2. **Integer money**: all amounts in grosz (i64), never floats
//! 3. **Explicit errors**: typed enums, never strings or panics

pub mod aging;
pub mod error;
pub mod money;
pub mod period;
pub mod summary;
pub mod types;
pub mod validation;

pub use aging::{days_past_due, AgingBucket, AgingReport};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use period::{trailing_months, YearMonth};
pub use summary::{
    attribute_shift_revenue, fill_daily, MonthlySummary, ShiftStatsRow, StaffMonthlyStats,
    TrendPoint,
};
pub use types::*;
