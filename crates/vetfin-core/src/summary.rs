//! # Monthly Summaries
//!
//! The aggregation core: monthly net result, zero-filled daily series,
//! trailing-month trend points, and per-employee shift-revenue attribution.
//!
//! Everything here operates on values the repositories have already fetched;
//! no I/O happens in this module.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::money::Money;
use crate::period::YearMonth;
use crate::types::{Employee, EmployeeRole};

// =============================================================================
// Monthly Net Result
// =============================================================================

/// The five month-bounded quantities and their net result.
///
/// ```text
/// net = (revenue_gabinet + ar_paid) − (ap_paid + leasing + salaries)
/// ```
///
/// `salaries` is the *current* active-roster total, not re-scoped to the
/// query month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MonthlySummary {
    /// Clinic shift takings (cash + terminal) dated within the month.
    pub revenue_gabinet: Money,
    /// AR invoice amounts whose *paid date* falls in the month.
    pub ar_paid: Money,
    /// AP invoice amounts whose *paid date* falls in the month.
    pub ap_paid: Money,
    /// Monthly installments of leases active during the month.
    pub leasing: Money,
    /// Salaries of currently-active employees.
    pub salaries: Money,
}

impl MonthlySummary {
    pub fn revenue_total(&self) -> Money {
        self.revenue_gabinet + self.ar_paid
    }

    pub fn cost_total(&self) -> Money {
        self.ap_paid + self.leasing + self.salaries
    }

    pub fn net(&self) -> Money {
        self.revenue_total() - self.cost_total()
    }
}

/// One month of the trailing-12-month trend.
///
/// Every point recomputes the [`MonthlySummary`] quantities for its own
/// month window, except salaries: the original system applies today's
/// active-roster total to every historical month, and that behavior is kept
/// (flagged as a product decision, not silently fixed).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub month: YearMonth,
    pub summary: MonthlySummary,
    pub net: Money,
}

impl TrendPoint {
    pub fn new(month: YearMonth, summary: MonthlySummary) -> Self {
        let net = summary.net();
        TrendPoint {
            month,
            summary,
            net,
        }
    }
}

// =============================================================================
// Daily Series
// =============================================================================

/// Merges sparse per-day sums into a full calendar-day series over
/// `[first, last]`. Days with no data yield zero, not absence.
pub fn fill_daily(
    first: NaiveDate,
    last: NaiveDate,
    rows: &[(NaiveDate, i64)],
) -> Vec<(NaiveDate, Money)> {
    let by_day: BTreeMap<NaiveDate, i64> = rows.iter().copied().collect();

    let mut series = Vec::new();
    let mut day = first;
    while day <= last {
        let cents = by_day.get(&day).copied().unwrap_or(0);
        series.push((day, Money::from_cents(cents)));
        day = day + Days::new(1);
    }
    series
}

// =============================================================================
// Shift Revenue Attribution
// =============================================================================

/// Per-name shift statistics as aggregated by the store: one row per staff
/// name that appeared on any shift in the month, veterinarian and technician
/// appearances combined.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ShiftStatsRow {
    pub name: String,
    pub shifts_count: i64,
    pub revenue_cents: i64,
}

/// One roster member's monthly attribution line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMonthlyStats {
    pub name: String,
    pub role: EmployeeRole,
    pub monthly_salary: Money,
    pub shifts_count: i64,
    /// Full revenue of every shift the person attended. A shift with two
    /// technicians contributes its whole amount to each of them.
    pub attributed_revenue: Money,
}

/// Left-joins the active roster against the month's shift statistics.
///
/// Employees with zero shifts appear with zeros rather than being absent.
/// Names on shifts that are no longer on the active roster are dropped,
/// matching the original roster-driven summary table. Result is sorted by
/// attributed revenue, highest first.
pub fn attribute_shift_revenue(
    roster: &[Employee],
    stats: &[ShiftStatsRow],
) -> Vec<StaffMonthlyStats> {
    let by_name: BTreeMap<&str, &ShiftStatsRow> =
        stats.iter().map(|s| (s.name.as_str(), s)).collect();

    let mut lines: Vec<StaffMonthlyStats> = roster
        .iter()
        .filter(|e| e.active)
        .map(|e| {
            let stat = by_name.get(e.name.as_str());
            StaffMonthlyStats {
                name: e.name.clone(),
                role: e.role,
                monthly_salary: e.monthly_salary(),
                shifts_count: stat.map_or(0, |s| s.shifts_count),
                attributed_revenue: Money::from_cents(stat.map_or(0, |s| s.revenue_cents)),
            }
        })
        .collect();

    lines.sort_by(|a, b| b.attributed_revenue.cmp(&a.attributed_revenue));
    lines
}
