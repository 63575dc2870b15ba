//! # Receivables Aging
//!
//! Buckets unpaid AR invoices by days past their due date.
//!
//! ## Buckets
//! ```text
//! days_past_due ≤ 30   →  0–30   (includes not-yet-due, negative days)
//! 31 ..= 60            →  31–60
//! 61 ..= 90            →  61–90
//! > 90                 →  90+
//! ```
//!
//! The report is a point-in-time snapshot computed from the current unpaid
//! set; it is never persisted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::ReceivableInvoice;

/// Days between due date and today. Negative when the invoice is not yet due.
#[inline]
pub fn days_past_due(today: NaiveDate, due_date: NaiveDate) -> i64 {
    (today - due_date).num_days()
}

/// A days-past-due range used to classify unpaid receivables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgingBucket {
    Current0To30,
    Days31To60,
    Days61To90,
    Over90,
}

impl AgingBucket {
    /// All buckets in display order.
    pub const ALL: [AgingBucket; 4] = [
        AgingBucket::Current0To30,
        AgingBucket::Days31To60,
        AgingBucket::Days61To90,
        AgingBucket::Over90,
    ];

    /// Classifies a days-past-due count.
    pub fn for_days(days: i64) -> Self {
        match days {
            d if d <= 30 => AgingBucket::Current0To30,
            d if d <= 60 => AgingBucket::Days31To60,
            d if d <= 90 => AgingBucket::Days61To90,
            _ => AgingBucket::Over90,
        }
    }

    /// Display label, e.g. `0–30`.
    pub fn label(&self) -> &'static str {
        match self {
            AgingBucket::Current0To30 => "0–30",
            AgingBucket::Days31To60 => "31–60",
            AgingBucket::Days61To90 => "61–90",
            AgingBucket::Over90 => "90+",
        }
    }
}

/// One unpaid invoice with its computed age, for the detail listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgedInvoice {
    pub id: i64,
    pub customer: String,
    pub number: Option<String>,
    pub amount: Money,
    pub due_date: NaiveDate,
    pub days_past_due: i64,
    pub bucket: AgingBucket,
}

/// Aggregated amount per bucket plus the aged detail rows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgingReport {
    pub as_of: NaiveDate,
    /// Totals in bucket display order; buckets with no invoices report zero.
    pub totals: [(AgingBucket, Money); 4],
    pub invoices: Vec<AgedInvoice>,
}

impl AgingReport {
    /// Builds the snapshot from the unpaid receivable set.
    pub fn build(as_of: NaiveDate, unpaid: &[ReceivableInvoice]) -> Self {
        let mut totals = AgingBucket::ALL.map(|b| (b, Money::zero()));
        let mut invoices = Vec::with_capacity(unpaid.len());

        for inv in unpaid {
            let days = days_past_due(as_of, inv.due_date);
            let bucket = AgingBucket::for_days(days);
            let slot = AgingBucket::ALL
                .iter()
                .position(|b| *b == bucket)
                .expect("bucket is one of ALL");
            totals[slot].1 += inv.amount();
            invoices.push(AgedInvoice {
                id: inv.id,
                customer: inv.customer.clone(),
                number: inv.number.clone(),
                amount: inv.amount(),
                due_date: inv.due_date,
                days_past_due: days,
                bucket,
            });
        }

        // Detail rows sorted by due date ascending, oldest debt first.
        invoices.sort_by_key(|i| i.due_date);

        AgingReport {
            as_of,
            totals,
            invoices,
        }
    }

    /// Total for one bucket.
    pub fn total(&self, bucket: AgingBucket) -> Money {
        self.totals
            .iter()
            .find(|(b, _)| *b == bucket)
            .map(|(_, m)| *m)
            .unwrap_or_else(Money::zero)
    }
}
