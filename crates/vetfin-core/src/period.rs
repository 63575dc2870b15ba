//! # Calendar Periods
//!
//! Month-window utilities for the aggregation queries.
//!
//! All month arithmetic in the system goes through [`YearMonth`]: the
//! repositories take explicit `(first, last)` day pairs, and the trailing
//! 12-month trend is built from [`trailing_months`] instead of manual
//! year-borrow loops.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A calendar month, e.g. 2024-03.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct YearMonth {
    pub year: i32,
    /// 1-based month (1 = January).
    pub month: u32,
}

impl YearMonth {
    /// Creates a year-month. Returns `None` for an out-of-range month.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(YearMonth { year, month })
        } else {
            None
        }
    }

    /// The month containing the given day.
    pub fn containing(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    /// First and last calendar day of this month.
    ///
    /// ```rust
    /// use vetfin_core::YearMonth;
    ///
    /// let (first, last) = YearMonth::new(2024, 2).unwrap().bounds();
    /// assert_eq!(first.to_string(), "2024-02-01");
    /// assert_eq!(last.to_string(), "2024-02-29"); // leap year
    /// ```
    pub fn bounds(&self) -> (NaiveDate, NaiveDate) {
        // Month is validated on construction, so the first day always exists.
        let first = NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .expect("validated year-month has a first day");
        let last = first + Months::new(1) - Days::new(1);
        (first, last)
    }

    /// The previous calendar month, rolling over the year boundary.
    pub fn pred(&self) -> Self {
        if self.month == 1 {
            YearMonth {
                year: self.year - 1,
                month: 12,
            }
        } else {
            YearMonth {
                year: self.year,
                month: self.month - 1,
            }
        }
    }
}

/// Renders as `YYYY-MM`, the label used by the trend table.
impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// The `n` calendar months ending at (and including) the month containing
/// `end`, oldest first.
///
/// ```rust
/// use vetfin_core::trailing_months;
///
/// let months = trailing_months("2024-02-15".parse().unwrap(), 3);
/// let labels: Vec<String> = months.iter().map(|m| m.to_string()).collect();
/// assert_eq!(labels, ["2023-12", "2024-01", "2024-02"]);
/// ```
pub fn trailing_months(end: NaiveDate, n: usize) -> Vec<YearMonth> {
    let mut months = Vec::with_capacity(n);
    let mut current = YearMonth::containing(end);
    for _ in 0..n {
        months.push(current);
        current = current.pred();
    }
    months.reverse();
    months
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn test_bounds_regular_month() {
        let (first, last) = YearMonth::new(2024, 4).unwrap().bounds();
        assert_eq!(first, d("2024-04-01"));
        assert_eq!(last, d("2024-04-30"));
    }

    #[test]
    fn test_bounds_december() {
        let (first, last) = YearMonth::new(2023, 12).unwrap().bounds();
        assert_eq!(first, d("2023-12-01"));
        assert_eq!(last, d("2023-12-31"));
    }

    #[test]
    fn test_bounds_leap_february() {
        let (_, last) = YearMonth::new(2024, 2).unwrap().bounds();
        assert_eq!(last, d("2024-02-29"));

        let (_, last) = YearMonth::new(2025, 2).unwrap().bounds();
        assert_eq!(last, d("2025-02-28"));
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        assert!(YearMonth::new(2024, 0).is_none());
        assert!(YearMonth::new(2024, 13).is_none());
    }

    #[test]
    fn test_pred_rolls_over_january() {
        let jan = YearMonth::new(2024, 1).unwrap();
        assert_eq!(jan.pred(), YearMonth::new(2023, 12).unwrap());
    }

    #[test]
    fn test_trailing_twelve_spans_year_boundary() {
        let months = trailing_months(d("2024-03-20"), 12);
        assert_eq!(months.len(), 12);
        assert_eq!(months.first().unwrap().to_string(), "2023-04");
        assert_eq!(months.last().unwrap().to_string(), "2024-03");

        // Strictly consecutive, oldest first.
        for pair in months.windows(2) {
            assert_eq!(pair[1].pred(), pair[0]);
        }
    }
}
