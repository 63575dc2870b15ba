//! # Farm Repository
//!
//! Database operations for livestock entries. Like the shop, the farm
//! stream is tracked on its own and stays out of the clinic summary.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use vetfin_core::{FarmEntryKind, FarmReport};

/// Repository for farm database operations.
#[derive(Debug, Clone)]
pub struct FarmRepository {
    pool: SqlitePool,
}

impl FarmRepository {
    /// Creates a new FarmRepository.
    pub fn new(pool: SqlitePool) -> Self {
        FarmRepository { pool }
    }

    /// Inserts an entry, returning the assigned id.
    pub async fn insert(&self, report: &FarmReport) -> DbResult<i64> {
        debug!(date = %report.report_date, kind = ?report.kind, "Inserting farm entry");

        let result = sqlx::query(
            "INSERT INTO farm_reports (report_date, kind, amount_cents, notes) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(report.report_date)
        .bind(report.kind)
        .bind(report.amount_cents)
        .bind(&report.notes)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Entries in a window, newest first.
    pub async fn list_between(&self, from: NaiveDate, to: NaiveDate) -> DbResult<Vec<FarmReport>> {
        let reports = sqlx::query_as::<_, FarmReport>(
            "SELECT id, report_date, kind, amount_cents, notes FROM farm_reports \
             WHERE report_date BETWEEN ?1 AND ?2 ORDER BY report_date DESC, id DESC",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(reports)
    }

    /// Window total in grosz, optionally restricted to one entry kind.
    pub async fn total_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        kind: Option<FarmEntryKind>,
    ) -> DbResult<i64> {
        let total: i64 = match kind {
            Some(kind) => {
                sqlx::query_scalar(
                    "SELECT COALESCE(SUM(amount_cents), 0) FROM farm_reports \
                     WHERE report_date BETWEEN ?1 AND ?2 AND kind = ?3",
                )
                .bind(from)
                .bind(to)
                .bind(kind)
                .fetch_one(&self.pool)
                .await?
            }
            None => {
                sqlx::query_scalar(
                    "SELECT COALESCE(SUM(amount_cents), 0) FROM farm_reports \
                     WHERE report_date BETWEEN ?1 AND ?2",
                )
                .bind(from)
                .bind(to)
                .fetch_one(&self.pool)
                .await?
            }
        };

        Ok(total)
    }

    /// Deletes an entry.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM farm_reports WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("farm entry", id));
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

    fn entry(date: &str, kind: FarmEntryKind, amount: i64) -> FarmReport {
        FarmReport {
            id: 0,
            report_date: d(date),
            kind,
            amount_cents: amount,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_totals_per_kind() {
        let db = test_db().await;
        let repo = db.farm();

        repo.insert(&entry("2024-05-03", FarmEntryKind::Warehouse, 40_000))
            .await
            .unwrap();
        repo.insert(&entry("2024-05-08", FarmEntryKind::Field, 60_000))
            .await
            .unwrap();
        repo.insert(&entry("2024-06-01", FarmEntryKind::Field, 99_000))
            .await
            .unwrap();

        let first = d("2024-05-01");
        let last = d("2024-05-31");
        assert_eq!(repo.total_between(first, last, None).await.unwrap(), 100_000);
        assert_eq!(
            repo.total_between(first, last, Some(FarmEntryKind::Warehouse))
                .await
                .unwrap(),
            40_000
        );
        assert_eq!(
            repo.total_between(first, last, Some(FarmEntryKind::Field))
                .await
                .unwrap(),
            60_000
        );
    }
}
