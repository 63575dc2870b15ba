//! # Shift Repository
//!
//! Database operations for daily shift reports and their crews.
//!
//! ## Report + Crew
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  shift_reports                 shift_technicians                        │
//! │  ┌────────────────────┐        ┌──────────────────────┐                 │
//! │  │ id  date  shift .. │◄───────│ shift_report_id name │                 │
//! │  └────────────────────┘  FK +  └──────────────────────┘                 │
//! │                          ON DELETE CASCADE                              │
//! │                                                                         │
//! │  insert() writes both tables in one transaction; delete() relies on     │
//! │  the cascade to clear the crew rows.                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use vetfin_core::{ShiftReport, ShiftReportWithCrew, ShiftStatsRow};

const SELECT_REPORT: &str = "SELECT id, report_date, shift, cash_cents, terminal_cents, \
     veterinarian, notes FROM shift_reports";

/// Repository for shift report database operations.
#[derive(Debug, Clone)]
pub struct ShiftRepository {
    pool: SqlitePool,
}

impl ShiftRepository {
    /// Creates a new ShiftRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ShiftRepository { pool }
    }

    /// Inserts a report and its crew in one transaction.
    ///
    /// The id on `report` is ignored; the database assigns a new one and
    /// it is returned.
    pub async fn insert(&self, report: &ShiftReport, technicians: &[String]) -> DbResult<i64> {
        debug!(
            date = %report.report_date,
            shift = ?report.shift,
            crew = technicians.len(),
            "Inserting shift report"
        );

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "INSERT INTO shift_reports \
             (report_date, shift, cash_cents, terminal_cents, veterinarian, notes) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(report.report_date)
        .bind(report.shift)
        .bind(report.cash_cents)
        .bind(report.terminal_cents)
        .bind(&report.veterinarian)
        .bind(&report.notes)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();

        for technician in technicians {
            sqlx::query(
                "INSERT INTO shift_technicians (shift_report_id, technician) VALUES (?1, ?2)",
            )
            .bind(id)
            .bind(technician)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(id)
    }

    /// Gets a report with its crew.
    pub async fn get(&self, id: i64) -> DbResult<Option<ShiftReportWithCrew>> {
        let report: Option<ShiftReport> =
            sqlx::query_as::<_, ShiftReport>(&format!("{SELECT_REPORT} WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        let Some(report) = report else {
            return Ok(None);
        };

        let technicians: Vec<String> = sqlx::query_scalar(
            "SELECT technician FROM shift_technicians WHERE shift_report_id = ?1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(ShiftReportWithCrew {
            report,
            technicians,
        }))
    }

    /// Lists reports in a date window, newest first, crews attached.
    ///
    /// Crews are fetched with a single join and stitched in memory rather
    /// than one query per report.
    pub async fn list_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DbResult<Vec<ShiftReportWithCrew>> {
        debug!(%from, %to, "Listing shift reports");

        let reports: Vec<ShiftReport> = sqlx::query_as::<_, ShiftReport>(&format!(
            "{SELECT_REPORT} WHERE report_date BETWEEN ?1 AND ?2 \
             ORDER BY report_date DESC, shift, id"
        ))
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        let crew_rows: Vec<(i64, String)> = sqlx::query_as(
            "SELECT st.shift_report_id, st.technician \
             FROM shift_technicians st \
             JOIN shift_reports sr ON sr.id = st.shift_report_id \
             WHERE sr.report_date BETWEEN ?1 AND ?2 \
             ORDER BY st.id",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        let mut crews: HashMap<i64, Vec<String>> = HashMap::new();
        for (report_id, technician) in crew_rows {
            crews.entry(report_id).or_default().push(technician);
        }

        Ok(reports
            .into_iter()
            .map(|report| {
                let technicians = crews.remove(&report.id).unwrap_or_default();
                ShiftReportWithCrew {
                    report,
                    technicians,
                }
            })
            .collect())
    }

    /// Updates a report and replaces its crew.
    pub async fn update(&self, report: &ShiftReport, technicians: &[String]) -> DbResult<()> {
        debug!(id = report.id, "Updating shift report");

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE shift_reports SET report_date = ?1, shift = ?2, cash_cents = ?3, \
             terminal_cents = ?4, veterinarian = ?5, notes = ?6 WHERE id = ?7",
        )
        .bind(report.report_date)
        .bind(report.shift)
        .bind(report.cash_cents)
        .bind(report.terminal_cents)
        .bind(&report.veterinarian)
        .bind(&report.notes)
        .bind(report.id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("shift report", report.id));
        }

        sqlx::query("DELETE FROM shift_technicians WHERE shift_report_id = ?1")
            .bind(report.id)
            .execute(&mut *tx)
            .await?;

        for technician in technicians {
            sqlx::query(
                "INSERT INTO shift_technicians (shift_report_id, technician) VALUES (?1, ?2)",
            )
            .bind(report.id)
            .bind(technician)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Deletes a report; crew rows go with it via the cascade.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM shift_reports WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("shift report", id));
        }
        Ok(())
    }

    /// Total clinic takings (cash + terminal) over a date window, in grosz.
    pub async fn revenue_between(&self, from: NaiveDate, to: NaiveDate) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(cash_cents + terminal_cents), 0) \
             FROM shift_reports WHERE report_date BETWEEN ?1 AND ?2",
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// Per-day takings over a window. Days without reports are absent;
    /// callers zero-fill for charting.
    pub async fn daily_revenue(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DbResult<Vec<(NaiveDate, i64)>> {
        let rows: Vec<(NaiveDate, i64)> = sqlx::query_as(
            "SELECT report_date, SUM(cash_cents + terminal_cents) \
             FROM shift_reports WHERE report_date BETWEEN ?1 AND ?2 \
             GROUP BY report_date ORDER BY report_date",
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    /// Shift counts and attributed revenue per staff name over a window.
    ///
    /// Each shift's full takings count once for the veterinarian and once
    /// for every technician on the crew, so the rows deliberately do not
    /// sum to clinic revenue.
    pub async fn shift_stats(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> DbResult<Vec<ShiftStatsRow>> {
        debug!(%from, %to, "Computing per-staff shift stats");

        let rows: Vec<ShiftStatsRow> = sqlx::query_as::<_, ShiftStatsRow>(
            "SELECT name, COUNT(*) AS shifts_count, \
                    COALESCE(SUM(revenue_cents), 0) AS revenue_cents \
             FROM ( \
                 SELECT sr.veterinarian AS name, \
                        sr.cash_cents + sr.terminal_cents AS revenue_cents \
                 FROM shift_reports sr \
                 WHERE sr.report_date BETWEEN ?1 AND ?2 \
                 UNION ALL \
                 SELECT st.technician AS name, \
                        sr.cash_cents + sr.terminal_cents AS revenue_cents \
                 FROM shift_technicians st \
                 JOIN shift_reports sr ON sr.id = st.shift_report_id \
                 WHERE sr.report_date BETWEEN ?3 AND ?4 \
             ) GROUP BY name",
        )
        .bind(from)
        .bind(to)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use vetfin_core::Shift;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn report(date: &str, shift: Shift, cash: i64, terminal: i64, vet: &str) -> ShiftReport {
        ShiftReport {
            id: 0,
            report_date: d(date),
            shift,
            cash_cents: cash,
            terminal_cents: terminal,
            veterinarian: vet.to_string(),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get_with_crew() {
        let db = test_db().await;
        let repo = db.shifts();

        let crew = vec!["Marta Lis".to_string(), "Jan Nowak".to_string()];
        let id = repo
            .insert(
                &report("2024-05-10", Shift::Morning, 10_000, 5_000, "Anna Kowalska"),
                &crew,
            )
            .await
            .unwrap();

        let found = repo.get(id).await.unwrap().unwrap();
        assert_eq!(found.report.veterinarian, "Anna Kowalska");
        assert_eq!(found.report.revenue().cents(), 15_000);
        assert_eq!(found.technicians, crew);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_crew() {
        let db = test_db().await;
        let repo = db.shifts();

        let id = repo
            .insert(
                &report("2024-05-10", Shift::Afternoon, 1_000, 0, "Anna Kowalska"),
                &["Marta Lis".to_string()],
            )
            .await
            .unwrap();

        repo.delete(id).await.unwrap();

        let orphans: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM shift_technicians")
                .fetch_one(db.pool())
                .await
                .unwrap();
        assert_eq!(orphans, 0);
        assert!(repo.get(id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_revenue_between_respects_window() {
        let db = test_db().await;
        let repo = db.shifts();

        repo.insert(
            &report("2024-05-10", Shift::Morning, 10_000, 0, "Anna Kowalska"),
            &["Marta Lis".to_string()],
        )
        .await
        .unwrap();
        repo.insert(
            &report("2024-06-01", Shift::Morning, 99_000, 0, "Anna Kowalska"),
            &["Marta Lis".to_string()],
        )
        .await
        .unwrap();

        let may = repo
            .revenue_between(d("2024-05-01"), d("2024-05-31"))
            .await
            .unwrap();
        assert_eq!(may, 10_000);
    }

    #[tokio::test]
    async fn test_shift_stats_credit_vet_and_each_technician() {
        let db = test_db().await;
        let repo = db.shifts();

        repo.insert(
            &report("2024-05-10", Shift::Morning, 8_000, 2_000, "Anna Kowalska"),
            &["Marta Lis".to_string(), "Jan Nowak".to_string()],
        )
        .await
        .unwrap();

        let mut stats = repo
            .shift_stats(d("2024-05-01"), d("2024-05-31"))
            .await
            .unwrap();
        stats.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(stats.len(), 3);
        for row in &stats {
            assert_eq!(row.shifts_count, 1);
            assert_eq!(row.revenue_cents, 10_000);
        }
    }

    #[tokio::test]
    async fn test_update_replaces_crew() {
        let db = test_db().await;
        let repo = db.shifts();

        let id = repo
            .insert(
                &report("2024-05-10", Shift::Morning, 1_000, 0, "Anna Kowalska"),
                &["Marta Lis".to_string()],
            )
            .await
            .unwrap();

        let mut updated = report("2024-05-10", Shift::Morning, 2_000, 0, "Anna Kowalska");
        updated.id = id;
        repo.update(&updated, &["Jan Nowak".to_string()])
            .await
            .unwrap();

        let found = repo.get(id).await.unwrap().unwrap();
        assert_eq!(found.report.cash_cents, 2_000);
        assert_eq!(found.technicians, vec!["Jan Nowak".to_string()]);
    }
}
