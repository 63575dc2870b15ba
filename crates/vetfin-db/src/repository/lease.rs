//! # Lease Repository
//!
//! Database operations for equipment leases.

use chrono::NaiveDate;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use vetfin_core::Lease;

const SELECT_LEASE: &str =
    "SELECT id, name, monthly_amount_cents, start_date, end_date, notes FROM leases";

/// Repository for lease database operations.
#[derive(Debug, Clone)]
pub struct LeaseRepository {
    pool: SqlitePool,
}

impl LeaseRepository {
    /// Creates a new LeaseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        LeaseRepository { pool }
    }

    /// Inserts a lease, returning the assigned id.
    pub async fn insert(&self, lease: &Lease) -> DbResult<i64> {
        debug!(name = %lease.name, "Inserting lease");

        let result = sqlx::query(
            "INSERT INTO leases (name, monthly_amount_cents, start_date, end_date, notes) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .bind(&lease.name)
        .bind(lease.monthly_amount_cents)
        .bind(lease.start_date)
        .bind(lease.end_date)
        .bind(&lease.notes)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Gets a lease by id.
    pub async fn get(&self, id: i64) -> DbResult<Option<Lease>> {
        let lease = sqlx::query_as::<_, Lease>(&format!("{SELECT_LEASE} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(lease)
    }

    /// All leases, most recent start first.
    pub async fn list_all(&self) -> DbResult<Vec<Lease>> {
        let leases =
            sqlx::query_as::<_, Lease>(&format!("{SELECT_LEASE} ORDER BY start_date DESC, id"))
                .fetch_all(&self.pool)
                .await?;

        Ok(leases)
    }

    /// Leases whose active interval overlaps [first, last].
    pub async fn active_in(&self, first: NaiveDate, last: NaiveDate) -> DbResult<Vec<Lease>> {
        let leases = sqlx::query_as::<_, Lease>(&format!(
            "{SELECT_LEASE} WHERE start_date <= ?1 AND end_date >= ?2 ORDER BY name"
        ))
        .bind(last)
        .bind(first)
        .fetch_all(&self.pool)
        .await?;

        Ok(leases)
    }

    /// Sum of installments for leases active in [first, last], in grosz.
    /// Each active lease contributes one full installment.
    pub async fn monthly_total_active(&self, first: NaiveDate, last: NaiveDate) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(monthly_amount_cents), 0) FROM leases \
             WHERE start_date <= ?1 AND end_date >= ?2",
        )
        .bind(last)
        .bind(first)
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }

    /// Updates all lease fields.
    pub async fn update(&self, lease: &Lease) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE leases SET name = ?1, monthly_amount_cents = ?2, start_date = ?3, \
             end_date = ?4, notes = ?5 WHERE id = ?6",
        )
        .bind(&lease.name)
        .bind(lease.monthly_amount_cents)
        .bind(lease.start_date)
        .bind(lease.end_date)
        .bind(&lease.notes)
        .bind(lease.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("lease", lease.id));
        }
        Ok(())
    }

    /// Deletes a lease.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM leases WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("lease", id));
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

    fn lease(name: &str, amount: i64, start: &str, end: &str) -> Lease {
        Lease {
            id: 0,
            name: name.to_string(),
            monthly_amount_cents: amount,
            start_date: d(start),
            end_date: d(end),
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_monthly_total_counts_overlapping_leases_once() {
        let db = test_db().await;
        let repo = db.leases();

        // Ends mid-May: still a full May installment.
        repo.insert(&lease("X-ray unit", 150_000, "2023-06-01", "2024-05-10"))
            .await
            .unwrap();
        // Starts late May: also a full May installment.
        repo.insert(&lease("Ultrasound", 80_000, "2024-05-28", "2026-05-27"))
            .await
            .unwrap();
        // June-only lease: no May contribution.
        repo.insert(&lease("Autoclave", 40_000, "2024-06-01", "2025-05-31"))
            .await
            .unwrap();

        let may_total = repo
            .monthly_total_active(d("2024-05-01"), d("2024-05-31"))
            .await
            .unwrap();
        assert_eq!(may_total, 230_000);

        let active = repo
            .active_in(d("2024-05-01"), d("2024-05-31"))
            .await
            .unwrap();
        assert_eq!(active.len(), 2);
    }

    #[tokio::test]
    async fn test_partial_months_at_both_ends_still_bill() {
        let db = test_db().await;
        let repo = db.leases();

        repo.insert(&lease("Centrifuge", 60_000, "2024-01-15", "2024-03-10"))
            .await
            .unwrap();

        for (first, last, expected) in [
            ("2023-12-01", "2023-12-31", 0),
            ("2024-01-01", "2024-01-31", 60_000),
            ("2024-02-01", "2024-02-29", 60_000),
            ("2024-03-01", "2024-03-31", 60_000),
            ("2024-04-01", "2024-04-30", 0),
        ] {
            let total = repo.monthly_total_active(d(first), d(last)).await.unwrap();
            assert_eq!(total, expected, "window {first}..{last}");
        }
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let db = test_db().await;
        let repo = db.leases();

        let id = repo
            .insert(&lease("X-ray unit", 150_000, "2024-01-01", "2025-12-31"))
            .await
            .unwrap();

        let mut changed = lease("X-ray unit", 140_000, "2024-01-01", "2025-12-31");
        changed.id = id;
        repo.update(&changed).await.unwrap();
        assert_eq!(
            repo.get(id).await.unwrap().unwrap().monthly_amount_cents,
            140_000
        );

        repo.delete(id).await.unwrap();
        assert!(repo.get(id).await.unwrap().is_none());
        assert!(matches!(
            repo.delete(id).await.unwrap_err(),
            DbError::NotFound { .. }
        ));
    }
}
