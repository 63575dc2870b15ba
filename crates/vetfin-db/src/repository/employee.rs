//! # Employee Repository
//!
//! Database operations for the staff roster.
//!
//! Ordinary offboarding deactivates the row rather than deleting it: shift
//! reports reference staff by name, and history must keep resolving after
//! someone leaves. Hard delete exists for typo fixes only.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use vetfin_core::{Employee, EmployeeRole};

const SELECT_EMPLOYEE: &str =
    "SELECT id, name, role, monthly_salary_cents, active FROM employees";

/// Repository for employee database operations.
#[derive(Debug, Clone)]
pub struct EmployeeRepository {
    pool: SqlitePool,
}

impl EmployeeRepository {
    /// Creates a new EmployeeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        EmployeeRepository { pool }
    }

    /// Inserts an employee, returning the assigned id.
    ///
    /// Names are unique; a duplicate surfaces as
    /// [`DbError::UniqueViolation`].
    pub async fn insert(&self, employee: &Employee) -> DbResult<i64> {
        debug!(name = %employee.name, role = ?employee.role, "Inserting employee");

        let result = sqlx::query(
            "INSERT INTO employees (name, role, monthly_salary_cents, active) \
             VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&employee.name)
        .bind(employee.role)
        .bind(employee.monthly_salary_cents)
        .bind(employee.active)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from(e).for_unique_field("name", &employee.name))?;

        Ok(result.last_insert_rowid())
    }

    /// Gets an employee by id.
    pub async fn get(&self, id: i64) -> DbResult<Option<Employee>> {
        let employee = sqlx::query_as::<_, Employee>(&format!("{SELECT_EMPLOYEE} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(employee)
    }

    /// Active employees, sorted by name.
    pub async fn roster(&self) -> DbResult<Vec<Employee>> {
        let employees = sqlx::query_as::<_, Employee>(&format!(
            "{SELECT_EMPLOYEE} WHERE active = 1 ORDER BY name"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(employees)
    }

    /// All employees, active and former, sorted by name.
    pub async fn list_all(&self) -> DbResult<Vec<Employee>> {
        let employees =
            sqlx::query_as::<_, Employee>(&format!("{SELECT_EMPLOYEE} ORDER BY name"))
                .fetch_all(&self.pool)
                .await?;

        Ok(employees)
    }

    /// Names of active employees with the given role; feeds the crew and
    /// veterinarian pickers on the shift form.
    pub async fn names_by_role(&self, role: EmployeeRole) -> DbResult<Vec<String>> {
        let names: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM employees WHERE active = 1 AND role = ?1 ORDER BY name",
        )
        .bind(role)
        .fetch_all(&self.pool)
        .await?;

        Ok(names)
    }

    /// Updates role and salary. The name is the business key and stays put.
    pub async fn update(&self, employee: &Employee) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE employees SET role = ?1, monthly_salary_cents = ?2, active = ?3 \
             WHERE id = ?4",
        )
        .bind(employee.role)
        .bind(employee.monthly_salary_cents)
        .bind(employee.active)
        .bind(employee.id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("employee", employee.id));
        }
        Ok(())
    }

    /// Activates or deactivates an employee.
    pub async fn set_active(&self, id: i64, active: bool) -> DbResult<()> {
        debug!(id, active, "Setting employee active flag");

        let result = sqlx::query("UPDATE employees SET active = ?1 WHERE id = ?2")
            .bind(active)
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("employee", id));
        }
        Ok(())
    }

    /// Removes an employee row entirely. Shift history referencing the name
    /// is left alone.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting employee");

        let result = sqlx::query("DELETE FROM employees WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("employee", id));
        }
        Ok(())
    }

    /// Sum of monthly salaries across the active roster, in grosz.
    pub async fn salary_total_active(&self) -> DbResult<i64> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(monthly_salary_cents), 0) FROM employees WHERE active = 1",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(total)
    }
}
