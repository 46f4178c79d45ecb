//! PostgreSQL employee repository.

use async_trait::async_trait;
use sqlx::PgPool;

use tirehub_core::error::{AppError, ErrorKind};
use tirehub_core::result::AppResult;
use tirehub_core::traits::Repository;
use tirehub_entity::Employee;

use super::EmployeeRepository;

/// Employee repository backed by the `employees` table.
#[derive(Debug, Clone)]
pub struct PgEmployeeRepository {
    pool: PgPool,
}

impl PgEmployeeRepository {
    /// Create a new employee repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Translate unique-constraint violations into conflicts.
fn map_write_error(e: sqlx::Error, employee: &Employee, action: &str) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("employees_pkey") => {
            AppError::conflict(format!(
                "Employee ID '{}' is already taken",
                employee.employee_id
            ))
        }
        sqlx::Error::Database(ref db_err)
            if db_err.constraint() == Some("employees_email_lower_key") =>
        {
            AppError::conflict("Email is already in use")
        }
        _ => AppError::with_source(ErrorKind::Database, format!("Failed to {action} employee"), e),
    }
}

#[async_trait]
impl Repository<Employee, String> for PgEmployeeRepository {
    async fn find_by_id(&self, id: &String) -> AppResult<Option<Employee>> {
        sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE employee_id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find employee by id", e)
            })
    }

    async fn find_all(&self) -> AppResult<Vec<Employee>> {
        sqlx::query_as::<_, Employee>("SELECT * FROM employees ORDER BY employee_id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list employees", e))
    }

    async fn create(&self, employee: &Employee) -> AppResult<Employee> {
        sqlx::query_as::<_, Employee>(
            "INSERT INTO employees (employee_id, first_name, last_name, email, phone_number, \
                                    address, position, department, job_start_date, \
                                    password_hash, role, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             RETURNING *",
        )
        .bind(&employee.employee_id)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.email)
        .bind(&employee.phone_number)
        .bind(&employee.address)
        .bind(&employee.position)
        .bind(&employee.department)
        .bind(employee.job_start_date)
        .bind(&employee.password_hash)
        .bind(employee.role)
        .bind(employee.created_at)
        .bind(employee.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, employee, "create"))
    }

    async fn update(&self, employee: &Employee) -> AppResult<Employee> {
        sqlx::query_as::<_, Employee>(
            "UPDATE employees SET first_name = $2, last_name = $3, email = $4, \
                                  phone_number = $5, address = $6, position = $7, \
                                  department = $8, job_start_date = $9, \
                                  password_hash = $10, role = $11, updated_at = $12 \
             WHERE employee_id = $1 RETURNING *",
        )
        .bind(&employee.employee_id)
        .bind(&employee.first_name)
        .bind(&employee.last_name)
        .bind(&employee.email)
        .bind(&employee.phone_number)
        .bind(&employee.address)
        .bind(&employee.position)
        .bind(&employee.department)
        .bind(employee.job_start_date)
        .bind(&employee.password_hash)
        .bind(employee.role)
        .bind(employee.updated_at)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, employee, "update"))?
        .ok_or_else(|| {
            AppError::not_found(format!("Employee {} not found", employee.employee_id))
        })
    }

    async fn delete(&self, id: &String) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM employees WHERE employee_id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete employee", e))?;
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl EmployeeRepository for PgEmployeeRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Employee>> {
        sqlx::query_as::<_, Employee>("SELECT * FROM employees WHERE LOWER(email) = LOWER($1)")
            .bind(email.trim())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find employee by email", e)
            })
    }

    async fn exists(&self, employee_id: &str) -> AppResult<bool> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM employees WHERE employee_id = $1)",
        )
        .bind(employee_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check employee existence", e)
        })
    }
}
