//! Employee directory: registration, administration, and self-service edits.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use tirehub_auth::password::{PasswordHasher, PasswordValidator};
use tirehub_core::error::AppError;
use tirehub_core::result::AppResult;
use tirehub_database::EmployeeRepository;
use tirehub_entity::{Employee, normalize_role};

use crate::context::Principal;

/// Input for registering or creating an employee.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewEmployee {
    pub employee_id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: String,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub job_start_date: Option<NaiveDate>,
    pub password: String,
    /// Raw role label; normalized before storing.
    pub role: Option<String>,
}

/// Partial update of an employee.
///
/// `None` leaves a field untouched. A blank `password` or `role` is treated
/// as absent; other fields accept blank values as given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EmployeePatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub address: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub job_start_date: Option<NaiveDate>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// Employee directory operations.
#[derive(Debug, Clone)]
pub struct EmployeeService {
    employees: Arc<dyn EmployeeRepository>,
    hasher: Arc<PasswordHasher>,
    validator: PasswordValidator,
}

impl EmployeeService {
    /// Creates a new employee service.
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        hasher: Arc<PasswordHasher>,
        validator: PasswordValidator,
    ) -> Self {
        Self {
            employees,
            hasher,
            validator,
        }
    }

    /// Creates an employee with a hashed password and a normalized role.
    ///
    /// Fails with a conflict when the id or email is already taken.
    pub async fn create(&self, new: NewEmployee) -> AppResult<Employee> {
        let employee_id = new.employee_id.trim().to_string();
        if employee_id.is_empty() {
            return Err(AppError::validation("Employee ID is required"));
        }
        let email = new.email.trim().to_string();
        if email.is_empty() {
            return Err(AppError::validation("Email is required"));
        }

        if self.employees.exists(&employee_id).await? {
            warn!(employee_id = %employee_id, "Rejected duplicate employee id");
            return Err(AppError::conflict("Error: Employee ID is already taken!"));
        }
        if self.employees.find_by_email(&email).await?.is_some() {
            warn!(email = %email, "Rejected duplicate employee email");
            return Err(AppError::conflict("Error: Email is already in use!"));
        }

        let role = normalize_role(new.role.as_deref())?;
        self.validator.validate(&new.password)?;
        let password_hash = self.hasher.hash_password(&new.password)?;

        let now = Utc::now();
        let employee = Employee {
            employee_id,
            first_name: new.first_name,
            last_name: new.last_name,
            email,
            phone_number: new.phone_number,
            address: new.address,
            position: new.position,
            department: new.department,
            job_start_date: new.job_start_date,
            password_hash,
            role,
            created_at: now,
            updated_at: now,
        };

        let created = self.employees.create(&employee).await?;
        info!(employee_id = %created.employee_id, role = %created.role, "Employee created");
        Ok(created)
    }

    /// Self-registration; identical rules to [`Self::create`].
    pub async fn register(&self, new: NewEmployee) -> AppResult<Employee> {
        self.create(new).await
    }

    /// Fetches one employee.
    pub async fn get(&self, employee_id: &str) -> AppResult<Employee> {
        self.employees
            .find_by_id(&employee_id.to_string())
            .await?
            .ok_or_else(|| AppError::not_found(format!("Employee {employee_id} not found")))
    }

    /// Lists every employee.
    pub async fn list(&self) -> AppResult<Vec<Employee>> {
        self.employees.find_all().await
    }

    /// Applies an administrative patch.
    pub async fn update(&self, employee_id: &str, patch: EmployeePatch) -> AppResult<Employee> {
        let mut employee = self.get(employee_id).await?;

        if let Some(email) = patch.email {
            let email = email.trim().to_string();
            if !email.is_empty() && !employee.has_email(&email) {
                let taken = self
                    .employees
                    .find_by_email(&email)
                    .await?
                    .is_some_and(|other| other.employee_id != employee.employee_id);
                if taken {
                    warn!(employee_id, email = %email, "Rejected email change to one in use");
                    return Err(AppError::conflict("Error: New email is already in use!"));
                }
            }
            employee.email = email;
        }

        if let Some(role) = patch.role.as_deref().filter(|r| !r.trim().is_empty()) {
            employee.role = normalize_role(Some(role))?;
        }

        if let Some(password) = patch.password.as_deref().filter(|p| !p.is_empty()) {
            self.validator.validate(password)?;
            employee.password_hash = self.hasher.hash_password(password)?;
        }

        replace_if_present(&mut employee.first_name, patch.first_name);
        replace_if_present(&mut employee.last_name, patch.last_name);
        replace_if_present(&mut employee.phone_number, patch.phone_number);
        replace_if_present(&mut employee.address, patch.address);
        replace_if_present(&mut employee.position, patch.position);
        replace_if_present(&mut employee.department, patch.department);
        if patch.job_start_date.is_some() {
            employee.job_start_date = patch.job_start_date;
        }
        employee.updated_at = Utc::now();

        let updated = self.employees.update(&employee).await?;
        info!(employee_id = %updated.employee_id, "Employee updated");
        Ok(updated)
    }

    /// Self-service edit of the principal's own record. The role cannot change.
    pub async fn update_profile(
        &self,
        principal: &Principal,
        mut patch: EmployeePatch,
    ) -> AppResult<Employee> {
        if let Some(requested) = patch.role.as_deref().filter(|r| !r.trim().is_empty()) {
            if normalize_role(Some(requested))? != principal.role {
                warn!(employee_id = %principal.employee_id, "Rejected self-service role change");
                return Err(AppError::authorization(
                    "Role changes are not permitted on your own profile",
                ));
            }
        }
        patch.role = None;
        self.update(&principal.employee_id, patch).await
    }

    /// Deletes an employee. Their tire requests are left in place.
    pub async fn delete(&self, employee_id: &str) -> AppResult<()> {
        if !self.employees.delete(&employee_id.to_string()).await? {
            return Err(AppError::not_found(format!(
                "Employee {employee_id} not found"
            )));
        }
        info!(employee_id, "Employee deleted");
        Ok(())
    }
}

fn replace_if_present(field: &mut Option<String>, value: Option<String>) {
    if value.is_some() {
        *field = value;
    }
}
