//! In-memory employee repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use tirehub_core::error::AppError;
use tirehub_core::result::AppResult;
use tirehub_core::traits::Repository;
use tirehub_entity::Employee;

use crate::repositories::EmployeeRepository;

/// Employees keyed by employee id.
#[derive(Debug, Default)]
pub struct MemoryEmployeeRepository {
    rows: DashMap<String, Employee>,
}

impl MemoryEmployeeRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    fn email_taken_by_other(&self, email: &str, employee_id: &str) -> bool {
        self.rows
            .iter()
            .any(|row| row.employee_id != employee_id && row.has_email(email))
    }
}

#[async_trait]
impl Repository<Employee, String> for MemoryEmployeeRepository {
    async fn find_by_id(&self, id: &String) -> AppResult<Option<Employee>> {
        Ok(self.rows.get(id).map(|row| row.clone()))
    }

    async fn find_all(&self) -> AppResult<Vec<Employee>> {
        let mut all: Vec<Employee> = self.rows.iter().map(|row| row.clone()).collect();
        all.sort_by(|a, b| a.employee_id.cmp(&b.employee_id));
        Ok(all)
    }

    async fn create(&self, employee: &Employee) -> AppResult<Employee> {
        if self.email_taken_by_other(&employee.email, &employee.employee_id) {
            return Err(AppError::conflict("Email is already in use"));
        }
        match self.rows.entry(employee.employee_id.clone()) {
            Entry::Occupied(_) => Err(AppError::conflict(format!(
                "Employee ID '{}' is already taken",
                employee.employee_id
            ))),
            Entry::Vacant(slot) => {
                slot.insert(employee.clone());
                Ok(employee.clone())
            }
        }
    }

    async fn update(&self, employee: &Employee) -> AppResult<Employee> {
        if self.email_taken_by_other(&employee.email, &employee.employee_id) {
            return Err(AppError::conflict("Email is already in use"));
        }
        match self.rows.get_mut(&employee.employee_id) {
            Some(mut row) => {
                *row = employee.clone();
                Ok(employee.clone())
            }
            None => Err(AppError::not_found(format!(
                "Employee {} not found",
                employee.employee_id
            ))),
        }
    }

    async fn delete(&self, id: &String) -> AppResult<bool> {
        Ok(self.rows.remove(id).is_some())
    }
}

#[async_trait]
impl EmployeeRepository for MemoryEmployeeRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Employee>> {
        Ok(self
            .rows
            .iter()
            .find(|row| row.has_email(email))
            .map(|row| row.clone()))
    }
}
