//! Repository traits and their PostgreSQL implementations.

pub mod employee;
pub mod tire_request;

use async_trait::async_trait;

use tirehub_core::result::AppResult;
use tirehub_core::traits::Repository;
use tirehub_core::types::TireRequestId;
use tirehub_entity::{Employee, TireRequest, TireRequestStatus};

pub use employee::PgEmployeeRepository;
pub use tire_request::PgTireRequestRepository;

/// Employee persistence, keyed by the externally assigned employee id.
#[async_trait]
pub trait EmployeeRepository: Repository<Employee, String> + std::fmt::Debug {
    /// Find an employee by login email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> AppResult<Option<Employee>>;

    /// Whether an employee with this id exists.
    async fn exists(&self, employee_id: &str) -> AppResult<bool> {
        Ok(self.find_by_id(&employee_id.to_string()).await?.is_some())
    }
}

/// Tire request persistence with the secondary lookups the API exposes.
#[async_trait]
pub trait TireRequestRepository: Repository<TireRequest, TireRequestId> + std::fmt::Debug {
    /// Requests currently in `status`, newest first.
    async fn find_by_status(&self, status: TireRequestStatus) -> AppResult<Vec<TireRequest>>;

    /// Requests submitted by one officer, newest first.
    async fn find_by_officer(&self, officer_service_no: &str) -> AppResult<Vec<TireRequest>>;

    /// Requests for one vehicle, newest first.
    async fn find_by_vehicle(&self, vehicle_no: &str) -> AppResult<Vec<TireRequest>>;
}
