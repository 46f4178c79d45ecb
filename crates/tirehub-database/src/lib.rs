//! # tirehub-database
//!
//! Persistence for TireHub: PostgreSQL connection management and
//! migrations, the repository traits the service layer depends on, and two
//! implementations of them (PostgreSQL and in-memory).

pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{EmployeeRepository, TireRequestRepository};
