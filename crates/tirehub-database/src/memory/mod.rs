//! In-memory repository implementations backed by `DashMap`.
//!
//! Used when `database.provider = "memory"` and by the test suites. Data
//! lives for the lifetime of the process.

pub mod employee;
pub mod tire_request;

pub use employee::MemoryEmployeeRepository;
pub use tire_request::MemoryTireRequestRepository;
