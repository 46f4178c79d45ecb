//! Employee directory.

pub mod service;

pub use service::{EmployeePatch, EmployeeService, NewEmployee};
