//! # tirehub-service
//!
//! Business logic for TireHub. Services take the acting [`Principal`]
//! explicitly and orchestrate repositories, the image store, and password
//! hashing.

pub mod context;
pub mod employee;
pub mod tire_request;

pub use context::Principal;
pub use employee::{EmployeePatch, EmployeeService, NewEmployee};
pub use tire_request::{NewTireRequest, StatusChange, TireRequestService};
