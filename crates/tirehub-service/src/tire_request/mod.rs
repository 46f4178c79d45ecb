//! Tire request lifecycle.

pub mod saga;
pub mod service;

pub use service::{NewTireRequest, StatusChange, TireRequestService};
