//! Route handlers.

pub mod auth;
pub mod employee;
pub mod health;
pub mod tire_request;
