//! # tirehub-entity
//!
//! Domain entity models for TireHub. Every struct in this crate represents
//! a database row or a domain value object; database entities derive
//! `sqlx::FromRow` and serialize with the camelCase field names the web
//! client expects.

pub mod employee;
pub mod tire_request;

pub use employee::{Employee, Role, normalize_role};
pub use tire_request::{CommentEntry, Decision, TireDetails, TireRequest, TireRequestStatus};
