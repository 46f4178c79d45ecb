//! # tirehub-core
//!
//! Core crate for TireHub. Contains the unified error system, configuration
//! schemas, typed identifiers, and the persistence and image-store traits
//! implemented by the infrastructure crates.
//!
//! This crate has **no** internal dependencies on other TireHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
