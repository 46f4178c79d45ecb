//! Core type definitions used across the TireHub workspace.

pub mod id;
pub mod response;

pub use id::*;
pub use response::ErrorBody;
