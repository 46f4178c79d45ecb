//! Convenience result type alias for TireHub.

use crate::error::AppError;

/// A specialized `Result` type for TireHub operations.
pub type AppResult<T> = Result<T, AppError>;
