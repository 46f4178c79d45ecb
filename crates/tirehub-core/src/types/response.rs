//! Wire shapes shared by every crate that answers HTTP requests.

use serde::{Deserialize, Serialize};

/// Body of every error response: `{"error": "NOT_FOUND", "message": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Upper-case error category.
    pub error: String,
    pub message: String,
}
