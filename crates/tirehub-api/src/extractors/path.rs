//! Typed path parameter helpers.

use tirehub_core::error::AppError;
use tirehub_core::types::TireRequestId;

/// Parses a tire request id from a path segment.
///
/// A malformed id cannot name a stored request, so it is reported as not found.
pub fn parse_request_id(s: &str) -> Result<TireRequestId, AppError> {
    s.parse()
        .map_err(|_| AppError::not_found("TireRequest not found."))
}
