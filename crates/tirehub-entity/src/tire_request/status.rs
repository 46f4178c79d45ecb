//! Tire request status enumeration.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use tirehub_core::AppError;

/// Lifecycle state of a tire request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "tire_request_status")]
pub enum TireRequestStatus {
    /// Submitted and awaiting a decision.
    Pending,
    /// Approved by a manager or transport officer.
    Approved,
    /// Rejected by a manager or transport officer.
    Rejected,
}

impl TireRequestStatus {
    /// Return the status label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }

    /// Whether a decision has been recorded.
    pub fn is_final(&self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for TireRequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TireRequestStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(AppError::validation(format!(
                "Invalid status value: '{s}'. Expected one of: Pending, Approved, Rejected"
            ))),
        }
    }
}

/// The outcome a status transition may move a pending request to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    /// Approve the request.
    Approved,
    /// Reject the request.
    Rejected,
}

impl Decision {
    /// The status a request holds after this decision.
    pub fn status(&self) -> TireRequestStatus {
        match self {
            Self::Approved => TireRequestStatus::Approved,
            Self::Rejected => TireRequestStatus::Rejected,
        }
    }
}

impl FromStr for Decision {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(AppError::validation(
                "Invalid status value. Must be 'Approved' or 'Rejected'.",
            )),
        }
    }
}
