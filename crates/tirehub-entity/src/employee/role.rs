//! Employee role enumeration and normalization.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use tirehub_core::AppError;

/// Prefix every canonical role label carries.
pub const ROLE_PREFIX: &str = "ROLE_";

/// The closed set of roles a principal can hold.
///
/// Serialized and persisted in canonical form (`ROLE_USER`, ...).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(type_name = "employee_role")]
pub enum Role {
    /// Regular employee; submits tire requests.
    #[default]
    #[serde(rename = "ROLE_USER")]
    #[sqlx(rename = "ROLE_USER")]
    User,
    /// Manages employees and decides requests.
    #[serde(rename = "ROLE_MANAGER")]
    #[sqlx(rename = "ROLE_MANAGER")]
    Manager,
    /// Transport officer; decides requests.
    #[serde(rename = "ROLE_TTO")]
    #[sqlx(rename = "ROLE_TTO")]
    Tto,
}

impl Role {
    /// Return the canonical label.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "ROLE_USER",
            Self::Manager => "ROLE_MANAGER",
            Self::Tto => "ROLE_TTO",
        }
    }

    /// Whether this role may decide (approve or reject) tire requests.
    pub fn can_decide_requests(&self) -> bool {
        matches!(self, Self::Manager | Self::Tto)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        let suffix = upper.strip_prefix(ROLE_PREFIX).unwrap_or(&upper);
        match suffix {
            "USER" => Ok(Self::User),
            "MANAGER" => Ok(Self::Manager),
            "TTO" => Ok(Self::Tto),
            _ => Err(AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: ROLE_USER, ROLE_MANAGER, ROLE_TTO"
            ))),
        }
    }
}

/// Normalize a client-supplied role label.
///
/// Absent or blank input yields the default role. Otherwise the label is
/// upper-cased, the `ROLE_` prefix is optional, and the suffix must name a
/// known role.
pub fn normalize_role(input: Option<&str>) -> Result<Role, AppError> {
    match input.map(str::trim) {
        None | Some("") => Ok(Role::default()),
        Some(label) => label.parse(),
    }
}
