//! Applies a route requirement to the caller's role.

use tirehub_core::error::AppError;
use tirehub_entity::Role;

use super::policies::{Access, RoutePolicies};

/// Decides whether a caller may use a route.
#[derive(Debug, Clone, Default)]
pub struct RbacEnforcer {
    policies: RoutePolicies,
}

impl RbacEnforcer {
    /// Creates an enforcer over the default route table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requirement for `method` on `path`.
    pub fn access_for(&self, method: &str, path: &str) -> Access {
        self.policies.resolve(method, path)
    }

    /// Checks `role` (`None` when unauthenticated) against `access`.
    ///
    /// Missing credentials yield an authentication error; a role outside
    /// the allowed set yields an authorization error.
    pub fn check(&self, access: Access, role: Option<Role>) -> Result<(), AppError> {
        match (access, role) {
            (Access::Public, _) => Ok(()),
            (_, None) => Err(AppError::authentication("Full authentication is required")),
            (Access::Authenticated, Some(_)) => Ok(()),
            (Access::Roles(allowed), Some(role)) if allowed.contains(&role) => Ok(()),
            (Access::Roles(_), Some(role)) => Err(AppError::authorization(format!(
                "Role '{role}' is not permitted to access this resource"
            ))),
        }
    }
}
