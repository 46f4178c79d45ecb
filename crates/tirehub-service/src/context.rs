//! The authenticated actor passed into service calls.

use serde::{Deserialize, Serialize};

use tirehub_auth::Session;
use tirehub_core::types::SessionId;
use tirehub_entity::Role;

/// Who is acting on a request.
///
/// Resolved once per HTTP request by the authorization middleware and handed
/// to every service method that needs it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// The acting employee.
    pub employee_id: String,
    /// Login email.
    pub email: String,
    /// The single role the principal holds.
    pub role: Role,
    /// Session the request was authenticated with.
    pub session_id: SessionId,
}

impl Principal {
    /// Whether this principal may act on requests owned by `employee_id`.
    ///
    /// Deciders (managers and TTOs) may act on any request.
    pub fn may_act_for(&self, employee_id: &str) -> bool {
        self.role.can_decide_requests() || self.employee_id == employee_id
    }
}

impl From<Session> for Principal {
    fn from(session: Session) -> Self {
        Self {
            employee_id: session.employee_id,
            email: session.email,
            role: session.role,
            session_id: session.id,
        }
    }
}
