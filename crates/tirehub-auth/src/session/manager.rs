//! Session lifecycle: login, token authentication, logout.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use tirehub_core::config::AuthConfig;
use tirehub_core::error::AppError;
use tirehub_core::types::SessionId;
use tirehub_database::EmployeeRepository;
use tirehub_entity::Employee;

use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;

use super::store::{Session, SessionStore};

const INVALID_CREDENTIALS: &str = "Error: Invalid email or password.";

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct LoginResult {
    /// Signed access token.
    pub token: String,
    /// Token expiry.
    pub expires_at: DateTime<Utc>,
    /// The session the token is bound to.
    pub session: Session,
    /// The authenticated employee.
    pub employee: Employee,
}

/// Ties credentials, sessions and tokens together.
#[derive(Debug, Clone)]
pub struct SessionManager {
    employees: Arc<dyn EmployeeRepository>,
    hasher: Arc<PasswordHasher>,
    store: SessionStore,
    encoder: JwtEncoder,
    decoder: JwtDecoder,
}

impl SessionManager {
    /// Creates a session manager.
    pub fn new(
        employees: Arc<dyn EmployeeRepository>,
        hasher: Arc<PasswordHasher>,
        config: &AuthConfig,
    ) -> Self {
        Self {
            employees,
            hasher,
            store: SessionStore::new(config),
            encoder: JwtEncoder::new(config),
            decoder: JwtDecoder::new(config),
        }
    }

    /// Verifies credentials, opens a session and issues a token for it.
    ///
    /// Unknown email and wrong password fail identically.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResult, AppError> {
        let Some(employee) = self.employees.find_by_email(email.trim()).await? else {
            warn!(email = %email.trim(), "Login failed: unknown email");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        };

        if !self
            .hasher
            .verify_password(password, &employee.password_hash)?
        {
            warn!(employee_id = %employee.employee_id, "Login failed: wrong password");
            return Err(AppError::authentication(INVALID_CREDENTIALS));
        }

        let session = Session {
            id: SessionId::new(),
            employee_id: employee.employee_id.clone(),
            email: employee.email.clone(),
            role: employee.role,
            created_at: Utc::now(),
        };
        let (token, expires_at) = self.encoder.issue(&employee, session.id)?;
        self.store.insert(session.clone()).await;

        info!(
            employee_id = %employee.employee_id,
            session_id = %session.id,
            role = %employee.role,
            "Login successful"
        );

        Ok(LoginResult {
            token,
            expires_at,
            session,
            employee,
        })
    }

    /// Resolves a bearer token to its live session.
    ///
    /// Fails when the token is invalid or expired, or its session has been
    /// terminated or has idled out.
    pub async fn authenticate(&self, token: &str) -> Result<Session, AppError> {
        let claims = self.decoder.decode(token)?;
        let session = self
            .store
            .get(&claims.sid)
            .await
            .ok_or_else(|| AppError::authentication("Session has expired or was terminated"))?;

        if session.employee_id != claims.sub {
            warn!(session_id = %session.id, "Token subject does not match session");
            return Err(AppError::authentication("Invalid token"));
        }
        Ok(session)
    }

    /// Terminates a session; tokens bound to it stop working.
    pub async fn logout(&self, session_id: &SessionId) {
        if let Some(session) = self.store.remove(session_id).await {
            info!(
                employee_id = %session.employee_id,
                session_id = %session.id,
                "Logout completed"
            );
        }
    }
}
