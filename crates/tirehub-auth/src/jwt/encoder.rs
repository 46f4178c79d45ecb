//! JWT token creation.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use tirehub_core::config::AuthConfig;
use tirehub_core::error::AppError;
use tirehub_core::types::SessionId;
use tirehub_entity::Employee;

use super::claims::Claims;

/// Upper bound on token lifetime (ten years).
const MAX_TTL_MINUTES: u64 = 10 * 365 * 24 * 60;

/// Signs HS256 access tokens.
#[derive(Clone)]
pub struct JwtEncoder {
    encoding_key: EncodingKey,
    ttl_minutes: i64,
}

impl std::fmt::Debug for JwtEncoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtEncoder")
            .field("ttl_minutes", &self.ttl_minutes)
            .finish_non_exhaustive()
    }
}

impl JwtEncoder {
    /// Creates an encoder from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl_minutes: config.token_ttl_minutes.min(MAX_TTL_MINUTES) as i64,
        }
    }

    /// Issues an access token for `employee` bound to `session_id`.
    pub fn issue(
        &self,
        employee: &Employee,
        session_id: SessionId,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let now = Utc::now();
        let exp = now + Duration::minutes(self.ttl_minutes);

        let claims = Claims {
            sub: employee.employee_id.clone(),
            sid: session_id,
            role: employee.role,
            email: employee.email.clone(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode access token: {e}")))?;
        Ok((token, exp))
    }
}
