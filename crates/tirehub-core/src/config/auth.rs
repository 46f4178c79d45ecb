//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// Authentication, token, and session configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Access token TTL in minutes.
    #[serde(default = "default_token_ttl")]
    pub token_ttl_minutes: u64,
    /// Idle timeout in minutes before a session is dropped.
    #[serde(default = "default_idle_timeout")]
    pub session_idle_timeout_minutes: u64,
    /// Upper bound on concurrently live sessions.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            token_ttl_minutes: default_token_ttl(),
            session_idle_timeout_minutes: default_idle_timeout(),
            max_sessions: default_max_sessions(),
            password_min_length: default_password_min(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_token_ttl() -> u64 {
    480
}

fn default_idle_timeout() -> u64 {
    30
}

fn default_max_sessions() -> u64 {
    10_000
}

fn default_password_min() -> usize {
    8
}
