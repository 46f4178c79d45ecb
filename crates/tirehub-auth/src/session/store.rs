//! In-process session store with idle expiry.

use std::time::Duration;

use chrono::{DateTime, Utc};
use moka::future::Cache;
use serde::{Deserialize, Serialize};

use tirehub_core::config::AuthConfig;
use tirehub_core::types::SessionId;
use tirehub_entity::Role;

/// A live login session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    /// Session identifier, embedded in tokens as `sid`.
    pub id: SessionId,
    /// The signed-in employee.
    pub employee_id: String,
    /// Login email.
    pub email: String,
    /// Role captured at login.
    pub role: Role,
    /// When the session was opened.
    pub created_at: DateTime<Utc>,
}

/// Sessions keyed by id. Entries expire after the configured idle time and
/// reads count as activity.
#[derive(Debug, Clone)]
pub struct SessionStore {
    cache: Cache<SessionId, Session>,
}

impl SessionStore {
    /// Creates a store sized and timed from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(config.max_sessions)
            .time_to_idle(Duration::from_secs(
                config.session_idle_timeout_minutes.saturating_mul(60),
            ))
            .build();
        Self { cache }
    }

    /// Stores a session.
    pub async fn insert(&self, session: Session) {
        self.cache.insert(session.id, session).await;
    }

    /// Looks up a live session, refreshing its idle timer.
    pub async fn get(&self, id: &SessionId) -> Option<Session> {
        self.cache.get(id).await
    }

    /// Removes a session. Returns the removed entry, if any.
    pub async fn remove(&self, id: &SessionId) -> Option<Session> {
        self.cache.remove(id).await
    }
}
