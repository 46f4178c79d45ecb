//! Employee entity model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::role::Role;

/// A person who can sign in, submit tire requests, or decide them.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Externally assigned identifier (e.g. `E001`); primary key.
    pub employee_id: String,
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Login email; unique across employees (case-insensitive).
    pub email: String,
    /// Contact phone number.
    pub phone_number: Option<String>,
    /// Postal address.
    pub address: Option<String>,
    /// Job title.
    pub position: Option<String>,
    /// Department name.
    pub department: Option<String>,
    /// First day of employment.
    pub job_start_date: Option<NaiveDate>,
    /// Argon2 password hash.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    /// Assigned role.
    pub role: Role,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
    /// When the record was last changed.
    pub updated_at: DateTime<Utc>,
}

impl Employee {
    /// Whether `email` identifies this employee (case-insensitive).
    pub fn has_email(&self, email: &str) -> bool {
        self.email.eq_ignore_ascii_case(email.trim())
    }
}
