//! Listener and cross-origin settings.

use serde::{Deserialize, Serialize};

/// Where the HTTP listener binds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".into(),
            port: 8080,
            cors: CorsConfig::default(),
        }
    }
}

/// Browser origins allowed to call the API. A `"*"` entry in
/// `allowed_origins` or `allowed_headers` allows any value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
    pub allowed_methods: Vec<String>,
    pub allowed_headers: Vec<String>,
    /// Preflight cache lifetime.
    pub max_age_seconds: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3000".into()],
            allowed_methods: to_strings(&["GET", "POST", "PUT", "DELETE", "OPTIONS"]),
            allowed_headers: vec!["*".into()],
            max_age_seconds: 3600,
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}
