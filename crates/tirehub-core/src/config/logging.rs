//! Log output settings.

use serde::{Deserialize, Serialize};

/// How the server writes its logs.
///
/// `level` is an `EnvFilter` directive such as `"info"` or
/// `"debug,tower_http=info"`; `RUST_LOG` takes precedence when set.
/// `format` selects `"json"` lines or human-readable `"pretty"` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

impl LoggingConfig {
    /// Whether logs should be emitted as JSON lines.
    pub fn is_json(&self) -> bool {
        self.format.eq_ignore_ascii_case("json")
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "json".into(),
        }
    }
}
