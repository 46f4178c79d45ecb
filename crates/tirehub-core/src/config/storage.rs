//! Image storage configuration.

use serde::{Deserialize, Serialize};

/// Where uploaded request images live and how large uploads may be.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory; each tire request gets a sub-directory named by its id.
    #[serde(default = "default_upload_dir")]
    pub upload_dir: String,
    /// Maximum request body size in bytes for multipart uploads (default 20 MB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: default_upload_dir(),
            max_upload_size_bytes: default_max_upload(),
        }
    }
}

fn default_upload_dir() -> String {
    "./uploads".to_string()
}

fn default_max_upload() -> u64 {
    20_971_520 // 20 MB
}
