//! Image storage configuration.

use serde::{Deserialize, Serialize};

/// Storage configuration for uploaded images.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Root directory for stored image files.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    /// Maximum accepted image size in bytes (default 10 MiB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// MIME types accepted for upload.
    #[serde(default = "default_allowed_mime_types")]
    pub allowed_mime_types: Vec<String>,
}

impl StorageConfig {
    /// Check whether a MIME type is accepted for upload.
    pub fn is_allowed(&self, mime_type: &str) -> bool {
        self.allowed_mime_types
            .iter()
            .any(|m| m.eq_ignore_ascii_case(mime_type))
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            max_upload_size_bytes: default_max_upload(),
            allowed_mime_types: default_allowed_mime_types(),
        }
    }
}

fn default_root_path() -> String {
    "./data/uploads".to_string()
}

fn default_max_upload() -> u64 {
    10_485_760 // 10 MiB
}

fn default_allowed_mime_types() -> Vec<String> {
    vec![
        "image/png".to_string(),
        "image/jpeg".to_string(),
        "image/gif".to_string(),
        "image/webp".to_string(),
    ]
}
