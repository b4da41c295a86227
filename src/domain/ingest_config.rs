use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

/// What an upload does with the received bytes
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum IngestMode {
    /// Store the file, then answer with row count and columns
    #[default]
    Persist,
    /// Parse in memory and answer with every record, storing nothing
    Echo,
}

/// HTTP status used for payload-level errors
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ErrorStatusPolicy {
    /// 400 for validation errors, 404 for missing files
    #[default]
    Mapped,
    /// Always 200; callers inspect the `error` field
    AlwaysOk,
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[serde(default)]
pub struct IngestConfig {
    #[validate(length(min = 1))]
    pub host: String,
    #[validate(range(min = 1))]
    pub port: u16,
    #[validate(length(min = 1))]
    pub upload_dir: String,
    pub mode: IngestMode,
    pub error_status: ErrorStatusPolicy,
    #[validate(length(min = 1))]
    pub log_filter: String,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8000,
            upload_dir: "uploads".to_string(),
            mode: IngestMode::Persist,
            error_status: ErrorStatusPolicy::Mapped,
            log_filter: "info".to_string(),
        }
    }
}

impl IngestConfig {
    pub fn upload_dir_path(&self) -> PathBuf {
        PathBuf::from(&self.upload_dir)
    }
}
