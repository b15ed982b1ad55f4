use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Default directory for uploaded datasets
pub const DEFAULT_UPLOAD_DIR: &str = "./temporary";

/// Default upload size limit (64 MiB)
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 64 * 1024 * 1024;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub upload_dir: PathBuf,
    pub max_upload_bytes: usize,
    /// CSV served to callers who have not selected a dataset
    pub demo_dataset: Option<PathBuf>,
}

impl StorageConfig {
    pub fn new(upload_dir: impl Into<PathBuf>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            demo_dataset: None,
        }
    }

    pub fn from_env() -> Self {
        Self {
            upload_dir: env::var("HOTEL_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_UPLOAD_DIR)),
            max_upload_bytes: env::var("HOTEL_MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            demo_dataset: env::var("HOTEL_DEMO_DATASET")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn with_demo_dataset(mut self, path: impl Into<PathBuf>) -> Self {
        self.demo_dataset = Some(path.into());
        self
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(DEFAULT_UPLOAD_DIR)
    }
}
