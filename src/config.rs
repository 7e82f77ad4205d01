//! Client configuration

use crate::error::{DriveError, DriveResult};
use directories::ProjectDirs;
use std::path::PathBuf;
use std::time::Duration;

/// Upload chunk size: 1 MB
pub const DEFAULT_CHUNK_SIZE: u64 = 1024 * 1024;
/// Extra attempts for read queries (mutations are never retried)
pub const DEFAULT_RETRY_COUNT: u32 = 3;
/// How long a cached folder listing is served without refetching
pub const DEFAULT_STALE_TIME: Duration = Duration::from_secs(60);
/// Files uploaded in parallel when several are dropped at once
pub const MAX_CONCURRENT_UPLOADS: usize = 3;

const DB_FILE_NAME: &str = "clouddrive.db";

#[derive(Debug, Clone)]
pub struct DriveConfig {
    /// Storage API root, without trailing slash
    pub base_url: String,
    /// Sent as `Authorization: Bearer <token>` when present
    pub token: Option<String>,
    pub chunk_size: u64,
    pub retry_count: u32,
    pub stale_time: Duration,
    pub max_concurrent_uploads: usize,
    /// Where local preferences live; `None` keeps them in memory only
    pub data_dir: Option<PathBuf>,
}

impl DriveConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        DriveConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            retry_count: DEFAULT_RETRY_COUNT,
            stale_time: DEFAULT_STALE_TIME,
            max_concurrent_uploads: MAX_CONCURRENT_UPLOADS,
            data_dir: None,
        }
    }

    pub fn validate(&self) -> DriveResult<()> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(DriveError::InvalidInput(format!(
                "base URL must start with http:// or https://: {}",
                self.base_url
            )));
        }
        if self.chunk_size == 0 {
            return Err(DriveError::InvalidInput(
                "chunk size must be greater than zero".to_string(),
            ));
        }
        if self.max_concurrent_uploads == 0 {
            return Err(DriveError::InvalidInput(
                "upload concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn db_path(&self) -> Option<PathBuf> {
        self.data_dir.as_ref().map(|dir| dir.join(DB_FILE_NAME))
    }
}

/// Platform data directory (e.g. `~/.local/share/clouddrive`)
pub fn default_data_dir() -> Option<PathBuf> {
    ProjectDirs::from("com", "clouddrive", "clouddrive").map(|dirs| dirs.data_dir().to_path_buf())
}
