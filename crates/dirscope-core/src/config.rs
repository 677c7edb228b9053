//! Scan configuration types.

use std::path::PathBuf;
use std::time::Duration;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Upper bound on the number of largest files a report keeps.
pub const MAX_TOP_FILES: usize = 100;

/// Number of largest files kept by default.
pub const DEFAULT_TOP_FILES: usize = MAX_TOP_FILES;

/// Default interval between two progress polls, in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 200;

/// Configuration for scanning operations.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root path to scan.
    pub root: PathBuf,

    /// Number of threads for the entry-count pre-pass (0 = auto-detect).
    #[builder(default = "0")]
    #[serde(default)]
    pub threads: usize,

    /// Run the entry-count pre-pass used to normalize progress.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub count_entries: bool,

    /// Number of largest files to keep after the scan (1 to [`MAX_TOP_FILES`]).
    #[builder(default = "DEFAULT_TOP_FILES")]
    #[serde(default = "default_top_files")]
    pub top_files: usize,

    /// Interval between progress polls, in milliseconds.
    #[builder(default = "DEFAULT_POLL_INTERVAL_MS")]
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_true() -> bool {
    true
}

fn default_top_files() -> usize {
    DEFAULT_TOP_FILES
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL_MS
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        match self.top_files {
            Some(0) => return Err("top_files must be at least 1".to_string()),
            Some(n) if n > MAX_TOP_FILES => {
                return Err(format!("top_files cannot exceed {MAX_TOP_FILES}"));
            }
            _ => {}
        }
        if self.poll_interval_ms == Some(0) {
            return Err("poll_interval_ms must be at least 1".to_string());
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a simple config for scanning a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            threads: 0,
            count_entries: true,
            top_files: DEFAULT_TOP_FILES,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
        }
    }

    /// Poll cadence as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms.max(1))
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}
