//! Client-side upload policy.

use serde::{Deserialize, Serialize};

/// 10 MiB.
const fn default_max_file_size() -> u64 {
    10 * 1024 * 1024
}

const fn default_max_files() -> usize {
    10
}

const fn default_progress_step() -> u8 {
    10
}

const fn default_progress_ceiling() -> u8 {
    90
}

const fn default_progress_interval() -> u64 {
    200
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UploadConfig {
    /// Accept `.csv` in addition to `.xlsx` / `.xls`.
    #[serde(default)]
    pub allow_csv: bool,

    #[serde(default = "default_max_file_size")]
    pub max_file_size_bytes: u64,

    /// Maximum number of files in one multi-file batch.
    #[serde(default = "default_max_files")]
    pub max_files: usize,

    /// Percent added on every progress tick.
    #[serde(default = "default_progress_step")]
    pub progress_step: u8,

    /// Simulated progress never passes this value before the request settles.
    #[serde(default = "default_progress_ceiling")]
    pub progress_ceiling: u8,

    #[serde(default = "default_progress_interval")]
    pub progress_interval_ms: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            allow_csv: false,
            max_file_size_bytes: default_max_file_size(),
            max_files: default_max_files(),
            progress_step: default_progress_step(),
            progress_ceiling: default_progress_ceiling(),
            progress_interval_ms: default_progress_interval(),
        }
    }
}
