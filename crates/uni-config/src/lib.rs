//! # uni-config
//!
//! Layered configuration loading for unidash using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`UNIDASH_*` prefix, `__` as separator)
//! 2. Project-level `.unidash/config.toml`
//! 3. User-level `~/.config/unidash/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `UNIDASH_API__BASE_URL` -> `api.base_url`,
//! `UNIDASH_UPLOAD__ALLOW_CSV` -> `upload.allow_csv`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use uni_config::DashConfig;
//!
//! let config = DashConfig::load_with_dotenv().expect("config");
//! config.validate().expect("valid config");
//! println!("backend: {}", config.api.base_url());
//! ```

mod api;
mod error;
mod session;
mod upload;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use session::SessionConfig;
pub use upload::UploadConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DashConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub upload: UploadConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl DashConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`load_with_dotenv`](Self::load_with_dotenv)
    /// if you need `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] when a source cannot be parsed.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests and the CLI can layer additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".unidash/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("UNIDASH_").split("__"))
    }

    /// Reject values that would make the client misbehave.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |field: &str, reason: &str| {
            Err(ConfigError::InvalidValue {
                field: field.to_string(),
                reason: reason.to_string(),
            })
        };

        if self.api.base_url.trim().is_empty() {
            return invalid("api.base_url", "must not be empty");
        }
        if self.api.request_timeout_secs == 0 {
            return invalid("api.request_timeout_secs", "must be greater than 0");
        }
        if self.api.upload_timeout_secs == 0 {
            return invalid("api.upload_timeout_secs", "must be greater than 0");
        }
        if self.upload.progress_step == 0 {
            return invalid("upload.progress_step", "must be greater than 0");
        }
        if self.upload.progress_ceiling >= 100 {
            return invalid("upload.progress_ceiling", "must be below 100");
        }
        if self.upload.max_files == 0 {
            return invalid("upload.max_files", "must be greater than 0");
        }
        if self.upload.progress_interval_ms == 0 {
            return invalid("upload.progress_interval_ms", "must be greater than 0");
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("unidash").join("config.toml"))
    }
}
