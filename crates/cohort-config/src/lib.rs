//! # cohort-config
//!
//! Layered configuration loading for the cohort crates using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`COHORT_*` prefix, `__` as separator)
//! 2. Project-level `.cohort/config.toml`
//! 3. User-level `~/.config/cohort/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `COHORT_DATABASE__PATH` -> `database.path`,
//! `COHORT_BACKFILL__PAGE_SIZE` -> `backfill.page_size`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use cohort_config::CohortConfig;
//!
//! let config = CohortConfig::load_with_dotenv().expect("config");
//! println!("database: {}", config.database.path);
//! ```

mod attendance;
mod backfill;
mod database;
mod error;
mod general;

pub use attendance::AttendanceConfig;
pub use backfill::BackfillConfig;
pub use database::{DatabaseConfig, IN_MEMORY};
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CohortConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub attendance: AttendanceConfig,
    #[serde(default)]
    pub backfill: BackfillConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl CohortConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Extract and validate a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is out of range.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".cohort/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("COHORT_").split("__"))
    }

    /// Reject values that would make the engine misbehave.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.attendance.conflict_retry_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "attendance.conflict_retry_attempts".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.attendance.retry_max_delay_ms < self.attendance.retry_base_delay_ms {
            return Err(ConfigError::InvalidValue {
                field: "attendance.retry_max_delay_ms".into(),
                reason: "must not be smaller than retry_base_delay_ms".into(),
            });
        }
        if self.backfill.page_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "backfill.page_size".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cohort").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir looking
    /// for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CohortConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.attendance.conflict_retry_attempts, 4);
        assert_eq!(config.backfill.page_size, 100);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        let mut config = CohortConfig::default();
        config.backfill.page_size = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("backfill.page_size"));
    }

    #[test]
    fn inverted_backoff_bounds_are_rejected() {
        let mut config = CohortConfig::default();
        config.attendance.retry_base_delay_ms = 1_000;
        config.attendance.retry_max_delay_ms = 10;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
