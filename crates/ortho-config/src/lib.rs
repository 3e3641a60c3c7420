//! # ortho-config
//!
//! Layered configuration loading for the evidence store using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ORTHO_*` prefix, `__` as separator)
//! 2. Project-level `.ortho/config.toml`
//! 3. User-level `~/.config/ortho/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ORTHO_DATABASE__PATH` -> `database.path` and
//! `ORTHO_GENERAL__DEFAULT_LIMIT` -> `general.default_limit`.
//!
//! # Usage
//!
//! ```no_run
//! use ortho_config::OrthoConfig;
//!
//! let config = OrthoConfig::load_with_dotenv().expect("config");
//! config.validate().expect("valid config");
//! println!("database: {}", config.database.path);
//! ```

mod database;
mod error;
mod general;

pub use database::{DEFAULT_DATABASE_PATH, DatabaseConfig};
pub use error::ConfigError;
pub use general::{GeneralConfig, SUPPORTED_LOCALES};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "ORTHO_";

/// Project-local config file.
pub const LOCAL_CONFIG_PATH: &str = ".ortho/config.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OrthoConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl OrthoConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` into the process environment.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(LOCAL_CONFIG_PATH);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check values that deserialize fine but cannot be used.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database.resolve_path()?;
        self.general.validate()
    }

    /// Path to the user-global config file.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ortho").join("config.toml"))
    }

    /// Load `.env` from the current directory or its ancestors. Missing files
    /// are not an error.
    fn load_dotenv() {
        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = OrthoConfig::default();
        assert_eq!(config.database.path, DEFAULT_DATABASE_PATH);
        assert_eq!(config.general.default_limit, 20);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: OrthoConfig = OrthoConfig::figment().extract()?;
            assert_eq!(config.general.locale, "ja");
            Ok(())
        });
    }

    #[test]
    fn global_config_lives_under_ortho_dir() {
        if let Some(path) = OrthoConfig::global_config_path() {
            assert!(path.ends_with("ortho/config.toml"));
        }
    }
}
