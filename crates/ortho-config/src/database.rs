//! Evidence database location.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default database file, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = ".ortho/evidence.db";

fn default_path() -> String {
    DEFAULT_DATABASE_PATH.to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path of the local libSQL database file. `:memory:` opens a throwaway
    /// in-memory store.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    pub fn is_configured(&self) -> bool {
        !self.path.trim().is_empty()
    }

    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }

    /// The database path, or [`ConfigError::NotConfigured`] when blank.
    pub fn resolve_path(&self) -> Result<PathBuf, ConfigError> {
        if self.is_configured() {
            Ok(PathBuf::from(self.path.trim()))
        } else {
            Err(ConfigError::NotConfigured {
                section: "database".into(),
            })
        }
    }
}
