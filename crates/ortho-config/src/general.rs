//! General application configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Locales the narrative tables are written in.
pub const SUPPORTED_LOCALES: &[&str] = &["ja"];

/// Default result limit.
const fn default_limit() -> u32 {
    20
}

fn default_locale() -> String {
    "ja".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    /// Default result limit for list commands.
    #[serde(default = "default_limit")]
    pub default_limit: u32,

    /// Language of generated narrative text.
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            locale: default_locale(),
        }
    }
}

impl GeneralConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        if !SUPPORTED_LOCALES.contains(&self.locale.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "general.locale".into(),
                reason: format!(
                    "unsupported locale '{}' (supported: {})",
                    self.locale,
                    SUPPORTED_LOCALES.join(", ")
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.default_limit, 20);
        assert_eq!(config.locale, "ja");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_zero_limit() {
        let config = GeneralConfig {
            default_limit: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("general.default_limit"));
    }

    #[test]
    fn rejects_unknown_locale() {
        let config = GeneralConfig {
            locale: "en".into(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("unsupported locale 'en'"));
    }
}
