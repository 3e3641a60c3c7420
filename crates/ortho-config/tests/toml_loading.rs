//! Integration tests for TOML configuration loading.
//!
//! Uses `figment::Jail` for sandboxed file and env var manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use ortho_config::{ConfigError, OrthoConfig};
use pretty_assertions::assert_eq;

fn from_toml(path: &str) -> Figment {
    Figment::from(Serialized::defaults(OrthoConfig::default())).merge(Toml::file(path))
}

#[test]
fn loads_database_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "/var/lib/ortho/evidence.db"
"#,
        )?;

        let config: OrthoConfig = from_toml("config.toml").extract()?;

        assert_eq!(config.database.path, "/var/lib/ortho/evidence.db");
        assert_eq!(config.general.default_limit, 20);
        Ok(())
    });
}

#[test]
fn loads_full_config_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = ":memory:"

[general]
default_limit = 50
locale = "ja"
"#,
        )?;

        let config: OrthoConfig = from_toml("config.toml").extract()?;

        assert!(config.database.is_in_memory());
        assert_eq!(config.general.default_limit, 50);
        assert!(config.validate().is_ok());
        Ok(())
    });
}

#[test]
fn local_project_file_is_picked_up() {
    Jail::expect_with(|jail| {
        std::fs::create_dir_all(jail.directory().join(".ortho")).map_err(|e| e.to_string())?;
        jail.create_file(
            ".ortho/config.toml",
            r"
[general]
default_limit = 7
",
        )?;

        let config = OrthoConfig::load().map_err(|e| e.to_string())?;
        assert_eq!(config.general.default_limit, 7);
        Ok(())
    });
}

#[test]
fn env_var_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.set_env("ORTHO_DATABASE__PATH", "from-env.db");

        jail.create_file(
            "config.toml",
            r#"
[database]
path = "from-toml.db"

[general]
default_limit = 30
"#,
        )?;

        let config: OrthoConfig = from_toml("config.toml")
            .merge(Env::prefixed("ORTHO_").split("__"))
            .extract()?;

        // Env should win over TOML
        assert_eq!(config.database.path, "from-env.db");
        // TOML value not overridden by env should remain
        assert_eq!(config.general.default_limit, 30);
        Ok(())
    });
}

/// Typo'd env var keys are silently ignored by figment.
#[test]
fn typo_env_var_silently_ignored() {
    Jail::expect_with(|jail| {
        jail.set_env("ORTHO_DATABASE__PATHH", "typo.db");

        let config = OrthoConfig::load().map_err(|e| e.to_string())?;

        assert_eq!(config.database.path, ".ortho/evidence.db");
        Ok(())
    });
}

#[test]
fn full_env_provider_chain() {
    Jail::expect_with(|jail| {
        jail.set_env("ORTHO_DATABASE__PATH", "jail.db");
        jail.set_env("ORTHO_GENERAL__DEFAULT_LIMIT", "42");
        jail.set_env("ORTHO_GENERAL__LOCALE", "ja");

        let config = OrthoConfig::load().map_err(|e| e.to_string())?;

        assert_eq!(config.database.path, "jail.db");
        assert_eq!(config.general.default_limit, 42);
        assert!(config.validate().is_ok());
        Ok(())
    });
}

#[test]
fn wrong_type_is_a_figment_error() {
    Jail::expect_with(|jail| {
        jail.set_env("ORTHO_GENERAL__DEFAULT_LIMIT", "many");

        let err = OrthoConfig::load().unwrap_err();
        assert!(matches!(err, ConfigError::Figment(_)));
        Ok(())
    });
}

#[test]
fn unsupported_locale_fails_validation() {
    Jail::expect_with(|jail| {
        jail.set_env("ORTHO_GENERAL__LOCALE", "fr");

        let config = OrthoConfig::load().map_err(|e| e.to_string())?;
        let err = config.validate().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidValue { ref field, .. } if field == "general.locale"
        ));
        Ok(())
    });
}
