use std::path::PathBuf;

use anyhow::Context;
use ortho_config::OrthoConfig;

use crate::cli::GlobalFlags;

/// Load and validate configuration (`.env`, TOML files, `ORTHO_*` env).
pub fn load_config() -> anyhow::Result<OrthoConfig> {
    let config = OrthoConfig::load_with_dotenv().context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    Ok(config)
}

/// `--db` wins over `database.path`.
pub fn resolve_db_path(flags: &GlobalFlags, config: &OrthoConfig) -> anyhow::Result<PathBuf> {
    if let Some(path) = flags.db.as_deref().map(str::trim).filter(|p| !p.is_empty()) {
        return Ok(PathBuf::from(path));
    }
    config.database.resolve_path().map_err(anyhow::Error::from)
}
