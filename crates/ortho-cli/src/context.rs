use std::path::PathBuf;

use anyhow::Context;
use ortho_config::OrthoConfig;
use ortho_db::service::EvidenceService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: EvidenceService,
    pub config: OrthoConfig,
    pub db_path: PathBuf,
}

impl AppContext {
    /// Open (creating if needed) the store at `db_path`.
    pub async fn init(db_path: PathBuf, config: OrthoConfig) -> anyhow::Result<Self> {
        if db_path.as_os_str() != ":memory:" {
            if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                std::fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create data directory {}", parent.display())
                })?;
            }
        }

        let service = EvidenceService::new_local(&db_path.to_string_lossy())
            .await
            .with_context(|| format!("failed to open {}", db_path.display()))?;
        tracing::debug!(path = %db_path.display(), "evidence store opened");

        Ok(Self {
            service,
            config,
            db_path,
        })
    }
}
