use std::path::Path;

use anyhow::Context;
use cohort_config::CohortConfig;
use cohort_db::service::CohortService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: CohortService,
    pub config: CohortConfig,
}

impl AppContext {
    /// Open the configured database, creating its parent directory if needed.
    pub async fn init(config: CohortConfig) -> anyhow::Result<Self> {
        if !config.database.is_in_memory() {
            if let Some(parent) = Path::new(&config.database.path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create database directory {}", parent.display())
                    })?;
                }
            }
        }

        let service = CohortService::from_config(&config)
            .await
            .with_context(|| format!("failed to open database at {}", config.database.path))?;
        tracing::debug!(path = %config.database.path, "cohortctl: database ready");

        Ok(Self { service, config })
    }
}
