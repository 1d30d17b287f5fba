//! Startup: configuration, secrets, catalog and service wiring.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use netmate_application::DialogueController;
use netmate_core::config::AppConfig;
use netmate_infrastructure::{
    CatalogCache, ConfigStorage, CsvCatalogSource, NetmatePaths, SecretStorage,
};
use netmate_interaction::{GeminiApiAgent, OutageCheckClient};

/// Command-line overrides for file-based configuration.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub config: Option<PathBuf>,
    pub secret: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub outage_endpoint: Option<String>,
}

/// Loads `config.toml` and applies command-line overrides.
pub fn load_config(overrides: &Overrides) -> Result<AppConfig> {
    let path = match &overrides.config {
        Some(path) => path.clone(),
        None => NetmatePaths::config_file().map_err(|e| anyhow!("{e}"))?,
    };
    let mut config = ConfigStorage::new(path.clone())
        .load()
        .map_err(|e| anyhow!("Failed to load {}: {e}", path.display()))?;

    if let Some(catalog) = &overrides.catalog {
        config.catalog_path = Some(catalog.clone());
    }
    if let Some(endpoint) = &overrides.outage_endpoint {
        config.outage.endpoint = endpoint.clone();
    }
    Ok(config)
}

/// Resolves the catalog file: configured path (relative to the config
/// directory) or the default file in the config directory.
pub fn catalog_path(config: &AppConfig) -> Result<PathBuf> {
    match &config.catalog_path {
        Some(configured) if configured.is_absolute() => Ok(configured.clone()),
        Some(configured) => {
            let base = NetmatePaths::config_dir().map_err(|e| anyhow!("{e}"))?;
            Ok(NetmatePaths::resolve_catalog_path(configured, &base))
        }
        None => NetmatePaths::default_catalog_file().map_err(|e| anyhow!("{e}")),
    }
}

/// Builds the dialogue controller.
///
/// A catalog that cannot be loaded aborts startup.
pub fn build_controller(config: &AppConfig, overrides: &Overrides) -> Result<DialogueController> {
    let catalog_file = catalog_path(config)?;
    let cache = CatalogCache::new(CsvCatalogSource::new(&catalog_file));
    let catalog = cache
        .get()
        .with_context(|| format!("Cannot start without a catalog ({})", catalog_file.display()))?;
    tracing::info!("[Bootstrap] Catalog ready with {} issues", catalog.len());

    let secret_storage = match &overrides.secret {
        Some(path) => SecretStorage::with_path(path.clone()),
        None => SecretStorage::new().map_err(|e| anyhow!("{e}"))?,
    };
    let secrets = secret_storage
        .load_with_env()
        .map_err(|e| anyhow!("Failed to load secrets: {e}"))?;
    let backend = GeminiApiAgent::from_secret(secrets.gemini.as_ref(), config.gemini.clone())?;
    tracing::info!("[Bootstrap] Gemini backend using model {}", backend.model());

    let outage = OutageCheckClient::from_config(&config.outage)?;
    tracing::info!(
        "[Bootstrap] Outage checks against {} (timeout {}s)",
        outage.endpoint(),
        config.outage.timeout_secs
    );

    let controller = DialogueController::new(catalog, Arc::new(backend), Arc::new(outage))?
        .with_cooldown(Duration::from_secs(config.dialogue.cooldown_secs));
    Ok(controller)
}
