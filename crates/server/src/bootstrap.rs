use std::sync::Arc;

use salesq_agent::{SalesQueryCollaborators, UrlGeneratorCollaborators};
use salesq_core::config::{AppConfig, ConfigError, LoadOptions};
use salesq_core::PipelineError;
use thiserror::Error;
use tracing::info;

pub struct Application {
    pub config: Arc<AppConfig>,
}

#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("collaborator setup failed: {0}")]
    Collaborators(#[source] PipelineError),
}

pub fn bootstrap(options: LoadOptions) -> Result<Application, BootstrapError> {
    info!(event_name = "system.bootstrap.start", "starting application bootstrap");
    let config = AppConfig::load(options)?;
    bootstrap_with_config(config)
}

/// Builds both collaborator bundles once so a client that cannot be
/// constructed fails startup instead of the first invocation.
pub fn bootstrap_with_config(config: AppConfig) -> Result<Application, BootstrapError> {
    UrlGeneratorCollaborators::from_config(&config).map_err(BootstrapError::Collaborators)?;
    SalesQueryCollaborators::from_config(&config).map_err(BootstrapError::Collaborators)?;
    info!(
        event_name = "system.bootstrap.collaborators_ready",
        secrets_provider = ?config.secrets.provider,
        url_generator = %config.functions.url_generator,
        sales_query = %config.functions.sales_query,
        "collaborator clients constructed"
    );

    Ok(Application { config: Arc::new(config) })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use salesq_core::config::{ConfigOverrides, LoadOptions, SecretsProvider};
    use tempfile::TempDir;

    use crate::bootstrap::bootstrap;

    fn options(dir: &TempDir, contents: &str) -> LoadOptions {
        let path = dir.path().join("salesq.toml");
        fs::write(&path, contents).expect("write config");
        LoadOptions { config_path: Some(path), require_file: true, ..LoadOptions::default() }
    }

    #[test]
    fn bootstrap_fails_fast_on_invalid_endpoint() {
        let dir = TempDir::new().expect("tempdir");
        let options = options(&dir, "[llm]\nendpoint = \"bedrock.local\"\n");

        let message = bootstrap(options).err().expect("bootstrap must fail").to_string();

        assert!(message.contains("llm.endpoint"), "{message}");
    }

    #[test]
    fn bootstrap_shares_loaded_config() {
        let dir = TempDir::new().expect("tempdir");
        let app = bootstrap(LoadOptions {
            overrides: ConfigOverrides {
                secrets_provider: Some(SecretsProvider::File),
                secrets_directory: Some(dir.path().to_path_buf()),
                functions_endpoint: Some("http://127.0.0.1:9100".to_string()),
                ..ConfigOverrides::default()
            },
            ..options(&dir, "[knowledge_base]\nid = \"KB12345\"\n")
        })
        .expect("bootstrap succeeds");

        assert_eq!(app.config.knowledge_base.id, "KB12345");
        assert_eq!(app.config.secrets.provider, SecretsProvider::File);
        assert_eq!(app.config.functions.endpoint, "http://127.0.0.1:9100");
    }
}
