use std::collections::HashMap;
use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use salesq_core::config::{SecretsConfig, SecretsProvider};
use salesq_core::{PipelineError, SystemDetails};
use secrecy::SecretString;

/// Credential storage lookup by secret id.
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn secret_string(&self, secret_id: &str) -> Result<SecretString, PipelineError>;
}

/// Fetches and decodes the SAP system secret.
pub async fn system_details(
    store: &dyn SecretStore,
    secret_id: &str,
) -> Result<SystemDetails, PipelineError> {
    let raw = store.secret_string(secret_id).await?;
    SystemDetails::parse(&raw)
}

pub fn store_from_config(config: &SecretsConfig) -> Arc<dyn SecretStore> {
    match config.provider {
        SecretsProvider::Env => Arc::new(EnvSecretStore::new(config.env_prefix.clone())),
        SecretsProvider::File => Arc::new(FileSecretStore::new(config.directory.clone())),
    }
}

/// Reads `{prefix}{SECRET_ID}` from the process environment. The id is
/// upper-cased and non-alphanumeric characters become underscores, so
/// `S4_System_Details` maps to `SALESQ_SECRET_S4_SYSTEM_DETAILS`.
#[derive(Clone, Debug)]
pub struct EnvSecretStore {
    prefix: String,
}

impl EnvSecretStore {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    pub fn variable_name(&self, secret_id: &str) -> String {
        let normalized: String = secret_id
            .chars()
            .map(|ch| if ch.is_ascii_alphanumeric() { ch.to_ascii_uppercase() } else { '_' })
            .collect();
        format!("{}{normalized}", self.prefix)
    }
}

#[async_trait]
impl SecretStore for EnvSecretStore {
    async fn secret_string(&self, secret_id: &str) -> Result<SecretString, PipelineError> {
        let variable = self.variable_name(secret_id);
        match env::var(&variable) {
            Ok(value) if !value.trim().is_empty() => Ok(SecretString::from(value)),
            _ => Err(PipelineError::secret(format!(
                "secret `{secret_id}` not found (expected environment variable `{variable}`)"
            ))),
        }
    }
}

/// Reads `{directory}/{secret_id}.json`.
#[derive(Clone, Debug)]
pub struct FileSecretStore {
    directory: PathBuf,
}

impl FileSecretStore {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self { directory: directory.into() }
    }

    pub fn secret_path(&self, secret_id: &str) -> PathBuf {
        self.directory.join(format!("{secret_id}.json"))
    }
}

#[async_trait]
impl SecretStore for FileSecretStore {
    async fn secret_string(&self, secret_id: &str) -> Result<SecretString, PipelineError> {
        let path = self.secret_path(secret_id);
        let contents = tokio::fs::read_to_string(&path).await.map_err(|error| {
            PipelineError::secret(format!(
                "secret `{secret_id}` could not be read from `{}`: {error}",
                path.display()
            ))
        })?;
        Ok(SecretString::from(contents))
    }
}

/// In-memory store, for embedding and tests.
#[derive(Clone, Debug, Default)]
pub struct StaticSecretStore {
    secrets: HashMap<String, SecretString>,
}

impl StaticSecretStore {
    pub fn with_secret(mut self, secret_id: impl Into<String>, value: impl Into<String>) -> Self {
        self.secrets.insert(secret_id.into(), SecretString::from(value.into()));
        self
    }
}

#[async_trait]
impl SecretStore for StaticSecretStore {
    async fn secret_string(&self, secret_id: &str) -> Result<SecretString, PipelineError> {
        self.secrets
            .get(secret_id)
            .cloned()
            .ok_or_else(|| PipelineError::secret(format!("secret `{secret_id}` not found")))
    }
}
