use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_MODEL_ID: &str = "anthropic.claude-3-sonnet-20240229-v1:0";
pub const DEFAULT_KNOWLEDGE_BASE_ID: &str = "H9BTQMHAEO";
pub const DEFAULT_SECRET_ID: &str = "S4_System_Details";
pub const URL_GENERATOR_FUNCTION: &str = "SAP-Odata-URL-Generation";
pub const SALES_QUERY_FUNCTION: &str = "SAP-Sales-Order-Query";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub knowledge_base: KnowledgeBaseConfig,
    pub secrets: SecretsConfig,
    pub sap: SapConfig,
    pub functions: FunctionsConfig,
    pub server: ServerConfig,
    pub response: ResponseConfig,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug)]
pub struct LlmConfig {
    pub endpoint: String,
    pub api_key: Option<SecretString>,
    pub model: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct KnowledgeBaseConfig {
    pub endpoint: String,
    pub api_key: Option<SecretString>,
    pub id: String,
    pub number_of_results: u32,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct SecretsConfig {
    pub provider: SecretsProvider,
    pub secret_id: String,
    pub env_prefix: String,
    pub directory: PathBuf,
}

#[derive(Clone, Debug)]
pub struct SapConfig {
    pub timeout_secs: u64,
    pub max_page_size: u32,
}

#[derive(Clone, Debug)]
pub struct FunctionsConfig {
    pub endpoint: String,
    pub url_generator: String,
    pub sales_query: String,
    pub timeout_secs: u64,
}

#[derive(Clone, Debug)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
    pub graceful_shutdown_secs: u64,
}

#[derive(Clone, Debug)]
pub struct ResponseConfig {
    pub include_error_detail: bool,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SecretsProvider {
    Env,
    File,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub llm_endpoint: Option<String>,
    pub llm_api_key: Option<String>,
    pub llm_model: Option<String>,
    pub knowledge_base_endpoint: Option<String>,
    pub knowledge_base_id: Option<String>,
    pub secrets_provider: Option<SecretsProvider>,
    pub secrets_directory: Option<PathBuf>,
    pub sap_timeout_secs: Option<u64>,
    pub functions_endpoint: Option<String>,
    pub include_error_detail: Option<bool>,
    pub log_level: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            llm: LlmConfig {
                endpoint: "https://bedrock-runtime.us-east-1.amazonaws.com".to_string(),
                api_key: None,
                model: DEFAULT_MODEL_ID.to_string(),
                timeout_secs: 60,
            },
            knowledge_base: KnowledgeBaseConfig {
                endpoint: "https://bedrock-agent-runtime.us-east-1.amazonaws.com".to_string(),
                api_key: None,
                id: DEFAULT_KNOWLEDGE_BASE_ID.to_string(),
                number_of_results: 3,
                timeout_secs: 30,
            },
            secrets: SecretsConfig {
                provider: SecretsProvider::Env,
                secret_id: DEFAULT_SECRET_ID.to_string(),
                env_prefix: "SALESQ_SECRET_".to_string(),
                directory: PathBuf::from("secrets"),
            },
            sap: SapConfig { timeout_secs: 30, max_page_size: 500 },
            functions: FunctionsConfig {
                endpoint: "http://127.0.0.1:9000".to_string(),
                url_generator: URL_GENERATOR_FUNCTION.to_string(),
                sales_query: SALES_QUERY_FUNCTION.to_string(),
                timeout_secs: 90,
            },
            server: ServerConfig {
                bind_address: "127.0.0.1".to_string(),
                port: 9000,
                graceful_shutdown_secs: 15,
            },
            response: ResponseConfig { include_error_detail: false },
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
        }
    }
}

fn secret_value(value: String) -> SecretString {
    value.into()
}

impl std::str::FromStr for SecretsProvider {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "env" => Ok(Self::Env),
            "file" => Ok(Self::File),
            other => Err(ConfigError::Validation(format!(
                "unsupported secrets provider `{other}` (expected env|file)"
            ))),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options.config_path.unwrap_or_else(|| PathBuf::from("salesq.toml"));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(llm) = patch.llm {
            if let Some(endpoint) = llm.endpoint {
                self.llm.endpoint = endpoint;
            }
            if let Some(api_key) = llm.api_key {
                self.llm.api_key = Some(secret_value(api_key));
            }
            if let Some(model) = llm.model {
                self.llm.model = model;
            }
            if let Some(timeout_secs) = llm.timeout_secs {
                self.llm.timeout_secs = timeout_secs;
            }
        }

        if let Some(knowledge_base) = patch.knowledge_base {
            if let Some(endpoint) = knowledge_base.endpoint {
                self.knowledge_base.endpoint = endpoint;
            }
            if let Some(api_key) = knowledge_base.api_key {
                self.knowledge_base.api_key = Some(secret_value(api_key));
            }
            if let Some(id) = knowledge_base.id {
                self.knowledge_base.id = id;
            }
            if let Some(number_of_results) = knowledge_base.number_of_results {
                self.knowledge_base.number_of_results = number_of_results;
            }
            if let Some(timeout_secs) = knowledge_base.timeout_secs {
                self.knowledge_base.timeout_secs = timeout_secs;
            }
        }

        if let Some(secrets) = patch.secrets {
            if let Some(provider) = secrets.provider {
                self.secrets.provider = provider;
            }
            if let Some(secret_id) = secrets.secret_id {
                self.secrets.secret_id = secret_id;
            }
            if let Some(env_prefix) = secrets.env_prefix {
                self.secrets.env_prefix = env_prefix;
            }
            if let Some(directory) = secrets.directory {
                self.secrets.directory = directory;
            }
        }

        if let Some(sap) = patch.sap {
            if let Some(timeout_secs) = sap.timeout_secs {
                self.sap.timeout_secs = timeout_secs;
            }
            if let Some(max_page_size) = sap.max_page_size {
                self.sap.max_page_size = max_page_size;
            }
        }

        if let Some(functions) = patch.functions {
            if let Some(endpoint) = functions.endpoint {
                self.functions.endpoint = endpoint;
            }
            if let Some(url_generator) = functions.url_generator {
                self.functions.url_generator = url_generator;
            }
            if let Some(sales_query) = functions.sales_query {
                self.functions.sales_query = sales_query;
            }
            if let Some(timeout_secs) = functions.timeout_secs {
                self.functions.timeout_secs = timeout_secs;
            }
        }

        if let Some(server) = patch.server {
            if let Some(bind_address) = server.bind_address {
                self.server.bind_address = bind_address;
            }
            if let Some(port) = server.port {
                self.server.port = port;
            }
            if let Some(graceful_shutdown_secs) = server.graceful_shutdown_secs {
                self.server.graceful_shutdown_secs = graceful_shutdown_secs;
            }
        }

        if let Some(response) = patch.response {
            if let Some(include_error_detail) = response.include_error_detail {
                self.response.include_error_detail = include_error_detail;
            }
        }

        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Some(value) = read_env("SALESQ_LLM_ENDPOINT") {
            self.llm.endpoint = value;
        }
        // Bedrock's own bearer-token variable is honoured when ours is unset.
        let llm_api_key =
            read_env("SALESQ_LLM_API_KEY").or_else(|| read_env("AWS_BEARER_TOKEN_BEDROCK"));
        if let Some(value) = llm_api_key {
            self.llm.api_key = Some(secret_value(value));
        }
        if let Some(value) = read_env("SALESQ_LLM_MODEL") {
            self.llm.model = value;
        }
        if let Some(value) = read_env("SALESQ_LLM_TIMEOUT_SECS") {
            self.llm.timeout_secs = parse_u64("SALESQ_LLM_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("SALESQ_KNOWLEDGE_BASE_ENDPOINT") {
            self.knowledge_base.endpoint = value;
        }
        if let Some(value) = read_env("SALESQ_KNOWLEDGE_BASE_API_KEY") {
            self.knowledge_base.api_key = Some(secret_value(value));
        }
        if let Some(value) = read_env("SALESQ_KNOWLEDGE_BASE_ID") {
            self.knowledge_base.id = value;
        }
        if let Some(value) = read_env("SALESQ_KNOWLEDGE_BASE_NUMBER_OF_RESULTS") {
            self.knowledge_base.number_of_results =
                parse_u32("SALESQ_KNOWLEDGE_BASE_NUMBER_OF_RESULTS", &value)?;
        }
        if let Some(value) = read_env("SALESQ_KNOWLEDGE_BASE_TIMEOUT_SECS") {
            self.knowledge_base.timeout_secs =
                parse_u64("SALESQ_KNOWLEDGE_BASE_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("SALESQ_SECRETS_PROVIDER") {
            self.secrets.provider = value.parse()?;
        }
        if let Some(value) = read_env("SALESQ_SECRETS_SECRET_ID") {
            self.secrets.secret_id = value;
        }
        if let Some(value) = read_env("SALESQ_SECRETS_ENV_PREFIX") {
            self.secrets.env_prefix = value;
        }
        if let Some(value) = read_env("SALESQ_SECRETS_DIRECTORY") {
            self.secrets.directory = PathBuf::from(value);
        }

        if let Some(value) = read_env("SALESQ_SAP_TIMEOUT_SECS") {
            self.sap.timeout_secs = parse_u64("SALESQ_SAP_TIMEOUT_SECS", &value)?;
        }
        if let Some(value) = read_env("SALESQ_SAP_MAX_PAGE_SIZE") {
            self.sap.max_page_size = parse_u32("SALESQ_SAP_MAX_PAGE_SIZE", &value)?;
        }

        if let Some(value) = read_env("SALESQ_FUNCTIONS_ENDPOINT") {
            self.functions.endpoint = value;
        }
        if let Some(value) = read_env("SALESQ_FUNCTIONS_URL_GENERATOR") {
            self.functions.url_generator = value;
        }
        if let Some(value) = read_env("SALESQ_FUNCTIONS_SALES_QUERY") {
            self.functions.sales_query = value;
        }
        if let Some(value) = read_env("SALESQ_FUNCTIONS_TIMEOUT_SECS") {
            self.functions.timeout_secs = parse_u64("SALESQ_FUNCTIONS_TIMEOUT_SECS", &value)?;
        }

        if let Some(value) = read_env("SALESQ_SERVER_BIND_ADDRESS") {
            self.server.bind_address = value;
        }
        if let Some(value) = read_env("SALESQ_SERVER_PORT") {
            self.server.port = parse_u16("SALESQ_SERVER_PORT", &value)?;
        }
        if let Some(value) = read_env("SALESQ_SERVER_GRACEFUL_SHUTDOWN_SECS") {
            self.server.graceful_shutdown_secs =
                parse_u64("SALESQ_SERVER_GRACEFUL_SHUTDOWN_SECS", &value)?;
        }

        if let Some(value) = read_env("SALESQ_RESPONSE_INCLUDE_ERROR_DETAIL") {
            self.response.include_error_detail =
                parse_bool("SALESQ_RESPONSE_INCLUDE_ERROR_DETAIL", &value)?;
        }

        let log_level = read_env("SALESQ_LOGGING_LEVEL").or_else(|| read_env("SALESQ_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("SALESQ_LOGGING_FORMAT").or_else(|| read_env("SALESQ_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(endpoint) = overrides.llm_endpoint {
            self.llm.endpoint = endpoint;
        }
        if let Some(api_key) = overrides.llm_api_key {
            self.llm.api_key = Some(secret_value(api_key));
        }
        if let Some(model) = overrides.llm_model {
            self.llm.model = model;
        }
        if let Some(endpoint) = overrides.knowledge_base_endpoint {
            self.knowledge_base.endpoint = endpoint;
        }
        if let Some(id) = overrides.knowledge_base_id {
            self.knowledge_base.id = id;
        }
        if let Some(provider) = overrides.secrets_provider {
            self.secrets.provider = provider;
        }
        if let Some(directory) = overrides.secrets_directory {
            self.secrets.directory = directory;
        }
        if let Some(timeout_secs) = overrides.sap_timeout_secs {
            self.sap.timeout_secs = timeout_secs;
        }
        if let Some(endpoint) = overrides.functions_endpoint {
            self.functions.endpoint = endpoint;
        }
        if let Some(include_error_detail) = overrides.include_error_detail {
            self.response.include_error_detail = include_error_detail;
        }
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_llm(&self.llm)?;
        validate_knowledge_base(&self.knowledge_base)?;
        validate_secrets(&self.secrets)?;
        validate_sap(&self.sap)?;
        validate_functions(&self.functions)?;
        validate_server(&self.server)?;
        validate_logging(&self.logging)?;
        Ok(())
    }

    /// Value of the `Prefer` header sent to the SAP gateway.
    pub fn odata_preference(&self) -> String {
        format!("odata.maxpagesize={}, odata.track-changes", self.sap.max_page_size)
    }
}

fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    [PathBuf::from("salesq.toml"), PathBuf::from("config/salesq.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_http_url(field: &str, value: &str) -> Result<(), ConfigError> {
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!("{field} must start with http:// or https://")))
    }
}

fn validate_timeout(field: &str, timeout_secs: u64) -> Result<(), ConfigError> {
    if timeout_secs == 0 || timeout_secs > 900 {
        return Err(ConfigError::Validation(format!("{field} must be in range 1..=900")));
    }
    Ok(())
}

fn validate_llm(llm: &LlmConfig) -> Result<(), ConfigError> {
    validate_http_url("llm.endpoint", llm.endpoint.trim())?;
    validate_timeout("llm.timeout_secs", llm.timeout_secs)?;

    if llm.model.trim().is_empty() {
        return Err(ConfigError::Validation("llm.model must not be empty".to_string()));
    }

    let blank_key = llm.api_key.as_ref().is_some_and(|key| key.expose_secret().trim().is_empty());
    if blank_key {
        return Err(ConfigError::Validation(
            "llm.api_key is set but empty; unset it or provide a bearer token".to_string(),
        ));
    }

    Ok(())
}

fn validate_knowledge_base(knowledge_base: &KnowledgeBaseConfig) -> Result<(), ConfigError> {
    validate_http_url("knowledge_base.endpoint", knowledge_base.endpoint.trim())?;
    validate_timeout("knowledge_base.timeout_secs", knowledge_base.timeout_secs)?;

    if knowledge_base.id.trim().is_empty() {
        return Err(ConfigError::Validation("knowledge_base.id must not be empty".to_string()));
    }

    if !(1..=100).contains(&knowledge_base.number_of_results) {
        return Err(ConfigError::Validation(
            "knowledge_base.number_of_results must be in range 1..=100".to_string(),
        ));
    }

    Ok(())
}

fn validate_secrets(secrets: &SecretsConfig) -> Result<(), ConfigError> {
    if secrets.secret_id.trim().is_empty() {
        return Err(ConfigError::Validation("secrets.secret_id must not be empty".to_string()));
    }

    match secrets.provider {
        SecretsProvider::Env if secrets.env_prefix.trim().is_empty() => Err(
            ConfigError::Validation("secrets.env_prefix is required for env provider".to_string()),
        ),
        SecretsProvider::File if secrets.directory.as_os_str().is_empty() => {
            Err(ConfigError::Validation(
                "secrets.directory is required for file provider".to_string(),
            ))
        }
        _ => Ok(()),
    }
}

fn validate_sap(sap: &SapConfig) -> Result<(), ConfigError> {
    validate_timeout("sap.timeout_secs", sap.timeout_secs)?;

    if sap.max_page_size == 0 {
        return Err(ConfigError::Validation(
            "sap.max_page_size must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_functions(functions: &FunctionsConfig) -> Result<(), ConfigError> {
    validate_http_url("functions.endpoint", functions.endpoint.trim())?;
    validate_timeout("functions.timeout_secs", functions.timeout_secs)?;

    if functions.url_generator.trim().is_empty() || functions.sales_query.trim().is_empty() {
        return Err(ConfigError::Validation("function names must not be empty".to_string()));
    }
    if functions.url_generator == functions.sales_query {
        return Err(ConfigError::Validation(
            "functions.url_generator and functions.sales_query must differ".to_string(),
        ));
    }

    Ok(())
}

fn validate_server(server: &ServerConfig) -> Result<(), ConfigError> {
    if server.port == 0 {
        return Err(ConfigError::Validation("server.port must be greater than zero".to_string()));
    }

    if server.graceful_shutdown_secs == 0 {
        return Err(ConfigError::Validation(
            "server.graceful_shutdown_secs must be greater than zero".to_string(),
        ));
    }

    Ok(())
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u16(key: &str, value: &str) -> Result<u16, ConfigError> {
    value.parse::<u16>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    value.parse::<bool>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    llm: Option<LlmPatch>,
    knowledge_base: Option<KnowledgeBasePatch>,
    secrets: Option<SecretsPatch>,
    sap: Option<SapPatch>,
    functions: Option<FunctionsPatch>,
    server: Option<ServerPatch>,
    response: Option<ResponsePatch>,
    logging: Option<LoggingPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct LlmPatch {
    endpoint: Option<String>,
    api_key: Option<String>,
    model: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct KnowledgeBasePatch {
    endpoint: Option<String>,
    api_key: Option<String>,
    id: Option<String>,
    number_of_results: Option<u32>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct SecretsPatch {
    provider: Option<SecretsProvider>,
    secret_id: Option<String>,
    env_prefix: Option<String>,
    directory: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct SapPatch {
    timeout_secs: Option<u64>,
    max_page_size: Option<u32>,
}

#[derive(Debug, Default, Deserialize)]
struct FunctionsPatch {
    endpoint: Option<String>,
    url_generator: Option<String>,
    sales_query: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ServerPatch {
    bind_address: Option<String>,
    port: Option<u16>,
    graceful_shutdown_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsePatch {
    include_error_detail: Option<bool>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}
