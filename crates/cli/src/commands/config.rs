use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use salesq_core::config::{AppConfig, LoadOptions};
use secrecy::{ExposeSecret, SecretString};
use toml::Value;

struct Field {
    key: &'static str,
    value: String,
    env_keys: &'static [&'static str],
}

impl Field {
    fn new(key: &'static str, value: impl Into<String>, env_keys: &'static [&'static str]) -> Self {
        Self { key, value: value.into(), env_keys }
    }
}

pub fn run() -> String {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => return format!("config validation failed: {error}"),
    };

    let config_file_path = detect_config_path();
    let config_file_doc = load_config_file_doc(config_file_path.as_deref());

    let mut lines = vec!["effective config (source precedence: env > file > default):".to_string()];
    for field in fields(&config) {
        let source = field_source(
            field.key,
            field.env_keys,
            config_file_doc.as_ref(),
            config_file_path.as_deref(),
        );
        lines.push(render_line(field.key, &field.value, source));
    }

    lines.join("\n")
}

fn fields(config: &AppConfig) -> Vec<Field> {
    vec![
        Field::new("llm.endpoint", &config.llm.endpoint, &["SALESQ_LLM_ENDPOINT"]),
        Field::new(
            "llm.api_key",
            redact_secret(config.llm.api_key.as_ref()),
            &["SALESQ_LLM_API_KEY", "AWS_BEARER_TOKEN_BEDROCK"],
        ),
        Field::new("llm.model", &config.llm.model, &["SALESQ_LLM_MODEL"]),
        Field::new(
            "llm.timeout_secs",
            config.llm.timeout_secs.to_string(),
            &["SALESQ_LLM_TIMEOUT_SECS"],
        ),
        Field::new(
            "knowledge_base.endpoint",
            &config.knowledge_base.endpoint,
            &["SALESQ_KNOWLEDGE_BASE_ENDPOINT"],
        ),
        Field::new(
            "knowledge_base.api_key",
            redact_secret(config.knowledge_base.api_key.as_ref()),
            &["SALESQ_KNOWLEDGE_BASE_API_KEY"],
        ),
        Field::new("knowledge_base.id", &config.knowledge_base.id, &["SALESQ_KNOWLEDGE_BASE_ID"]),
        Field::new(
            "knowledge_base.number_of_results",
            config.knowledge_base.number_of_results.to_string(),
            &["SALESQ_KNOWLEDGE_BASE_NUMBER_OF_RESULTS"],
        ),
        Field::new(
            "secrets.provider",
            format!("{:?}", config.secrets.provider),
            &["SALESQ_SECRETS_PROVIDER"],
        ),
        Field::new("secrets.secret_id", &config.secrets.secret_id, &["SALESQ_SECRETS_SECRET_ID"]),
        Field::new(
            "secrets.env_prefix",
            &config.secrets.env_prefix,
            &["SALESQ_SECRETS_ENV_PREFIX"],
        ),
        Field::new(
            "secrets.directory",
            config.secrets.directory.display().to_string(),
            &["SALESQ_SECRETS_DIRECTORY"],
        ),
        Field::new(
            "sap.timeout_secs",
            config.sap.timeout_secs.to_string(),
            &["SALESQ_SAP_TIMEOUT_SECS"],
        ),
        Field::new(
            "sap.max_page_size",
            config.sap.max_page_size.to_string(),
            &["SALESQ_SAP_MAX_PAGE_SIZE"],
        ),
        Field::new(
            "functions.endpoint",
            &config.functions.endpoint,
            &["SALESQ_FUNCTIONS_ENDPOINT"],
        ),
        Field::new(
            "functions.url_generator",
            &config.functions.url_generator,
            &["SALESQ_FUNCTIONS_URL_GENERATOR"],
        ),
        Field::new(
            "functions.sales_query",
            &config.functions.sales_query,
            &["SALESQ_FUNCTIONS_SALES_QUERY"],
        ),
        Field::new(
            "server.bind_address",
            &config.server.bind_address,
            &["SALESQ_SERVER_BIND_ADDRESS"],
        ),
        Field::new("server.port", config.server.port.to_string(), &["SALESQ_SERVER_PORT"]),
        Field::new(
            "response.include_error_detail",
            config.response.include_error_detail.to_string(),
            &["SALESQ_RESPONSE_INCLUDE_ERROR_DETAIL"],
        ),
        Field::new(
            "logging.level",
            &config.logging.level,
            &["SALESQ_LOGGING_LEVEL", "SALESQ_LOG_LEVEL"],
        ),
        Field::new(
            "logging.format",
            format!("{:?}", config.logging.format),
            &["SALESQ_LOGGING_FORMAT", "SALESQ_LOG_FORMAT"],
        ),
    ]
}

fn detect_config_path() -> Option<PathBuf> {
    [PathBuf::from("salesq.toml"), PathBuf::from("config/salesq.toml")]
        .into_iter()
        .find(|path| path.exists())
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn field_source(
    key_path: &str,
    env_keys: &[&str],
    config_file_doc: Option<&Value>,
    config_file_path: Option<&Path>,
) -> String {
    if let Some(env_key) = env_keys.iter().find(|key| env::var_os(key).is_some()) {
        return format!("env ({env_key})");
    }

    if let Some(doc) = config_file_doc {
        if contains_path(doc, key_path) {
            let file_path = config_file_path
                .map(|path| path.display().to_string())
                .unwrap_or_else(|| "config file".to_string());
            return format!("file ({file_path})");
        }
    }

    "default".to_string()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}

fn render_line(key: &str, value: &str, source: String) -> String {
    format!("- {key} = {value} (source: {source})")
}

fn redact_secret(secret: Option<&SecretString>) -> String {
    match secret.map(|secret| secret.expose_secret().trim()) {
        None => "<unset>".to_string(),
        Some("") => "<empty>".to_string(),
        Some(_) => "<redacted>".to_string(),
    }
}
