use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;

use crate::errors::PipelineError;

pub const HOST_KEY: &str = "S4_host_details";
pub const USERNAME_KEY: &str = "S4_username";
pub const PASSWORD_KEY: &str = "S4_password";

#[derive(Deserialize)]
struct SystemDetailsDocument {
    #[serde(rename = "S4_host_details")]
    host: Option<String>,
    #[serde(rename = "S4_username")]
    username: Option<String>,
    #[serde(rename = "S4_password")]
    password: Option<String>,
}

/// Decoded SAP system secret. Every field is optional at this level; the
/// accessors below enforce what each function needs.
#[derive(Clone, Debug)]
pub struct SystemDetails {
    host: Option<String>,
    username: Option<String>,
    password: Option<SecretString>,
}

/// Basic-auth pair for the SAP gateway.
#[derive(Clone, Debug)]
pub struct SapCredentials {
    pub username: String,
    pub password: SecretString,
}

impl SystemDetails {
    pub fn parse(secret: &SecretString) -> Result<Self, PipelineError> {
        let document: SystemDetailsDocument = serde_json::from_str(secret.expose_secret())
            .map_err(|error| PipelineError::secret(format!("Failed to parse secret JSON: {error}")))?;

        Ok(Self {
            host: non_empty(document.host),
            username: non_empty(document.username),
            password: non_empty(document.password).map(SecretString::from),
        })
    }

    pub fn host(&self) -> Result<&str, PipelineError> {
        self.host
            .as_deref()
            .ok_or_else(|| PipelineError::secret(format!("{HOST_KEY} not found in secrets")))
    }

    pub fn credentials(&self) -> Result<SapCredentials, PipelineError> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) => {
                Ok(SapCredentials { username: username.clone(), password: password.clone() })
            }
            _ => Err(PipelineError::secret("Missing S4 credentials in secrets")),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use secrecy::{ExposeSecret, SecretString};

    use super::SystemDetails;
    use crate::errors::PipelineError;

    fn secret(raw: &str) -> SecretString {
        SecretString::from(raw.to_string())
    }

    #[test]
    fn parses_host_and_credentials() {
        let details = SystemDetails::parse(&secret(
            r#"{"S4_host_details":"https://s4.example:44300","S4_username":"BOT","S4_password":"pw"}"#,
        ))
        .expect("valid secret");

        assert_eq!(details.host().expect("host"), "https://s4.example:44300");
        let credentials = details.credentials().expect("credentials");
        assert_eq!(credentials.username, "BOT");
        assert_eq!(credentials.password.expose_secret(), "pw");
    }

    #[test]
    fn missing_host_is_a_secret_error() {
        let details =
            SystemDetails::parse(&secret(r#"{"S4_username":"BOT","S4_password":"pw"}"#)).expect("json");

        assert_eq!(
            details.host().expect_err("no host"),
            PipelineError::secret("S4_host_details not found in secrets")
        );
    }

    #[test]
    fn blank_password_counts_as_missing() {
        let details = SystemDetails::parse(&secret(
            r#"{"S4_host_details":"https://s4","S4_username":"BOT","S4_password":"  "}"#,
        ))
        .expect("json");

        assert!(matches!(details.credentials(), Err(PipelineError::Secret(_))));
    }

    #[test]
    fn malformed_json_is_reported_without_echoing_the_secret() {
        let error = SystemDetails::parse(&secret("S4_password=hunter2")).expect_err("not json");

        let message = error.to_string();
        assert!(message.starts_with("Failed to retrieve secret: Failed to parse secret JSON"));
        assert!(!message.contains("hunter2"));
    }

    #[test]
    fn debug_output_redacts_password() {
        let details = SystemDetails::parse(&secret(
            r#"{"S4_host_details":"https://s4","S4_username":"BOT","S4_password":"hunter2"}"#,
        ))
        .expect("json");

        assert!(!format!("{details:?}").contains("hunter2"));
    }
}
