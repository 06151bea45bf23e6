//! Immutable system-prompt templates with named placeholders.
//!
//! Templates are tera sources (`{{ context }}`) rendered without autoescaping,
//! so retrieved schema text and JSON payloads reach the model byte for byte.

use tera::Context;
use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PromptError {
    #[error("prompt `{template}` is missing a value for placeholder `{placeholder}`")]
    MissingPlaceholder { template: &'static str, placeholder: &'static str },
    #[error("prompt `{template}` failed to render: {message}")]
    Render { template: &'static str, message: String },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PromptTemplate {
    name: &'static str,
    source: &'static str,
    placeholders: &'static [&'static str],
}

impl PromptTemplate {
    pub const fn new(
        name: &'static str,
        source: &'static str,
        placeholders: &'static [&'static str],
    ) -> Self {
        Self { name, source, placeholders }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn placeholders(&self) -> &'static [&'static str] {
        self.placeholders
    }

    /// Produces a new prompt string; the template itself is never modified.
    pub fn render(&self, values: &[(&str, &str)]) -> Result<String, PromptError> {
        let mut context = Context::new();
        for placeholder in self.placeholders {
            let value = values
                .iter()
                .find(|(key, _)| key == placeholder)
                .map(|(_, value)| *value)
                .ok_or(PromptError::MissingPlaceholder {
                    template: self.name,
                    placeholder: *placeholder,
                })?;
            context.insert(*placeholder, value);
        }

        tera::Tera::one_off(self.source, &context, false).map_err(|error| PromptError::Render {
            template: self.name,
            message: render_error_chain(&error),
        })
    }
}

fn render_error_chain(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
