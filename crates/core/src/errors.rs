use thiserror::Error;

/// Failure of a single pipeline stage.
///
/// Each variant is raised at the stage that owns the collaborator and carries
/// the cause as text. Status codes are only assigned at the invocation
/// boundary, see [`crate::invocation::InvocationResponse::from_error`].
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PipelineError {
    #[error("{0}")]
    Input(String),
    #[error("Failed to retrieve secret: {0}")]
    Secret(String),
    #[error("Error retrieving from vector DB: {0}")]
    Retrieval(String),
    #[error("Error generating message: {0}")]
    Generation(String),
    #[error("Error querying SAP system: {0}")]
    Http(String),
    #[error("Error generating OData URL: {0}")]
    Downstream(String),
}

impl PipelineError {
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input(message.into())
    }

    pub fn secret(cause: impl ToString) -> Self {
        Self::Secret(cause.to_string())
    }

    pub fn retrieval(cause: impl ToString) -> Self {
        Self::Retrieval(cause.to_string())
    }

    pub fn generation(cause: impl ToString) -> Self {
        Self::Generation(cause.to_string())
    }

    pub fn http(cause: impl ToString) -> Self {
        Self::Http(cause.to_string())
    }

    pub fn downstream(cause: impl ToString) -> Self {
        Self::Downstream(cause.to_string())
    }

    pub fn is_input(&self) -> bool {
        matches!(self, Self::Input(_))
    }

    /// Short label used for the `error_class` log field.
    pub fn class(&self) -> &'static str {
        match self {
            Self::Input(_) => "input",
            Self::Secret(_) => "secret",
            Self::Retrieval(_) => "retrieval",
            Self::Generation(_) => "generation",
            Self::Http(_) => "http",
            Self::Downstream(_) => "downstream",
        }
    }

    /// The category prefix without the cause text.
    pub fn summary(&self) -> &'static str {
        match self {
            Self::Input(_) => "Invalid input",
            Self::Secret(_) => "Failed to retrieve secret",
            Self::Retrieval(_) => "Error retrieving from vector DB",
            Self::Generation(_) => "Error generating message",
            Self::Http(_) => "Error querying SAP system",
            Self::Downstream(_) => "Error generating OData URL",
        }
    }

    pub fn status_code(&self) -> u16 {
        if self.is_input() {
            400
        } else {
            500
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PipelineError;

    #[test]
    fn display_prefixes_the_stage_category() {
        let error = PipelineError::http("HTTP status server error (500 Internal Server Error)");

        assert_eq!(
            error.to_string(),
            "Error querying SAP system: HTTP status server error (500 Internal Server Error)"
        );
    }

    #[test]
    fn input_errors_display_their_message_verbatim() {
        let error = PipelineError::input("Missing required field: inputText");

        assert_eq!(error.to_string(), "Missing required field: inputText");
        assert_eq!(error.status_code(), 400);
    }

    #[test]
    fn collaborator_failures_map_to_server_error() {
        let failures = [
            PipelineError::secret("missing key"),
            PipelineError::retrieval("timeout"),
            PipelineError::generation("throttled"),
            PipelineError::http("connection refused"),
            PipelineError::downstream("empty payload"),
        ];

        for failure in failures {
            assert_eq!(failure.status_code(), 500, "{failure:?} should be a server error");
            assert!(failure.to_string().starts_with(failure.summary()));
        }
    }
}
