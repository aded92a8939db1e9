use crate::{errors::GenerateContentError, model::request::OutputFormat, provider::Provider};
use sonar_ox::{API_KEY_ENV, SonarRequestError};
use thiserror::Error;

/// Errors that can occur when interacting with Sonar models
#[derive(Debug, Error)]
pub enum SonarError {
    /// No API key was passed and the environment variable is unset
    #[error("Please pass in the API key or set the {env} environment variable", env = API_KEY_ENV)]
    MissingCredential,

    /// The name is not in the Sonar catalog
    #[error("Unsupported model: {0}")]
    UnsupportedModel(String),

    /// The model cannot produce the requested output format
    #[error("{format} format is not supported for {model}")]
    UnsupportedOutputFormat { format: OutputFormat, model: String },

    /// The message role has no Sonar counterpart
    #[error("role {0} doesn't map to a Sonar role")]
    UnsupportedRole(String),

    /// The message part is neither text nor media
    #[error("Unsupported part in Sonar message content: {0}")]
    UnsupportedPart(String),

    /// The HTTP call failed or returned a non-success status
    #[error("Sonar API error: {0}")]
    Transport(#[from] SonarRequestError),

    /// JSON output requested but the content is not valid JSON
    #[error("Malformed JSON content in Sonar response: {content}")]
    MalformedResponse {
        content: String,
        #[source]
        source: serde_json::Error,
    },
}

impl SonarError {
    /// Upstream HTTP status of a transport failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Transport(e) => e.status(),
            _ => None,
        }
    }

    /// Upstream body of a transport failure.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Transport(e) => e.body(),
            _ => None,
        }
    }
}

impl From<SonarError> for GenerateContentError {
    fn from(error: SonarError) -> Self {
        match error {
            SonarError::MissingCredential | SonarError::UnsupportedModel(_) => {
                GenerateContentError::configuration(error.to_string())
            }
            SonarError::UnsupportedOutputFormat { .. } => {
                GenerateContentError::unsupported_feature(error.to_string())
            }
            SonarError::UnsupportedRole(_) | SonarError::UnsupportedPart(_) => {
                GenerateContentError::message_conversion(error.to_string())
            }
            SonarError::Transport(e) => {
                GenerateContentError::provider_error(Provider::Perplexity.as_str(), e.to_string())
                    .with_upstream(e.status(), e.body().map(str::to_string))
            }
            SonarError::MalformedResponse { .. } => {
                GenerateContentError::response_parsing(error.to_string())
            }
        }
    }
}
