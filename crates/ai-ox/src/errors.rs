use thiserror::Error;

/// Provider-agnostic error returned by [`crate::model::Model`] implementations.
#[derive(Debug, Error)]
pub enum GenerateContentError {
    /// The model or client is misconfigured (missing key, unknown model, ...)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The request could not be expressed in the provider's format
    #[error("Message conversion error: {0}")]
    MessageConversion(String),

    /// The provider rejected the request or could not be reached
    #[error("{provider} error: {message}")]
    Provider {
        provider: String,
        message: String,
        /// Upstream HTTP status, when the provider answered
        status: Option<u16>,
        /// Raw upstream body, when the provider answered
        body: Option<String>,
    },

    /// The provider answered, but the answer could not be interpreted
    #[error("Response parsing error: {0}")]
    ResponseParsing(String),

    /// The response contained no usable candidate
    #[error("No response from model")]
    NoResponse,

    /// The model does not support the requested feature
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(String),
}

impl GenerateContentError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn message_conversion(message: impl Into<String>) -> Self {
        Self::MessageConversion(message.into())
    }

    pub fn provider_error(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
            status: None,
            body: None,
        }
    }

    /// Attach the upstream status and body to a [`GenerateContentError::Provider`].
    #[must_use]
    pub fn with_upstream(mut self, upstream_status: Option<u16>, upstream_body: Option<String>) -> Self {
        if let Self::Provider { status, body, .. } = &mut self {
            *status = upstream_status;
            *body = upstream_body;
        }
        self
    }

    /// Upstream HTTP status of a provider failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Provider { status, .. } => *status,
            _ => None,
        }
    }

    /// Upstream body of a provider failure.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Provider { body, .. } => body.as_deref(),
            _ => None,
        }
    }

    pub fn response_parsing(message: impl Into<String>) -> Self {
        Self::ResponseParsing(message.into())
    }

    pub fn unsupported_feature(feature: impl Into<String>) -> Self {
        Self::UnsupportedFeature(feature.into())
    }
}
