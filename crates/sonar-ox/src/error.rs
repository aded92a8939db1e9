// Re-export shared error types from ai-ox-common
pub use ai_ox_common::error::{CommonRequestError, parse_error_response};

/// Errors raised by the Sonar client. Non-success statuses arrive as
/// [`CommonRequestError::Api`] carrying the upstream status and body.
pub type SonarRequestError = CommonRequestError;
