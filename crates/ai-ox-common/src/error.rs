use thiserror::Error;

/// Common errors that can occur in AI provider HTTP requests
#[derive(Error, Debug)]
pub enum CommonRequestError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(String),

    /// The API answered with a non-success status
    #[error("API error (HTTP {status}): {}", message.as_deref().unwrap_or(body))]
    Api {
        /// Upstream HTTP status code
        status: u16,
        /// Error message extracted from the body, when the body is structured
        message: Option<String>,
        /// Raw response body
        body: String,
    },

    /// The API answered with a success status but a body we could not decode
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    /// Authentication is missing (no API key provided)
    #[error("Authentication missing: no API key provided")]
    AuthenticationMissing,
}

impl CommonRequestError {
    /// Upstream HTTP status, when the failure carries one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Raw upstream body, when the failure carries one.
    #[must_use]
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::Api { body, .. } => Some(body),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for CommonRequestError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Build an [`CommonRequestError::Api`] from a non-success status and body
pub fn parse_error_response(status: reqwest::StatusCode, body: &bytes::Bytes) -> CommonRequestError {
    let body_str = String::from_utf8_lossy(body).into_owned();
    let message = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|json| extract_error_message(&json));

    CommonRequestError::Api {
        status: status.as_u16(),
        message,
        body: body_str,
    }
}

/// Extract error message from the JSON error shapes providers return
fn extract_error_message(json: &serde_json::Value) -> Option<String> {
    // {"error": {"message": "..."}}
    if let Some(msg) = json
        .get("error")
        .and_then(|e| e.get("message"))
        .and_then(serde_json::Value::as_str)
    {
        return Some(msg.to_string());
    }

    // {"detail": "..."}
    if let Some(msg) = json.get("detail").and_then(serde_json::Value::as_str) {
        return Some(msg.to_string());
    }

    json.get("message")
        .and_then(serde_json::Value::as_str)
        .map(ToString::to_string)
}
