use crate::error::{self, CommonRequestError};
use reqwest::{RequestBuilder as ReqwestRequestBuilder, Response};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Authentication method for API requests
#[derive(Clone)]
pub enum AuthMethod {
    /// Bearer token authentication (Authorization: Bearer <token>)
    Bearer(String),
}

impl std::fmt::Debug for AuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bearer(_) => f.write_str("Bearer([REDACTED])"),
        }
    }
}

/// A JSON endpoint under the configured base URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub path: String,
}

impl Endpoint {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// Configuration for request building
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub base_url: String,
    pub auth: Option<AuthMethod>,
    pub default_headers: HashMap<String, String>,
}

impl RequestConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth: None,
            default_headers: HashMap::new(),
        }
    }

    #[must_use]
    pub fn with_auth(mut self, auth: AuthMethod) -> Self {
        self.auth = Some(auth);
        self
    }

    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(key.into(), value.into());
        self
    }
}

/// Generic request builder that handles common HTTP patterns
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    client: reqwest::Client,
    config: RequestConfig,
}

impl RequestBuilder {
    pub fn new(client: reqwest::Client, config: RequestConfig) -> Self {
        Self { client, config }
    }

    /// Full URL for an endpoint under the configured base URL.
    pub fn url(&self, endpoint: &Endpoint) -> String {
        format!(
            "{}/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.path.trim_start_matches('/')
        )
    }

    /// Build a JSON POST for the given endpoint
    pub fn build_request(
        &self,
        endpoint: &Endpoint,
    ) -> Result<ReqwestRequestBuilder, CommonRequestError> {
        let mut req = self.client.post(self.url(endpoint));

        if let Some(AuthMethod::Bearer(ref token)) = self.config.auth {
            if token.is_empty() {
                return Err(CommonRequestError::AuthenticationMissing);
            }
            req = req.bearer_auth(token);
        }

        for (key, value) in &self.config.default_headers {
            req = req.header(key, value);
        }

        Ok(req.header("content-type", "application/json"))
    }

    /// Execute a request with JSON body and return deserialized response
    pub async fn request_json<T: for<'de> Deserialize<'de>, B: Serialize>(
        &self,
        endpoint: &Endpoint,
        body: Option<&B>,
    ) -> Result<T, CommonRequestError> {
        let mut req = self.build_request(endpoint)?;

        if let Some(body) = body {
            // Normalize body to serde_json::Value to avoid any accidental double-encoding
            let val = serde_json::to_value(body)?;
            log::debug!("POST {} payload: {}", endpoint.path, val);
            req = req.json(&val);
        }

        let res = req.send().await?;
        self.handle_response(res).await
    }

    /// Handle response and parse errors
    async fn handle_response<T: for<'de> Deserialize<'de>>(
        &self,
        res: Response,
    ) -> Result<T, CommonRequestError> {
        let status = res.status();
        let bytes = res.bytes().await?;

        if status.is_success() {
            serde_json::from_slice::<T>(&bytes).map_err(|e| {
                CommonRequestError::UnexpectedResponse(format!(
                    "HTTP {} but failed to decode JSON: {}; body: {}",
                    status.as_u16(),
                    e,
                    String::from_utf8_lossy(&bytes)
                ))
            })
        } else {
            log::debug!("HTTP {} from {}", status.as_u16(), self.config.base_url);
            Err(error::parse_error_response(status, &bytes))
        }
    }
}
