#![cfg_attr(not(test), deny(unsafe_code))]
#![warn(
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::missing_docs_in_private_items
)]

//! Perplexity Sonar API client for Rust
//!
//! Typed request/response bodies for the Sonar chat completions endpoint and a
//! thin client that posts them.
//!
//! ```rust,no_run
//! use sonar_ox::{ChatRequest, Message, Model, Sonar};
//!
//! # async fn run() -> Result<(), sonar_ox::SonarRequestError> {
//! let client = Sonar::new("pplx-...");
//! let request = ChatRequest::builder()
//!     .model(Model::SonarPro)
//!     .message(Message::user("What happened in Rust this week?"))
//!     .build();
//! let response = client.send(&request).await?;
//! println!("{:?}", response.text());
//! # Ok(())
//! # }
//! ```

pub mod date;
pub mod error;
mod internal;
pub mod message;
pub mod model;
pub mod request;
pub mod response;
pub mod usage;

pub use error::SonarRequestError;
pub use message::{ContentPart, ImageUrl, Message, MessageContent, Role};
pub use model::Model;
pub use request::{
    ChatRequest, ContextSize, RecencyFilter, ResponseFormat, UserLocation, WebSearchOptions,
};
pub use response::{ChatResponse, Choice, ResponseMessage};
pub use usage::Usage;

use bon::Builder;
use core::fmt;

use crate::internal::SonarRequestHelper;

pub const BASE_URL: &str = "https://api.perplexity.ai";

/// Environment variable holding the Sonar API key.
pub const API_KEY_ENV: &str = "PERPLEXITY_SONAR_API_KEY";

#[derive(Clone, Default, Builder)]
pub struct Sonar {
    #[builder(into)]
    pub(crate) api_key: String,
    #[builder(default)]
    pub(crate) client: reqwest::Client,
    #[builder(default = BASE_URL.to_string(), into)]
    pub(crate) base_url: String,
}

impl Sonar {
    /// Create a new Sonar client with the provided API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            client: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
        }
    }

    pub fn load_from_env() -> Result<Self, std::env::VarError> {
        let api_key = std::env::var(API_KEY_ENV)?;
        Ok(Self::builder().api_key(api_key).build())
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether a non-empty API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }

    /// Create request helper for internal use
    fn request_helper(&self) -> SonarRequestHelper {
        SonarRequestHelper::new(self.client.clone(), &self.base_url, &self.api_key)
    }
}

impl Sonar {
    /// Post one chat completion request. The body goes through
    /// [`ChatRequest::to_body`] first, so empty optional fields never reach the wire.
    pub async fn send(&self, request: &ChatRequest) -> Result<ChatResponse, SonarRequestError> {
        self.request_helper().send_chat_request(request).await
    }

    /// Like [`Sonar::send`], but returns the untyped response body.
    pub async fn send_raw(
        &self,
        request: &ChatRequest,
    ) -> Result<serde_json::Value, SonarRequestError> {
        self.request_helper().send_chat_request(request).await
    }
}

impl fmt::Debug for Sonar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sonar")
            .field("api_key", &"[REDACTED]")
            .field("client", &self.client)
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_api_key() {
        let client = Sonar::new("pplx-secret");
        let rendered = format!("{client:?}");
        assert!(!rendered.contains("pplx-secret"));
        assert!(rendered.contains(BASE_URL));
    }

    #[test]
    fn builder_overrides_base_url() {
        let client = Sonar::builder()
            .api_key("key")
            .base_url("http://localhost:1234")
            .build();
        assert_eq!(client.base_url(), "http://localhost:1234");
        assert!(client.has_api_key());
    }

    #[test]
    fn default_client_has_no_key() {
        assert!(!Sonar::default().has_api_key());
        assert!(!Sonar::new("").has_api_key());
    }
}
