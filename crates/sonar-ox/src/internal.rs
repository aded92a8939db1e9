use ai_ox_common::request_builder::{AuthMethod, Endpoint, RequestBuilder, RequestConfig};
use serde::de::DeserializeOwned;

use crate::{ChatRequest, SonarRequestError};

const CHAT_COMPLETIONS: &str = "chat/completions";

/// Sonar client helper methods using the common RequestBuilder
pub struct SonarRequestHelper {
    request_builder: RequestBuilder,
}

impl SonarRequestHelper {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: &str) -> Self {
        let config = RequestConfig::new(base_url)
            .with_auth(AuthMethod::Bearer(api_key.to_string()))
            .with_header("accept", "application/json");

        Self {
            request_builder: RequestBuilder::new(client, config),
        }
    }

    /// Send a chat completion request with the normalized body
    pub async fn send_chat_request<T: DeserializeOwned>(
        &self,
        request: &ChatRequest,
    ) -> Result<T, SonarRequestError> {
        let endpoint = Endpoint::new(CHAT_COMPLETIONS);
        let body = request.to_body()?;

        log::debug!(
            "sonar request: model={} messages={} url={}",
            request.model,
            request.messages.len(),
            self.request_builder.url(&endpoint)
        );

        self.request_builder.request_json(&endpoint, Some(&body)).await
    }
}
