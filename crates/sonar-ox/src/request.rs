use bon::Builder;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString};

use crate::message::{Message, Messages};

pub const DEFAULT_TEMPERATURE: f64 = 0.2;
pub const DEFAULT_TOP_P: f64 = 0.9;
pub const DEFAULT_TOP_K: u32 = 0;

/// Top-level keys that are always transmitted, whatever their value.
///
/// Every other key is optional and dropped by [`normalize_body`] when it is
/// null, false, zero, an empty string, an empty array or an empty object.
pub const REQUIRED_FIELDS: &[&str] = &[
    "model",
    "messages",
    "temperature",
    "top_p",
    "top_k",
    "return_images",
    "return_related_questions",
    "web_search_options",
    "response_format",
    "stream",
];

/// How much retrieved web context the model gets.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, Display, EnumString, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ContextSize {
    #[default]
    Low,
    Medium,
    High,
}

/// Restricts search results to a recent time window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Display, EnumString, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RecencyFilter {
    Day,
    Month,
    Year,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Builder)]
pub struct UserLocation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    /// Two letter ISO country code
    #[serde(skip_serializing_if = "Option::is_none")]
    #[builder(into)]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Builder)]
pub struct WebSearchOptions {
    #[builder(default)]
    pub search_context_size: ContextSize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_location: Option<UserLocation>,
}

/// Output format requested from the model.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ResponseFormat {
    #[default]
    Text,
    JsonSchema { json_schema: JsonSchemaFormat },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JsonSchemaFormat {
    pub schema: Value,
}

impl ResponseFormat {
    pub fn json_schema(schema: Value) -> Self {
        Self::JsonSchema {
            json_schema: JsonSchemaFormat { schema },
        }
    }
}

#[derive(Debug, Clone, Serialize, Builder)]
#[builder(builder_type(vis = "pub"), state_mod(vis = "pub"))]
pub struct ChatRequest {
    #[builder(field)]
    pub messages: Messages,
    #[builder(into)]
    pub model: String,
    pub max_tokens: Option<u32>,
    #[builder(default = DEFAULT_TEMPERATURE)]
    pub temperature: f64,
    #[builder(default = DEFAULT_TOP_P)]
    pub top_p: f64,
    #[builder(default = DEFAULT_TOP_K)]
    pub top_k: u32,
    #[builder(default)]
    pub return_images: bool,
    #[builder(default)]
    pub return_related_questions: bool,
    #[builder(default)]
    pub search_domain_filter: Vec<String>,
    #[builder(default)]
    pub web_search_options: WebSearchOptions,
    /// `MM/DD/YYYY`, see [`crate::date::format_date_filter`]
    #[builder(into)]
    pub search_before_date_filter: Option<String>,
    /// `MM/DD/YYYY`, see [`crate::date::format_date_filter`]
    #[builder(into)]
    pub search_after_date_filter: Option<String>,
    pub search_recency_filter: Option<RecencyFilter>,
    #[builder(default)]
    pub response_format: ResponseFormat,
    pub presence_penalty: Option<f64>,
    pub frequency_penalty: Option<f64>,
    pub stop_sequences: Option<Vec<String>>,
    /// Streaming is not supported by this client.
    #[builder(skip)]
    pub stream: bool,
}

impl<S: chat_request_builder::State> ChatRequestBuilder<S> {
    pub fn messages(mut self, messages: impl IntoIterator<Item = impl Into<Message>>) -> Self {
        self.messages = messages.into_iter().map(Into::into).collect();
        self
    }

    pub fn message(mut self, message: impl Into<Message>) -> Self {
        self.messages.push(message.into());
        self
    }
}

impl ChatRequest {
    /// Serialize the request into the exact body sent over the wire.
    pub fn to_body(&self) -> Result<Value, serde_json::Error> {
        serde_json::to_value(self).map(normalize_body)
    }
}

/// Drop optional top-level keys whose value is falsy.
///
/// The API rejects some empty filters (an empty `search_domain_filter`, an
/// empty date string), so this runs on every outgoing body. Keys listed in
/// [`REQUIRED_FIELDS`] are kept as-is. Non-object values pass through.
pub fn normalize_body(body: Value) -> Value {
    match body {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .filter(|(key, value)| REQUIRED_FIELDS.contains(&key.as_str()) || !is_falsy(value))
                .collect::<Map<String, Value>>(),
        ),
        other => other,
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}
