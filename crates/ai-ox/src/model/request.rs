//! Defines the canonical `ModelRequest` used for all model interactions.
//!
//! A single request struct carries the conversation, the sampling options and
//! the desired output shape, so every provider adapter consumes the same type.

use bon::Builder;
use chrono::NaiveDate;
use schemars::{JsonSchema, generate::SchemaSettings};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::content::Message;

/// Shape of the content the caller wants back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
pub struct OutputConfig {
    #[builder(default)]
    #[serde(default)]
    pub format: OutputFormat,
    /// JSON schema the output must follow (json format only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

impl OutputConfig {
    pub fn json(schema: Option<Value>) -> Self {
        Self {
            format: OutputFormat::Json,
            schema,
        }
    }

    /// Json output constrained to the schema of `T`.
    pub fn json_for<T: JsonSchema>() -> Result<Self, serde_json::Error> {
        Ok(Self::json(Some(schema_for_type::<T>()?)))
    }
}

/// Inline JSON schema for `T`, without `$schema` and `title`.
pub fn schema_for_type<T: JsonSchema>() -> Result<Value, serde_json::Error> {
    let settings = SchemaSettings::openapi3().with(|s| {
        s.inline_subschemas = true;
        s.meta_schema = None;
    });
    let generator = schemars::generate::SchemaGenerator::new(settings);
    let root_schema = generator.into_root_schema_for::<T>();
    let mut schema_value = serde_json::to_value(root_schema)?;

    if let Some(obj) = schema_value.as_object_mut() {
        obj.remove("title");
    }

    Ok(schema_value)
}

/// How recent search results must be.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchRecency {
    Day,
    Month,
    Year,
}

/// How much retrieved context a search-grounded model receives.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchContextSize {
    #[default]
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
pub struct UserLocation {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[builder(into)]
    pub country: Option<String>,
}

/// Controls for models that ground their answers in web search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
pub struct WebSearchOptions {
    /// Only search these domains
    #[builder(default, into)]
    #[serde(default)]
    pub domain_filter: Vec<String>,
    /// Only results published before this date
    pub before_date: Option<NaiveDate>,
    /// Only results published after this date
    pub after_date: Option<NaiveDate>,
    pub recency: Option<SearchRecency>,
    pub context_size: Option<SearchContextSize>,
    pub user_location: Option<UserLocation>,
}

/// Sampling options. Unset values fall back to the provider adapter's defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Builder)]
pub struct GenerationConfig {
    pub temperature: Option<f64>,
    pub top_p: Option<f64>,
    pub top_k: Option<u32>,
    pub max_output_tokens: Option<u32>,
    #[builder(default)]
    #[serde(default)]
    pub web_search: WebSearchOptions,
}

/// Represents a single, canonical request to a large language model.
#[derive(Debug, Clone, Default, Builder)]
pub struct ModelRequest {
    /// The messages that form the core of the request.
    #[builder(field)]
    pub messages: Vec<Message>,
    #[builder(default)]
    pub config: GenerationConfig,
    /// Requested output shape; text when absent.
    pub output: Option<OutputConfig>,
}

impl<S: model_request_builder::State> ModelRequestBuilder<S> {
    pub fn messages(mut self, messages: impl IntoIterator<Item = impl Into<Message>>) -> Self {
        self.messages = messages.into_iter().map(Into::into).collect();
        self
    }

    pub fn message(mut self, message: impl Into<Message>) -> Self {
        self.messages.push(message.into());
        self
    }
}

impl ModelRequest {
    /// Output format requested by the caller, defaulting to text.
    pub fn output_format(&self) -> OutputFormat {
        self.output.as_ref().map(|o| o.format).unwrap_or_default()
    }
}

impl<T> From<T> for ModelRequest
where
    T: IntoIterator,
    T::Item: Into<Message>,
{
    fn from(messages: T) -> Self {
        Self {
            messages: messages.into_iter().map(Into::into).collect(),
            config: GenerationConfig::default(),
            output: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_format_defaults_to_text() {
        let request = ModelRequest::from(vec![Message::user("hi")]);
        assert_eq!(request.output_format(), OutputFormat::Text);

        let request = ModelRequest::builder()
            .message(Message::user("hi"))
            .output(OutputConfig::json(None))
            .build();
        assert_eq!(request.output_format(), OutputFormat::Json);
    }

    #[derive(JsonSchema)]
    #[allow(dead_code)]
    struct Capital {
        city: String,
        population: u64,
    }

    #[test]
    fn json_for_derives_inline_schema() {
        let output = OutputConfig::json_for::<Capital>().unwrap();
        assert_eq!(output.format, OutputFormat::Json);

        let schema = output.schema.unwrap();
        assert!(schema.get("title").is_none());
        assert!(schema.get("$schema").is_none());
        assert_eq!(schema["type"], "object");
        assert!(schema["properties"]["city"].is_object());
    }

    #[test]
    fn builder_collects_messages() {
        let request = ModelRequest::builder()
            .messages(["first", "second"])
            .message(Message::assistant("third"))
            .config(GenerationConfig::builder().temperature(0.7).build())
            .build();
        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.config.temperature, Some(0.7));
        assert_eq!(request.config.top_p, None);
    }
}
