use serde_json::Value;
use sonar_ox::{
    ChatRequest, ChatResponse, Choice, ContentPart, ContextSize, Message as SonarMessage,
    RecencyFilter, ResponseFormat, Role, UserLocation as SonarUserLocation,
    WebSearchOptions as SonarWebSearchOptions,
    date::format_date_filter,
    request::{DEFAULT_TEMPERATURE, DEFAULT_TOP_K, DEFAULT_TOP_P},
    usage::Usage as SonarUsage,
};

use crate::{
    ModelResponse,
    content::{
        message::{Message, MessageRole},
        part::Part,
    },
    model::{
        request::{
            ModelRequest, OutputFormat, SearchContextSize, SearchRecency, UserLocation,
            WebSearchOptions,
        },
        response::{Candidate, FinishReason},
    },
    provider::Provider,
    usage::Usage,
};

use super::{SonarError, catalog};

/// Convert from ai-ox ModelRequest to a Sonar ChatRequest
pub fn convert_request_to_sonar(
    model_name: &str,
    request: ModelRequest,
) -> Result<ChatRequest, SonarError> {
    let (model, descriptor) = catalog::resolve(model_name)?;

    let format = request.output_format();
    if !descriptor.supports.supports_output(format) {
        return Err(SonarError::UnsupportedOutputFormat {
            format,
            model: model.to_string(),
        });
    }

    let response_format = match format {
        OutputFormat::Text => ResponseFormat::Text,
        OutputFormat::Json => {
            let schema = request
                .output
                .and_then(|output| output.schema)
                .unwrap_or_else(|| Value::Object(serde_json::Map::new()));
            ResponseFormat::json_schema(schema)
        }
    };

    let messages = request
        .messages
        .into_iter()
        .map(convert_message)
        .collect::<Result<Vec<_>, _>>()?;

    let config = request.config;
    let search = config.web_search;

    log::debug!(
        "built sonar request for {model} with {} messages, format {format}",
        messages.len()
    );

    Ok(ChatRequest::builder()
        .model(model)
        .messages(messages)
        .maybe_max_tokens(config.max_output_tokens)
        .temperature(config.temperature.unwrap_or(DEFAULT_TEMPERATURE))
        .top_p(config.top_p.unwrap_or(DEFAULT_TOP_P))
        .top_k(config.top_k.unwrap_or(DEFAULT_TOP_K))
        .return_images(false)
        .return_related_questions(false)
        .maybe_search_before_date_filter(search.before_date.map(format_date_filter))
        .maybe_search_after_date_filter(search.after_date.map(format_date_filter))
        .maybe_search_recency_filter(search.recency.map(convert_recency))
        .web_search_options(convert_web_search_options(&search))
        .search_domain_filter(search.domain_filter)
        .response_format(response_format)
        .build())
}

fn convert_message(message: Message) -> Result<SonarMessage, SonarError> {
    let role = convert_role(&message.role)?;

    // System turns are sent as one flat string.
    if role == Role::System {
        return Ok(SonarMessage::system(message.text()));
    }

    let parts = message
        .content
        .into_iter()
        .map(convert_part)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SonarMessage::parts(role, parts))
}

/// Map an ai-ox role onto the Sonar role set.
pub fn convert_role(role: &MessageRole) -> Result<Role, SonarError> {
    match role {
        MessageRole::User => Ok(Role::User),
        MessageRole::Assistant => Ok(Role::Assistant),
        MessageRole::System => Ok(Role::System),
        MessageRole::Unknown(other) => Err(SonarError::UnsupportedRole(other.clone())),
    }
}

/// Translate one content part. Only non-empty text and media are representable.
pub fn convert_part(part: Part) -> Result<ContentPart, SonarError> {
    match part {
        Part::Text { text } if text.is_empty() => {
            Err(SonarError::UnsupportedPart("empty text".to_string()))
        }
        Part::Text { text } => Ok(ContentPart::text(text)),
        Part::Blob {
            data_ref,
            mime_type,
        } => Ok(ContentPart::image_url(data_ref.to_url(&mime_type))),
        other => Err(SonarError::UnsupportedPart(other.kind().to_string())),
    }
}

fn convert_recency(recency: SearchRecency) -> RecencyFilter {
    match recency {
        SearchRecency::Day => RecencyFilter::Day,
        SearchRecency::Month => RecencyFilter::Month,
        SearchRecency::Year => RecencyFilter::Year,
    }
}

fn convert_context_size(size: SearchContextSize) -> ContextSize {
    match size {
        SearchContextSize::Low => ContextSize::Low,
        SearchContextSize::Medium => ContextSize::Medium,
        SearchContextSize::High => ContextSize::High,
    }
}

fn convert_user_location(location: &UserLocation) -> SonarUserLocation {
    SonarUserLocation {
        latitude: location.latitude,
        longitude: location.longitude,
        country: location.country.clone(),
    }
}

fn convert_web_search_options(options: &WebSearchOptions) -> SonarWebSearchOptions {
    SonarWebSearchOptions {
        search_context_size: options
            .context_size
            .map(convert_context_size)
            .unwrap_or_default(),
        user_location: options.user_location.as_ref().map(convert_user_location),
    }
}

/// Normalize a wire finish reason. Unrecognized or missing reasons become `Unknown`.
pub fn convert_finish_reason(reason: Option<&str>) -> FinishReason {
    match reason {
        Some("stop" | "tool_calls" | "function_call") => FinishReason::Stop,
        Some("length" | "content_filter") => FinishReason::Length,
        Some(other) => {
            log::warn!("unrecognized sonar finish reason: {other}");
            FinishReason::Unknown
        }
        None => FinishReason::Unknown,
    }
}

/// Convert one Sonar choice into an ai-ox candidate.
///
/// With `json_mode` the content is parsed as JSON and stored as a data part;
/// absent content parses as an empty object.
pub fn convert_choice(choice: Choice, json_mode: bool) -> Result<Candidate, SonarError> {
    let finish_reason = convert_finish_reason(choice.finish_reason.as_deref());
    let content = choice.message.content.unwrap_or_default();

    let part = if json_mode {
        let text = if content.is_empty() { "{}" } else { content.as_str() };
        match serde_json::from_str(text) {
            Ok(data) => Part::data(data),
            Err(source) => return Err(SonarError::MalformedResponse { content, source }),
        }
    } else {
        Part::text(content)
    };

    Ok(Candidate {
        index: choice.index,
        finish_reason,
        message: Message::new(MessageRole::Assistant, vec![part]),
    })
}

/// Sonar usage block to ai-ox usage. One response is one request.
pub fn convert_usage(usage: Option<&SonarUsage>) -> Usage {
    match usage {
        Some(usage) => Usage {
            citation_tokens: usage.citation_tokens,
            search_queries: usage.num_search_queries,
            ..Usage::from(&usage.tokens)
        },
        None => Usage {
            requests: 1,
            ..Usage::new()
        },
    }
}

/// Convert a full Sonar response, keeping `raw` as the untouched body.
pub fn convert_response(
    response: ChatResponse,
    raw: Value,
    json_mode: bool,
    model_name: &str,
) -> Result<ModelResponse, SonarError> {
    let usage = convert_usage(response.usage.as_ref());
    let candidates = response
        .choices
        .into_iter()
        .map(|choice| convert_choice(choice, json_mode))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ModelResponse {
        candidates,
        usage,
        model_name: model_name.to_string(),
        vendor_name: Provider::Perplexity.to_string(),
        citations: response.citations,
        raw: Some(raw),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::request::{GenerationConfig, OutputConfig};
    use chrono::NaiveDate;
    use serde_json::json;
    use sonar_ox::ResponseMessage;

    fn body(request: &ChatRequest) -> Value {
        request.to_body().unwrap()
    }

    fn choice(index: u32, content: Option<&str>, finish_reason: Option<&str>) -> Choice {
        Choice {
            index,
            message: ResponseMessage {
                role: Role::Assistant,
                content: content.map(str::to_string),
            },
            delta: None,
            finish_reason: finish_reason.map(str::to_string),
        }
    }

    #[test]
    fn hello_on_sonar_pro_builds_expected_body() {
        let request = ModelRequest::from(vec![Message::user("Hello")]);
        let body = body(&convert_request_to_sonar("sonar-pro", request).unwrap());

        assert_eq!(body["model"], json!("sonar-pro"));
        assert_eq!(body["temperature"], json!(0.2));
        assert_eq!(body["top_p"], json!(0.9));
        assert_eq!(body["top_k"], json!(0));
        assert_eq!(
            body["messages"],
            json!([{"role": "user", "content": [{"type": "text", "text": "Hello"}]}])
        );
        assert!(body.get("search_domain_filter").is_none());
        assert_eq!(body["stream"], json!(false));
        assert_eq!(body["return_images"], json!(false));
        assert_eq!(body["return_related_questions"], json!(false));
        assert_eq!(body["web_search_options"], json!({"search_context_size": "low"}));
    }

    #[test]
    fn unknown_model_is_rejected() {
        let request = ModelRequest::from(vec![Message::user("Hello")]);
        let err = convert_request_to_sonar("llama-3", request).unwrap_err();
        assert!(matches!(err, SonarError::UnsupportedModel(name) if name == "llama-3"));
    }

    #[test]
    fn every_catalog_model_converts() {
        for name in [
            "sonar",
            "sonar-pro",
            "sonar-reasoning",
            "sonar-reasoning-pro",
            "sonar-deep-research",
        ] {
            let request = ModelRequest::from(vec![Message::user("Hello")]);
            let body = body(&convert_request_to_sonar(name, request).unwrap());
            assert_eq!(body["model"], json!(name));
        }
    }

    #[test]
    fn text_output_uses_text_marker() {
        let request = ModelRequest::from(vec![Message::user("Hello")]);
        let body = body(&convert_request_to_sonar("sonar", request).unwrap());
        assert_eq!(body["response_format"], json!({"type": "text"}));
    }

    #[test]
    fn json_output_embeds_schema_verbatim() {
        let schema = json!({
            "type": "object",
            "properties": {"answer": {"type": "string"}},
            "required": ["answer"]
        });
        let request = ModelRequest::builder()
            .message(Message::user("Hello"))
            .output(OutputConfig::json(Some(schema.clone())))
            .build();
        let body = body(&convert_request_to_sonar("sonar", request).unwrap());
        assert_eq!(
            body["response_format"],
            json!({"type": "json_schema", "json_schema": {"schema": schema}})
        );
    }

    #[test]
    fn json_output_without_schema_sends_empty_object() {
        let request = ModelRequest::builder()
            .message(Message::user("Hello"))
            .output(OutputConfig::json(None))
            .build();
        let body = body(&convert_request_to_sonar("sonar", request).unwrap());
        assert_eq!(body["response_format"]["json_schema"]["schema"], json!({}));
    }

    #[test]
    fn empty_domain_filter_is_omitted_and_populated_one_kept() {
        let empty = ModelRequest::builder()
            .message(Message::user("Hello"))
            .config(
                GenerationConfig::builder()
                    .web_search(WebSearchOptions::builder().domain_filter(Vec::<String>::new()).build())
                    .build(),
            )
            .build();
        let body_empty = body(&convert_request_to_sonar("sonar", empty).unwrap());
        assert!(body_empty.get("search_domain_filter").is_none());

        let populated = ModelRequest::builder()
            .message(Message::user("Hello"))
            .config(
                GenerationConfig::builder()
                    .web_search(
                        WebSearchOptions::builder()
                            .domain_filter(vec!["arxiv.org".to_string()])
                            .build(),
                    )
                    .build(),
            )
            .build();
        let body_populated = body(&convert_request_to_sonar("sonar", populated).unwrap());
        assert_eq!(body_populated["search_domain_filter"], json!(["arxiv.org"]));
    }

    #[test]
    fn generation_options_override_defaults() {
        let search = WebSearchOptions::builder()
            .before_date(NaiveDate::from_ymd_opt(2025, 2, 1).unwrap())
            .after_date(NaiveDate::from_ymd_opt(2024, 12, 24).unwrap())
            .recency(SearchRecency::Month)
            .context_size(SearchContextSize::High)
            .user_location(UserLocation::builder().country("DE").build())
            .build();
        let request = ModelRequest::builder()
            .message(Message::user("Hello"))
            .config(
                GenerationConfig::builder()
                    .temperature(0.7)
                    .top_p(0.5)
                    .top_k(40)
                    .max_output_tokens(128)
                    .web_search(search)
                    .build(),
            )
            .build();
        let body = body(&convert_request_to_sonar("sonar-reasoning", request).unwrap());

        assert_eq!(body["temperature"], json!(0.7));
        assert_eq!(body["top_p"], json!(0.5));
        assert_eq!(body["top_k"], json!(40));
        assert_eq!(body["max_tokens"], json!(128));
        assert_eq!(body["search_before_date_filter"], json!("02/01/2025"));
        assert_eq!(body["search_after_date_filter"], json!("12/24/2024"));
        assert_eq!(body["search_recency_filter"], json!("month"));
        assert_eq!(
            body["web_search_options"],
            json!({"search_context_size": "high", "user_location": {"country": "DE"}})
        );
    }

    #[test]
    fn reserved_fields_are_never_sent() {
        let request = ModelRequest::from(vec![Message::user("Hello")]);
        let body = body(&convert_request_to_sonar("sonar", request).unwrap());
        for key in ["presence_penalty", "frequency_penalty", "stop_sequences"] {
            assert!(body.get(key).is_none(), "{key} should be absent");
        }
    }

    #[test]
    fn system_message_collapses_to_flat_string() {
        let system = Message::new(
            MessageRole::System,
            vec![Part::text("You are terse. "), Part::text("Cite sources.")],
        );
        let request = ModelRequest::from(vec![system, Message::user("Hello")]);
        let body = body(&convert_request_to_sonar("sonar", request).unwrap());

        assert_eq!(
            body["messages"][0],
            json!({"role": "system", "content": "You are terse. Cite sources."})
        );
        assert!(body["messages"][1]["content"].is_array());
    }

    #[test]
    fn model_role_maps_to_assistant() {
        let message = Message::new(MessageRole::from("model"), vec![Part::text("Hi")]);
        let request = ModelRequest::from(vec![Message::user("Hello"), message]);
        let body = body(&convert_request_to_sonar("sonar", request).unwrap());
        assert_eq!(body["messages"][1]["role"], json!("assistant"));
    }

    #[test]
    fn unknown_role_is_rejected() {
        let message = Message::new(MessageRole::from("tool"), vec![Part::text("42")]);
        let err = convert_request_to_sonar("sonar", ModelRequest::from(vec![message])).unwrap_err();
        assert!(matches!(err, SonarError::UnsupportedRole(role) if role == "tool"));
    }

    #[test]
    fn media_parts_become_image_urls() {
        let message = Message::new(
            MessageRole::User,
            vec![
                Part::text("What is in these?"),
                Part::blob_uri("https://example.com/cat.png", "image/png"),
                Part::blob_base64("aGVsbG8=", "image/jpeg"),
            ],
        );
        let body = body(&convert_request_to_sonar("sonar-pro", ModelRequest::from(vec![message])).unwrap());
        assert_eq!(
            body["messages"][0]["content"],
            json!([
                {"type": "text", "text": "What is in these?"},
                {"type": "image_url", "image_url": {"url": "https://example.com/cat.png"}},
                {"type": "image_url", "image_url": {"url": "data:image/jpeg;base64,aGVsbG8="}}
            ])
        );
    }

    #[test]
    fn unsupported_parts_are_rejected() {
        let tool_use = Part::ToolUse {
            id: "call_1".to_string(),
            name: "search".to_string(),
            args: json!({}),
        };
        assert!(matches!(
            convert_part(tool_use),
            Err(SonarError::UnsupportedPart(kind)) if kind == "toolUse"
        ));
        assert!(matches!(
            convert_part(Part::data(json!({"a": 1}))),
            Err(SonarError::UnsupportedPart(_))
        ));
        assert!(matches!(
            convert_part(Part::text("")),
            Err(SonarError::UnsupportedPart(_))
        ));
    }

    #[test]
    fn finish_reason_table() {
        assert_eq!(convert_finish_reason(Some("stop")), FinishReason::Stop);
        assert_eq!(convert_finish_reason(Some("length")), FinishReason::Length);
        assert_eq!(convert_finish_reason(Some("tool_calls")), FinishReason::Stop);
        assert_eq!(convert_finish_reason(Some("function_call")), FinishReason::Stop);
        assert_eq!(convert_finish_reason(Some("content_filter")), FinishReason::Length);
        assert_eq!(convert_finish_reason(Some("eos")), FinishReason::Unknown);
        assert_eq!(convert_finish_reason(None), FinishReason::Unknown);
    }

    #[test]
    fn text_choice_keeps_content_and_index() {
        let candidate = convert_choice(choice(2, Some("Paris."), Some("stop")), false).unwrap();
        assert_eq!(candidate.index, 2);
        assert_eq!(candidate.finish_reason, FinishReason::Stop);
        assert_eq!(candidate.message.role, MessageRole::Assistant);
        assert_eq!(candidate.message.content, vec![Part::text("Paris.")]);
    }

    #[test]
    fn json_choice_is_parsed() {
        let candidate = convert_choice(choice(0, Some(r#"{"a":1}"#), Some("stop")), true).unwrap();
        assert_eq!(candidate.message.data(), Some(&json!({"a": 1})));
    }

    #[test]
    fn json_choice_without_content_is_empty_object() {
        let candidate = convert_choice(choice(0, None, Some("stop")), true).unwrap();
        assert_eq!(candidate.message.data(), Some(&json!({})));
    }

    #[test]
    fn malformed_json_choice_is_an_error() {
        let err = convert_choice(choice(0, Some("{bad"), Some("stop")), true).unwrap_err();
        assert!(matches!(err, SonarError::MalformedResponse { content, .. } if content == "{bad"));
    }

    #[test]
    fn usage_is_mapped() {
        let mut usage = SonarUsage::new(10, 20);
        usage.tokens.total_tokens = Some(30);
        usage.citation_tokens = Some(500);
        usage.num_search_queries = Some(2);

        let mapped = convert_usage(Some(&usage));
        assert_eq!(mapped.requests, 1);
        assert_eq!(mapped.input_tokens, 10);
        assert_eq!(mapped.output_tokens, 20);
        assert_eq!(mapped.total_tokens(), 30);
        assert_eq!(mapped.citation_tokens, Some(500));
        assert_eq!(mapped.search_queries, Some(2));

        let empty = convert_usage(None);
        assert_eq!(empty.requests, 1);
        assert_eq!(empty.total_tokens(), 0);
    }

    #[test]
    fn response_keeps_choice_order_and_citations() {
        let raw = json!({"id": "r1"});
        let response = ChatResponse {
            id: "r1".to_string(),
            model: "sonar".to_string(),
            created: Some(1),
            object: None,
            citations: vec!["https://example.com".to_string()],
            choices: vec![
                choice(0, Some("first"), Some("stop")),
                choice(1, Some("second"), Some("length")),
            ],
            usage: None,
        };

        let converted = convert_response(response, raw.clone(), false, "sonar").unwrap();
        let texts: Vec<_> = converted.candidates.iter().map(|c| c.message.text()).collect();
        assert_eq!(texts, vec!["first", "second"]);
        assert_eq!(converted.candidates[1].finish_reason, FinishReason::Length);
        assert_eq!(converted.vendor_name, "perplexity");
        assert_eq!(converted.model_name, "sonar");
        assert_eq!(converted.citations, vec!["https://example.com"]);
        assert_eq!(converted.raw, Some(raw));
    }
}
