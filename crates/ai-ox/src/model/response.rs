use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{content::Message, usage::Usage};

/// Why the model stopped producing a candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinishReason {
    /// Natural end of the answer
    Stop,
    /// Cut short by a token limit or a content filter
    Length,
    /// The provider sent a reason we do not recognise
    Unknown,
}

/// One generated alternative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    /// Position in the provider's choice list
    pub index: u32,
    pub finish_reason: FinishReason,
    pub message: Message,
}

/// Normalized result of one model call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelResponse {
    pub candidates: Vec<Candidate>,
    pub usage: Usage,
    pub model_name: String,
    pub vendor_name: String,
    /// Source URLs the provider cited, if any
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub citations: Vec<String>,
    /// The provider's response body, untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw: Option<Value>,
}

impl ModelResponse {
    /// The first candidate, which is the answer in the common single-choice case.
    pub fn first(&self) -> Option<&Candidate> {
        self.candidates.first()
    }

    /// Text of the first candidate.
    pub fn text(&self) -> Option<String> {
        self.first().map(|c| c.message.text())
    }

    /// Structured data of the first candidate (json output only).
    pub fn data(&self) -> Option<&Value> {
        self.first().and_then(|c| c.message.data())
    }
}

/// A structured response deserialized into the caller's type.
#[derive(Debug, Clone)]
pub struct StructuredResponse<O> {
    pub data: O,
    pub usage: Usage,
    pub model_name: String,
    pub vendor_name: String,
}
