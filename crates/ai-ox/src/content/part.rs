use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Reference to binary data - either a URI or inline base64
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "dataType", rename_all = "camelCase")]
pub enum DataRef {
    /// External URI reference
    Uri { uri: String },
    /// Inline base64-encoded data
    Base64 { data: String },
}

impl DataRef {
    /// Create a URI reference
    pub fn uri(uri: impl Into<String>) -> Self {
        Self::Uri { uri: uri.into() }
    }

    /// Create a base64 reference
    pub fn base64(data: impl Into<String>) -> Self {
        Self::Base64 { data: data.into() }
    }

    /// A URL for this data. Inline data becomes a `data:` URL.
    pub fn to_url(&self, mime_type: &str) -> String {
        match self {
            Self::Uri { uri } => uri.clone(),
            Self::Base64 { data } => format!("data:{mime_type};base64,{data}"),
        }
    }
}

/// One piece of message content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Part {
    /// Plain text content
    Text { text: String },

    /// Media content with MIME type
    Blob {
        #[serde(flatten)]
        data_ref: DataRef,
        /// MIME type (e.g., "image/png")
        #[serde(rename = "mimeType")]
        mime_type: String,
    },

    /// Structured JSON output
    Data { data: Value },

    /// Request to call a tool
    ToolUse { id: String, name: String, args: Value },

    /// Result from tool execution
    ToolResult {
        id: String,
        name: String,
        parts: Vec<Part>,
    },
}

impl Part {
    /// Create a text part
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Create a blob from URI
    pub fn blob_uri(uri: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self::Blob {
            data_ref: DataRef::uri(uri),
            mime_type: mime_type.into(),
        }
    }

    /// Create a blob from base64 data
    pub fn blob_base64(data: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self::Blob {
            data_ref: DataRef::base64(data),
            mime_type: mime_type.into(),
        }
    }

    pub fn data(data: Value) -> Self {
        Self::Data { data }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
            _ => None,
        }
    }

    pub fn as_data(&self) -> Option<&Value> {
        match self {
            Self::Data { data } => Some(data),
            _ => None,
        }
    }

    /// Short name of the variant, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text { .. } => "text",
            Self::Blob { .. } => "blob",
            Self::Data { .. } => "data",
            Self::ToolUse { .. } => "toolUse",
            Self::ToolResult { .. } => "toolResult",
        }
    }
}
