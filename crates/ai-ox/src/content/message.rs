use serde::{Deserialize, Serialize};

use super::part::Part;

/// Who authored a message.
///
/// `"model"` is accepted as a synonym for `"assistant"`. Any other role string
/// is preserved as `Unknown` so that adapters can reject it explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MessageRole {
    User,
    Assistant,
    System,
    Unknown(String),
}

impl From<String> for MessageRole {
    fn from(role: String) -> Self {
        match role.as_str() {
            "user" => Self::User,
            "assistant" | "model" => Self::Assistant,
            "system" => Self::System,
            _ => Self::Unknown(role),
        }
    }
}

impl From<&str> for MessageRole {
    fn from(role: &str) -> Self {
        Self::from(role.to_string())
    }
}

impl From<MessageRole> for String {
    fn from(role: MessageRole) -> Self {
        role.as_str().to_string()
    }
}

impl MessageRole {
    pub fn as_str(&self) -> &str {
        match self {
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::System => "system",
            Self::Unknown(role) => role,
        }
    }
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One turn of a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: Vec<Part>,
}

impl Message {
    pub fn new(role: MessageRole, content: Vec<Part>) -> Self {
        Self { role, content }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageRole::User, vec![Part::text(text)])
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(MessageRole::Assistant, vec![Part::text(text)])
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(MessageRole::System, vec![Part::text(text)])
    }

    /// All text parts concatenated in order. Non-text parts are skipped.
    pub fn text(&self) -> String {
        self.content.iter().filter_map(Part::as_text).collect()
    }

    /// First structured data part, if any.
    pub fn data(&self) -> Option<&serde_json::Value> {
        self.content.iter().find_map(Part::as_data)
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Self::user(text)
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Self::user(text)
    }
}
