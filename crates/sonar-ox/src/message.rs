use serde::{Deserialize, Serialize};

pub type Messages = Vec<Message>;

/// Wire role of a conversation turn.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One conversation turn as the API expects it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: MessageContent,
}

/// System turns carry a flat string, everything else a list of parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageUrl {
    pub url: String,
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    pub fn image_url(url: impl Into<String>) -> Self {
        Self::ImageUrl {
            image_url: ImageUrl { url: url.into() },
        }
    }
}

impl Message {
    pub fn new(role: Role, content: MessageContent) -> Self {
        Self { role, content }
    }

    /// A system turn with flat string content.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, MessageContent::Text(content.into()))
    }

    /// A user turn holding a single text part.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(
            Role::User,
            MessageContent::Parts(vec![ContentPart::text(text)]),
        )
    }

    /// An assistant turn holding a single text part.
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(
            Role::Assistant,
            MessageContent::Parts(vec![ContentPart::text(text)]),
        )
    }

    pub fn parts(role: Role, parts: impl IntoIterator<Item = ContentPart>) -> Self {
        Self::new(role, MessageContent::Parts(parts.into_iter().collect()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn system_message_is_flat_string() {
        let value = serde_json::to_value(Message::system("be terse")).unwrap();
        assert_eq!(value, json!({"role": "system", "content": "be terse"}));
    }

    #[test]
    fn user_parts_are_tagged() {
        let message = Message::parts(
            Role::User,
            [
                ContentPart::text("what is this?"),
                ContentPart::image_url("https://example.com/cat.png"),
            ],
        );
        let value = serde_json::to_value(&message).unwrap();
        assert_eq!(
            value,
            json!({
                "role": "user",
                "content": [
                    {"type": "text", "text": "what is this?"},
                    {"type": "image_url", "image_url": {"url": "https://example.com/cat.png"}}
                ]
            })
        );

        let back: Message = serde_json::from_value(value).unwrap();
        assert_eq!(back, message);
    }
}
