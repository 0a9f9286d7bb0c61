use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    User,
    Assistant,
}

/// One transcript entry as the browser sends it. Unknown fields are
/// ignored; `image` is a data URL and `file` is text extracted by the
/// upload endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl ConversationMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_image(mut self, data_url: impl Into<String>) -> Self {
        self.image = Some(data_url.into());
        self
    }

    #[must_use]
    pub fn with_file(mut self, text: impl Into<String>) -> Self {
        self.file = Some(text.into());
        self
    }

    /// The attached image, ignoring empty strings the browser may send.
    pub fn image(&self) -> Option<&str> {
        self.image.as_deref().filter(|image| !image.trim().is_empty())
    }

    pub fn file(&self) -> Option<&str> {
        self.file.as_deref().filter(|file| !file.is_empty())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub messages: Vec<ConversationMessage>,
    #[serde(default)]
    pub mode: Option<String>,
}

impl ChatRequest {
    pub fn latest(&self) -> Option<&ConversationMessage> {
        self.messages.last()
    }
}

/// Reply body. `image` is part of the browser contract and always `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub content: String,
    pub image: Option<String>,
}

impl ChatReply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            image: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reply_serializes_null_image() {
        let json = serde_json::to_value(ChatReply::text("hi")).unwrap();
        assert_eq!(json, serde_json::json!({"content": "hi", "image": null}));
    }

    #[test]
    fn request_tolerates_browser_extras() {
        let request: ChatRequest = serde_json::from_value(serde_json::json!({
            "messages": [
                {"role": "assistant", "content": "Welcome", "image": null},
                {"role": "user", "content": "hi", "timestamp": 12, "file": "notes"}
            ],
            "mode": "bijo"
        }))
        .unwrap();
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::Assistant);
        assert_eq!(request.mode.as_deref(), Some("bijo"));
        assert_eq!(request.latest().and_then(ConversationMessage::file), Some("notes"));
    }

    #[test]
    fn mode_is_optional() {
        let request: ChatRequest =
            serde_json::from_str(r#"{"messages":[{"role":"user","content":"x"}]}"#).unwrap();
        assert!(request.mode.is_none());
    }

    #[test]
    fn blank_attachments_are_ignored() {
        let message = ConversationMessage::user("x").with_image("  ").with_file("");
        assert!(message.image().is_none());
        assert!(message.file().is_none());
    }
}
