use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::tool::ToolCall;

/// Represents the role of a message sender in a chat.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Message {
    pub role: Role,
    // Assistant messages that only carry tool calls come back without content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl Message {
    /// Creates a new message with a specific role and content.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: Some(content.into()),
            images: None,
            tool_calls: None,
        }
    }

    /// Creates a new 'system' message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Creates a new 'user' message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Creates a new 'assistant' message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Creates a 'tool' message carrying the result of a tool invocation.
    pub fn tool_result(content: impl Into<String>) -> Self {
        Self::new(Role::Tool, content)
    }

    /// Attaches base64-encoded images to the message.
    pub fn with_images(mut self, images: Vec<String>) -> Self {
        self.images = Some(images);
        self
    }
}

/// Output format constraint for generate and chat requests.
///
/// The server accepts either the literal string `"json"` or a full JSON
/// schema object; the variant chosen at construction time decides the wire
/// shape.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(untagged)]
pub enum FormatSpec {
    Name(String),
    Schema(Value),
}

impl FormatSpec {
    pub fn json() -> Self {
        FormatSpec::Name("json".into())
    }
}

/// Fields shared by the generate and chat requests, flattened into both.
#[derive(Serialize, Debug, Clone, Default)]
pub struct BaseRequest {
    pub model: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<FormatSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<HashMap<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<String>, // e.g., "5m"
}

impl BaseRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn roles_serialize_lowercase() {
        assert_eq!(serde_json::to_value(Role::System).unwrap(), json!("system"));
        assert_eq!(serde_json::to_value(Role::Tool).unwrap(), json!("tool"));
    }

    #[test]
    fn unset_message_fields_are_omitted() {
        let value = serde_json::to_value(Message::user("hi")).unwrap();
        assert_eq!(value, json!({"role": "user", "content": "hi"}));
    }

    #[test]
    fn format_name_and_schema_take_their_wire_shape() {
        let name = serde_json::to_value(FormatSpec::json()).unwrap();
        assert_eq!(name, json!("json"));

        let schema = FormatSpec::Schema(json!({"type": "object"}));
        assert_eq!(
            serde_json::to_value(schema).unwrap(),
            json!({"type": "object"})
        );
    }

    #[test]
    fn base_request_omits_unset_options() {
        let value = serde_json::to_value(BaseRequest::new("llama3")).unwrap();
        assert_eq!(value, json!({"model": "llama3"}));
    }
}
