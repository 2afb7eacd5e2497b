use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ROLE_USER: &str = "user";
pub const ROLE_ASSISTANT: &str = "assistant";

/// One line of a session log.
///
/// Every field is optional: Claude Code writes several record shapes into the
/// same file (messages, summaries, file-history snapshots), and only the ones
/// carrying a `message` take part in reconstruction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    #[serde(default)]
    pub uuid: Option<String>,
    #[serde(default)]
    pub parent_uuid: Option<String>,
    #[serde(default)]
    pub message: Option<Message>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_timestamp")]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub is_meta: Option<bool>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub cwd: Option<String>,
}

impl RawRecord {
    pub fn is_meta(&self) -> bool {
        self.is_meta.unwrap_or(false)
    }

    /// Record id, treating an empty string as absent
    pub fn uuid(&self) -> Option<&str> {
        self.uuid.as_deref().filter(|id| !id.is_empty())
    }

    /// Parent id, treating an empty string as absent
    pub fn parent_uuid(&self) -> Option<&str> {
        self.parent_uuid.as_deref().filter(|id| !id.is_empty())
    }

    /// Request id, treating an empty string as absent
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref().filter(|id| !id.is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default, deserialize_with = "crate::parsers::deserializers::deserialize_content")]
    pub content: Option<MessageContent>,
}

/// `message.content` is either plain text or an ordered list of typed parts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl MessageContent {
    pub fn is_empty(&self) -> bool {
        match self {
            MessageContent::Text(text) => text.is_empty(),
            MessageContent::Parts(parts) => parts.is_empty(),
        }
    }

    pub fn parts(&self) -> &[ContentPart] {
        match self {
            MessageContent::Text(_) => &[],
            MessageContent::Parts(parts) => parts,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentPart {
    Text {
        #[serde(default)]
        text: String,
    },
    ToolUse {
        #[serde(default)]
        id: String,
        #[serde(default)]
        name: String,
        #[serde(default)]
        input: Value,
    },
    ToolResult {
        #[serde(default)]
        tool_use_id: String,
        #[serde(default)]
        content: Value,
    },
    /// Thinking blocks, images and anything else not rendered
    #[serde(other)]
    Other,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_with_all_fields() {
        let json = r#"{"type":"assistant","uuid":"a1","parentUuid":"u1","requestId":"req_1","isMeta":false,"sessionId":"s1","cwd":"/work/app","timestamp":"2025-01-01T10:00:00.000Z","message":{"role":"assistant","content":[{"type":"text","text":"Hi"}]}}"#;

        let record: RawRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.uuid.as_deref(), Some("a1"));
        assert_eq!(record.parent_uuid.as_deref(), Some("u1"));
        assert_eq!(record.request_id(), Some("req_1"));
        assert_eq!(record.session_id.as_deref(), Some("s1"));
        assert_eq!(record.cwd.as_deref(), Some("/work/app"));
        assert!(!record.is_meta());
        assert_eq!(record.uuid(), Some("a1"));
        assert_eq!(record.parent_uuid(), Some("u1"));

        let message = record.message.unwrap();
        assert_eq!(message.role.as_deref(), Some(ROLE_ASSISTANT));
        assert_eq!(
            message.content,
            Some(MessageContent::Parts(vec![ContentPart::Text { text: "Hi".to_string() }]))
        );
    }

    #[test]
    fn test_record_without_message() {
        let json = r#"{"type":"summary","summary":"Fix tests","leafUuid":"x"}"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();
        assert!(record.message.is_none());
        assert!(record.uuid.is_none());
    }

    #[test]
    fn test_null_message_is_absent() {
        let json = r#"{"uuid":"a1","message":null}"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();
        assert!(record.message.is_none());
    }

    #[test]
    fn test_empty_request_id_is_absent() {
        let record = RawRecord { request_id: Some(String::new()), ..Default::default() };
        assert_eq!(record.request_id(), None);
    }

    #[test]
    fn test_unknown_part_type_becomes_other() {
        let json = r#"{"role":"assistant","content":[{"type":"thinking","thinking":"hmm"},{"type":"tool_use","id":"t1","name":"Read","input":{"file_path":"/a"}}]}"#;
        let message: Message = serde_json::from_str(json).unwrap();
        let content = message.content.unwrap();
        assert_eq!(content.parts().len(), 2);
        assert_eq!(content.parts()[0], ContentPart::Other);
        assert!(matches!(&content.parts()[1], ContentPart::ToolUse { name, .. } if name == "Read"));
    }
}
