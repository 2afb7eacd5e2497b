use chrono::{DateTime, SecondsFormat};
use serde::de::Error;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::models::{ContentPart, MessageContent};

/// Custom deserializer for timestamps that accepts RFC3339 strings and integers (ms)
///
/// Strings are kept verbatim so that ordering stays lexicographic, as written by
/// Claude Code. Millisecond integers are normalized to the same RFC3339 shape.
pub fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => {
            let ms = n.as_i64().ok_or_else(|| Error::custom("invalid timestamp"))?;
            let dt = DateTime::from_timestamp_millis(ms)
                .ok_or_else(|| Error::custom("timestamp out of range"))?;
            Ok(Some(dt.to_rfc3339_opts(SecondsFormat::Millis, true)))
        }
        _ => Err(Error::custom("timestamp must be a number or string")),
    }
}

/// Custom deserializer for `message.content`
///
/// Accepts a string or an array of parts. Parts that do not match a known shape
/// degrade to [`ContentPart::Other`] instead of rejecting the whole record.
/// Any other JSON type is treated as missing content.
pub fn deserialize_content<'de, D>(deserializer: D) -> Result<Option<MessageContent>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let content = match value {
        Value::String(s) => Some(MessageContent::Text(s)),
        Value::Array(items) => Some(MessageContent::Parts(
            items
                .into_iter()
                .map(|item| serde_json::from_value(item).unwrap_or(ContentPart::Other))
                .collect(),
        )),
        _ => None,
    };
    Ok(content)
}

#[cfg(test)]
mod tests {
    use crate::models::{ContentPart, Message, MessageContent, RawRecord};

    #[test]
    fn test_timestamp_string_is_kept_verbatim() {
        let json = r#"{"timestamp":"2025-11-02T09:41:20.016Z"}"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.timestamp.as_deref(), Some("2025-11-02T09:41:20.016Z"));
    }

    #[test]
    fn test_timestamp_integer_millis() {
        let json = r#"{"timestamp":1762076480016}"#;
        let record: RawRecord = serde_json::from_str(json).unwrap();
        // Nov 2, 2025 09:41:20.016 UTC
        assert_eq!(record.timestamp.as_deref(), Some("2025-11-02T09:41:20.016Z"));
    }

    #[test]
    fn test_timestamp_null_and_missing() {
        let record: RawRecord = serde_json::from_str(r#"{"timestamp":null}"#).unwrap();
        assert!(record.timestamp.is_none());

        let record: RawRecord = serde_json::from_str(r#"{}"#).unwrap();
        assert!(record.timestamp.is_none());
    }

    #[test]
    fn test_timestamp_wrong_type_rejects_record() {
        let result = serde_json::from_str::<RawRecord>(r#"{"timestamp":true}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_content_string() {
        let message: Message =
            serde_json::from_str(r#"{"role":"user","content":"fix the bug"}"#).unwrap();
        assert_eq!(message.content, Some(MessageContent::Text("fix the bug".to_string())));
    }

    #[test]
    fn test_content_malformed_part_degrades() {
        let json = r#"{"role":"user","content":["bare string",{"type":"text","text":"ok"},{"no_type":1}]}"#;
        let message: Message = serde_json::from_str(json).unwrap();
        let content = message.content.unwrap();
        assert_eq!(
            content.parts(),
            &[
                ContentPart::Other,
                ContentPart::Text { text: "ok".to_string() },
                ContentPart::Other
            ]
        );
    }

    #[test]
    fn test_content_object_is_missing() {
        let message: Message =
            serde_json::from_str(r#"{"role":"user","content":{"weird":true}}"#).unwrap();
        assert!(message.content.is_none());
    }

    #[test]
    fn test_tool_result_with_list_content() {
        let json = r#"{"role":"user","content":[{"type":"tool_result","tool_use_id":"t1","content":[{"type":"text","text":"done"}]}]}"#;
        let message: Message = serde_json::from_str(json).unwrap();
        let content = message.content.unwrap();
        assert!(matches!(
            &content.parts()[0],
            ContentPart::ToolResult { tool_use_id, content } if tool_use_id == "t1" && content.is_array()
        ));
    }
}
