use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One option offered by an interactive question
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
}

/// An interactive question paired with the answer the user gave.
///
/// `answer` is `None` when no tool result was ever recorded for the question,
/// or when the result carried nothing recognizable as an answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionAnswer {
    pub questions: Vec<Question>,
    pub answer: Option<String>,
}

/// Content of a small file written by the assistant, kept for inline display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrittenFile {
    pub file_path: String,
    pub content: String,
    pub line_count: usize,
}

/// One-line description of a tool invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolAnnotation {
    pub text: String,
    /// Present for file writes small enough to render inline
    pub written_file: Option<WrittenFile>,
}

impl ToolAnnotation {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into(), written_file: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub text: String,
    pub timestamp: Option<String>,
    pub annotations: Vec<ToolAnnotation>,
    pub question_answers: Vec<QuestionAnswer>,
}

impl Turn {
    pub fn user(text: impl Into<String>, timestamp: Option<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            timestamp,
            annotations: Vec::new(),
            question_answers: Vec::new(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    pub fn is_assistant(&self) -> bool {
        self.role == Role::Assistant
    }
}

/// A reconstructed session log, ready for listing, search and export
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    pub path: PathBuf,
    pub session_id: String,
    pub project: Option<String>,
    pub title: String,
    pub last_timestamp: Option<String>,
    pub turns: Vec<Turn>,
}

impl Conversation {
    pub fn message_count(&self) -> usize {
        self.turns.len()
    }

    pub fn user_message_count(&self) -> usize {
        self.turns.iter().filter(|t| t.is_user()).count()
    }

    /// Text of the final assistant turn, which may be empty for tool-only turns
    pub fn last_assistant_text(&self) -> Option<&str> {
        self.turns.iter().rev().find(|t| t.is_assistant()).map(|t| t.text.as_str())
    }

    /// Last component of the project path, for compact listings
    pub fn project_name(&self) -> Option<String> {
        let project = self.project.as_deref()?;
        PathBuf::from(project).file_name().map(|name| name.to_string_lossy().into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assistant(text: &str) -> Turn {
        Turn {
            role: Role::Assistant,
            text: text.to_string(),
            timestamp: None,
            annotations: Vec::new(),
            question_answers: Vec::new(),
        }
    }

    fn conversation(turns: Vec<Turn>) -> Conversation {
        Conversation {
            path: PathBuf::from("/tmp/s.jsonl"),
            session_id: "s".to_string(),
            project: Some("/home/dev/shop-api".to_string()),
            title: "t".to_string(),
            last_timestamp: None,
            turns,
        }
    }

    #[test]
    fn test_counts() {
        let conv = conversation(vec![Turn::user("a", None), assistant("b"), Turn::user("c", None)]);
        assert_eq!(conv.message_count(), 3);
        assert_eq!(conv.user_message_count(), 2);
    }

    #[test]
    fn test_last_assistant_text() {
        let conv = conversation(vec![assistant("first"), Turn::user("q", None), assistant("second")]);
        assert_eq!(conv.last_assistant_text(), Some("second"));

        let only_user = conversation(vec![Turn::user("q", None)]);
        assert_eq!(only_user.last_assistant_text(), None);
    }

    #[test]
    fn test_project_name() {
        let conv = conversation(vec![]);
        assert_eq!(conv.project_name().as_deref(), Some("shop-api"));
    }
}
