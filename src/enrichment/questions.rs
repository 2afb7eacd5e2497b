use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use serde_json::Value;

use crate::enrichment::annotations::ToolKind;
use crate::models::{ContentPart, Question, QuestionAnswer, RawRecord};

/// Shown when the user declined without saying anything usable
pub const CLARIFICATION_PLACEHOLDER: &str = "[User requested clarification]";

const ANSWERED_MARKER: &str = "User has answered your questions:";
const DECLINED_MARKER: &str = "doesn't want to proceed";
const CLARIFY_MARKER: &str = "user wants to clarify";
const CLARIFY_BOILERPLATE: &str = "user wants to clarify these questions";
const TRAILING_BOILERPLATE: &[&str] = &["\n    Questions asked:", "\n\n    This means"];

static USER_SAID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)the user said:").expect("user said pattern is valid"));

static ANSWER_PAIR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""([^"]*)"="([^"]*)""#).expect("answer pair pattern is valid")
});

#[derive(Debug, Default, Deserialize)]
struct QuestionInput {
    #[serde(default)]
    questions: Vec<Question>,
}

/// Interactive questions seen in a log, keyed by invocation id, with answers
///
/// Built in one pass over the filtered records before turns are assembled, so
/// that an assistant turn can show the answer that arrives in a later user
/// record.
#[derive(Debug, Default)]
pub struct QuestionLedger {
    questions: HashMap<String, Vec<Question>>,
    answers: HashMap<String, Option<String>>,
}

impl QuestionLedger {
    pub fn collect<'a>(records: impl IntoIterator<Item = &'a RawRecord>) -> Self {
        let mut ledger = Self::default();
        for record in records {
            let Some(content) = record.message.as_ref().and_then(|m| m.content.as_ref()) else {
                continue;
            };
            for part in content.parts() {
                ledger.observe(part);
            }
        }
        ledger
    }

    fn observe(&mut self, part: &ContentPart) {
        match part {
            ContentPart::ToolUse { id, name, input }
                if ToolKind::from_name(name) == ToolKind::AskUserQuestion =>
            {
                self.questions.insert(id.clone(), parse_questions(input));
            }
            ContentPart::ToolResult { tool_use_id, content } if self.is_question(tool_use_id) => {
                self.answers.insert(tool_use_id.clone(), parse_answer(content));
            }
            _ => {}
        }
    }

    /// Whether `tool_use_id` names an interactive question seen so far
    pub fn is_question(&self, tool_use_id: &str) -> bool {
        self.questions.contains_key(tool_use_id)
    }

    /// Q&A block for the question invoked with `id`
    pub fn question_answer(&self, id: &str, input: &Value) -> QuestionAnswer {
        let questions = self.questions.get(id).cloned().unwrap_or_else(|| parse_questions(input));
        let answer = self.answers.get(id).cloned().flatten();
        QuestionAnswer { questions, answer }
    }
}

fn parse_questions(input: &Value) -> Vec<Question> {
    QuestionInput::deserialize(input).map(|parsed| parsed.questions).unwrap_or_default()
}

/// Extract the user's answer from an interactive question's tool result
///
/// Handles three shapes of result text: structured `"question"="answer"`
/// pairs, a refusal or clarification request (optionally quoting what the user
/// said), and anything else, which yields `None`.
pub fn parse_answer(content: &Value) -> Option<String> {
    let text = match content {
        Value::String(s) => s.clone(),
        Value::Array(parts) => parts
            .iter()
            .filter(|p| p.get("type").and_then(Value::as_str) == Some("text"))
            .map(|p| p.get("text").and_then(Value::as_str).unwrap_or_default())
            .collect::<Vec<_>>()
            .join("\n"),
        _ => return None,
    };

    if text.contains(ANSWERED_MARKER) {
        let values: Vec<&str> =
            ANSWER_PAIR.captures_iter(&text).filter_map(|c| c.get(2)).map(|m| m.as_str().trim()).collect();
        if !values.is_empty() {
            return Some(values.join("; "));
        }
    }

    let lower = text.to_lowercase();
    if text.contains(DECLINED_MARKER) || lower.contains(CLARIFY_MARKER) {
        if let Some(said) = user_said(&text)
            && !said.is_empty()
            && !said.to_lowercase().contains(CLARIFY_BOILERPLATE)
        {
            return Some(said);
        }
        return Some(CLARIFICATION_PLACEHOLDER.to_string());
    }

    None
}

/// Text following "the user said:", without the trailing tool boilerplate
fn user_said(text: &str) -> Option<String> {
    let after = text[USER_SAID.find(text)?.end()..].trim();

    let mut said = after;
    for marker in TRAILING_BOILERPLATE {
        if let Some(end) = said.find(marker)
            && end > 0
        {
            said = said[..end].trim();
        }
    }
    Some(said.to_string())
}
