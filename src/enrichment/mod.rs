//! Enrichment of assistant turns
//!
//! Raw tool invocations are replaced by what a reader needs:
//!
//! - [`annotations`] - One line per tool call, dispatched on [`ToolKind`]
//! - [`questions`] - Interactive questions paired with the user's answers
//! - [`files`] - Inline snapshots of small files the assistant wrote

pub mod annotations;
pub mod files;
pub mod questions;

use std::path::Path;

pub use annotations::ToolKind;
pub use files::{MAX_INLINE_LINES, capture_written_file, language_hint};
pub use questions::{QuestionLedger, parse_answer};

use crate::models::{ContentPart, QuestionAnswer, ToolAnnotation};

/// Enrichment payload gathered from the tool invocations of one assistant turn
#[derive(Debug, Default)]
pub struct ToolEnrichment {
    pub annotations: Vec<ToolAnnotation>,
    pub question_answers: Vec<QuestionAnswer>,
}

impl ToolEnrichment {
    /// Add one content part; parts that aren't tool invocations are ignored
    pub fn push(&mut self, part: &ContentPart, ledger: &QuestionLedger, home: Option<&Path>) {
        let ContentPart::ToolUse { id, name, input } = part else {
            return;
        };

        let kind = ToolKind::from_name(name);
        if let Some(text) = kind.annotate(input, home) {
            let written_file =
                if kind == ToolKind::Write { capture_written_file(input) } else { None };
            self.annotations.push(ToolAnnotation { text, written_file });
        }

        if kind == ToolKind::AskUserQuestion {
            self.question_answers.push(ledger.question_answer(id, input));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty() && self.question_answers.is_empty()
    }
}
