//! Grouping of filtered records into turns.
//!
//! One assistant response is often spread over several records (text, then a
//! tool call, then more text), all stamped with the same `requestId`. Those
//! records are merged; a user record or a new request id closes the group.

use std::path::Path;

use crate::enrichment::{QuestionLedger, ToolEnrichment};
use crate::filters::is_significant;
use crate::models::record::{ROLE_ASSISTANT, ROLE_USER};
use crate::models::{ContentPart, MessageContent, RawRecord, Role, Turn};

/// Records that form one turn before enrichment
#[derive(Debug, Clone)]
pub struct RecordGroup<'a> {
    pub role: Role,
    pub records: Vec<&'a RawRecord>,
}

/// Pending assistant group while walking the log
#[derive(Debug, Default)]
struct TurnAccumulator<'a> {
    groups: Vec<RecordGroup<'a>>,
    request_id: Option<&'a str>,
    pending: Vec<&'a RawRecord>,
}

impl<'a> TurnAccumulator<'a> {
    fn push_assistant(&mut self, record: &'a RawRecord) {
        let request_id = record.request_id();
        if request_id.is_some() && request_id == self.request_id {
            self.pending.push(record);
        } else {
            self.flush();
            self.request_id = request_id;
            self.pending.push(record);
        }
    }

    fn push_user(&mut self, record: &'a RawRecord) {
        self.flush();
        self.groups.push(RecordGroup { role: Role::User, records: vec![record] });
    }

    fn flush(&mut self) {
        if !self.pending.is_empty() {
            let records = std::mem::take(&mut self.pending);
            self.groups.push(RecordGroup { role: Role::Assistant, records });
        }
        self.request_id = None;
    }

    fn finish(mut self) -> Vec<RecordGroup<'a>> {
        self.flush();
        self.groups
    }
}

/// Group filtered records into user and assistant record groups
///
/// Records without content, or with a role other than user/assistant, are
/// skipped without closing the pending assistant group.
pub fn group_records<'a>(records: &[&'a RawRecord]) -> Vec<RecordGroup<'a>> {
    let mut acc = TurnAccumulator::default();

    for &record in records {
        let Some(message) = &record.message else { continue };
        if message.content.as_ref().is_none_or(MessageContent::is_empty) {
            continue;
        }

        match message.role.as_deref() {
            Some(ROLE_ASSISTANT) => acc.push_assistant(record),
            Some(ROLE_USER) => acc.push_user(record),
            _ => {}
        }
    }

    acc.finish()
}

/// Build turns from record groups, dropping groups with nothing to show
pub fn build_turns(groups: &[RecordGroup<'_>], ledger: &QuestionLedger, home: Option<&Path>) -> Vec<Turn> {
    groups
        .iter()
        .filter_map(|group| match group.role {
            Role::Assistant => assistant_turn(&group.records, ledger, home),
            Role::User => group.records.first().and_then(|record| user_turn(record, ledger)),
        })
        .collect()
}

fn assistant_turn(records: &[&RawRecord], ledger: &QuestionLedger, home: Option<&Path>) -> Option<Turn> {
    let mut texts: Vec<&str> = Vec::new();
    let mut enrichment = ToolEnrichment::default();

    for record in records {
        match record.message.as_ref().and_then(|m| m.content.as_ref()) {
            Some(MessageContent::Text(text)) => texts.push(text),
            Some(MessageContent::Parts(parts)) => {
                for part in parts {
                    if let ContentPart::Text { text } = part {
                        texts.push(text);
                    }
                    enrichment.push(part, ledger, home);
                }
            }
            None => {}
        }
    }

    let text = texts.into_iter().filter(|t| !t.trim().is_empty()).collect::<Vec<_>>().join("\n\n");

    if !is_significant(&text) && enrichment.is_empty() {
        return None;
    }

    Some(Turn {
        role: Role::Assistant,
        text,
        timestamp: records.first().and_then(|r| r.timestamp.clone()),
        annotations: enrichment.annotations,
        question_answers: enrichment.question_answers,
    })
}

fn user_turn(record: &RawRecord, ledger: &QuestionLedger) -> Option<Turn> {
    let text = match record.message.as_ref()?.content.as_ref()? {
        MessageContent::Text(text) => text.clone(),
        MessageContent::Parts(parts) => {
            let mut texts: Vec<&str> = Vec::new();
            let mut only_question_results = true;
            for part in parts {
                match part {
                    ContentPart::Text { text } => texts.push(text),
                    ContentPart::ToolResult { tool_use_id, .. } if ledger.is_question(tool_use_id) => {}
                    _ => only_question_results = false,
                }
            }
            let text = texts.join("\n\n");
            // The answer is shown with the assistant turn that asked
            if only_question_results && !is_significant(&text) {
                return None;
            }
            text
        }
    };

    if !is_significant(&text) {
        return None;
    }

    Some(Turn::user(text, record.timestamp.clone()))
}
