use std::fmt::Write;

use anyhow::{Context, Result};

use crate::enrichment::language_hint;
use crate::models::{Conversation, QuestionAnswer, Role, ToolAnnotation, Turn, WrittenFile};
use crate::utils::{parse_timestamp, preview};

/// Longest table-of-contents entry before it is cut
pub const TOC_PREVIEW_CHARS: usize = 100;

const UNKNOWN_PROJECT: &str = "Unknown";
const NO_ANSWER: &str = "[No answer recorded]";

/// Document-level metadata printed above the table of contents
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentHeader {
    pub title: String,
    /// Raw RFC 3339 timestamp of the last activity
    pub timestamp: Option<String>,
    pub project: Option<String>,
    pub message_count: usize,
}

impl DocumentHeader {
    pub fn from_conversation(conversation: &Conversation) -> Self {
        Self {
            title: conversation.title.clone(),
            timestamp: conversation.last_timestamp.clone(),
            project: conversation.project.clone(),
            message_count: conversation.message_count(),
        }
    }
}

/// Render a conversation as a markdown document with a linked table of contents
///
/// Fails when the header timestamp is missing or is not RFC 3339. Output only
/// depends on the arguments.
pub fn render_document(header: &DocumentHeader, turns: &[Turn]) -> Result<String> {
    let timestamp = header.timestamp.as_deref().context("Conversation has no timestamp")?;
    parse_timestamp(timestamp)?;

    let mut out = String::new();

    writeln!(out, "# Conversation: {}\n", header.title)?;
    writeln!(out, "**Date:** {}", timestamp)?;
    writeln!(out, "**Project:** {}", header.project.as_deref().unwrap_or(UNKNOWN_PROJECT))?;
    writeln!(out, "**Messages:** {}\n", header.message_count)?;

    writeln!(out, "## Table of Contents\n")?;
    for (n, turn) in turns.iter().filter(|t| t.is_user()).enumerate() {
        let first_line = turn.text.trim().split('\n').next().unwrap_or_default();
        writeln!(out, "{}. [{}](#user-{})", n + 1, preview(first_line, TOC_PREVIEW_CHARS), n + 1)?;
    }
    writeln!(out, "\n---\n")?;

    let mut user_count = 0;
    for turn in turns {
        match turn.role {
            Role::User => {
                user_count += 1;
                writeln!(out, "## <a id=\"user-{0}\"></a>User #{0}\n", user_count)?;
                writeln!(out, "{}\n", turn.text)?;
            }
            Role::Assistant => write_assistant(&mut out, turn)?,
        }
        writeln!(out, "---\n")?;
    }

    Ok(out)
}

fn write_assistant(out: &mut String, turn: &Turn) -> Result<()> {
    // Tool-only turns have no text of their own
    if !turn.text.trim().is_empty() {
        writeln!(out, "**Assistant:**\n")?;
        writeln!(out, "{}\n", turn.text)?;
    }

    for qa in &turn.question_answers {
        write_question_answer(out, qa)?;
        writeln!(out, "\n")?;
    }

    if !turn.annotations.is_empty() {
        for annotation in &turn.annotations {
            write_annotation(out, annotation)?;
        }
        writeln!(out)?;
    }

    Ok(())
}

/// Q&A block as quoted lines, without a trailing newline
fn write_question_answer(out: &mut String, qa: &QuestionAnswer) -> Result<()> {
    for question in &qa.questions {
        writeln!(out, "> **Question:** {}", question.question)?;
        for option in &question.options {
            writeln!(out, "> - **{}** — {}", option.label, option.description)?;
        }
    }
    writeln!(out, ">")?;
    let answer = qa.answer.as_deref().filter(|a| !a.is_empty()).unwrap_or(NO_ANSWER);
    write!(out, "> **Answer:** {}", answer)?;
    Ok(())
}

fn write_annotation(out: &mut String, annotation: &ToolAnnotation) -> Result<()> {
    writeln!(out, "> _{}_", annotation.text)?;
    if let Some(file) = &annotation.written_file {
        write_file_details(out, file)?;
    }
    Ok(())
}

/// Collapsible quoted block holding a written file's content
fn write_file_details(out: &mut String, file: &WrittenFile) -> Result<()> {
    writeln!(out, "> <details><summary>File content ({} lines)</summary>\n>", file.line_count)?;
    writeln!(out, "> ```{}", language_hint(&file.file_path))?;
    for line in file.content.lines() {
        writeln!(out, "> {}", line)?;
    }
    writeln!(out, "> ```\n> </details>")?;
    Ok(())
}
