use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::Conversation;
use crate::render::markdown::{DocumentHeader, render_document};
use crate::utils::format_file_date;

const TITLE_SLUG_CHARS: usize = 30;

/// File name used when no output path is given:
/// `conversation-<YYYYMMDD>-<title slug>.md`
pub fn default_output_path(conversation: &Conversation) -> Result<PathBuf> {
    let timestamp = conversation.last_timestamp.as_deref().context("Conversation has no timestamp")?;
    let date = format_file_date(timestamp)?;
    let slug: String = conversation
        .title
        .chars()
        .take(TITLE_SLUG_CHARS)
        .map(|c| if c == '/' || c == ' ' { '-' } else { c })
        .collect();
    Ok(PathBuf::from(format!("conversation-{}-{}.md", date, slug)))
}

/// Render `conversation` and write it to `output`, or to the default path
///
/// Returns the path written.
pub fn export_conversation(conversation: &Conversation, output: Option<&Path>) -> Result<PathBuf> {
    let document = render_document(&DocumentHeader::from_conversation(conversation), &conversation.turns)?;

    let path = match output {
        Some(path) => path.to_path_buf(),
        None => default_output_path(conversation)?,
    };

    fs::write(&path, document).with_context(|| format!("Failed to write export: {}", path.display()))?;
    tracing::debug!(path = %path.display(), turns = conversation.turns.len(), "exported conversation");
    Ok(path)
}
