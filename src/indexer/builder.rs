//! Loading of every session log into conversation summaries.
//!
//! # Error Handling Strategy
//!
//! Loading degrades gracefully, as a CLI over a directory of user data should:
//!
//! - **Directory-level errors**: An unreadable projects directory is an error.
//!   A missing one is not; it yields no conversations.
//! - **File-level errors**: A log that cannot be opened or read is logged with
//!   `tracing::warn!` and skipped.
//! - **Line-level errors**: Handled by the parser, which skips malformed records.
//! - **Empty logs**: Logs that reconstruct to zero turns are left out silently.

use std::path::Path;

use anyhow::Result;
use rayon::prelude::*;

use crate::filters::filter_by_project;
use crate::indexer::discovery::discover_session_logs;
use crate::models::Conversation;
use crate::parsers::load_conversation;
use crate::utils::Environment;

/// Load and reconstruct every session log under `projects_dir`
///
/// Logs are reconstructed in parallel. The result is filtered by `project` when
/// given and sorted by last activity, newest first. Conversations without a
/// timestamp sort last; ties keep path order.
pub fn load_all_conversations(
    projects_dir: &Path,
    home: Option<&Path>,
    project: Option<&Path>,
) -> Result<Vec<Conversation>> {
    let logs = discover_session_logs(projects_dir)?;

    let conversations: Vec<Conversation> = logs
        .par_iter()
        .filter_map(|path| match load_conversation(path, home) {
            Ok(conversation) => conversation,
            Err(e) => {
                tracing::warn!("Skipping session log {}: {:#}", path.display(), e);
                None
            }
        })
        .collect();

    tracing::debug!(logs = logs.len(), conversations = conversations.len(), "loaded session logs");

    let mut conversations = filter_by_project(conversations, project);
    conversations.sort_by(|a, b| b.last_timestamp.cmp(&a.last_timestamp));
    Ok(conversations)
}

/// [`load_all_conversations`] for the resolved environment
pub fn load_from_environment(env: &Environment, project: Option<&Path>) -> Result<Vec<Conversation>> {
    load_all_conversations(&env.projects_dir(), env.home(), project)
}
