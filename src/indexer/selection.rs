use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::indexer::discovery::{discover_session_logs, session_stem};

/// Outcome of resolving a session id (or id prefix) to a log file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Found(PathBuf),
    /// Several logs share the prefix; sorted by path
    Ambiguous(Vec<PathBuf>),
    NotFound,
}

/// Resolve `target` against the session logs under `projects_dir`
///
/// A log whose stem equals `target` wins outright. Otherwise `target` is
/// treated as a prefix and must match exactly one log.
pub fn select_conversation(projects_dir: &Path, target: &str) -> Result<Selection> {
    Ok(select_from(discover_session_logs(projects_dir)?, target))
}

fn select_from(logs: Vec<PathBuf>, target: &str) -> Selection {
    if target.is_empty() {
        return Selection::NotFound;
    }

    let mut matches: Vec<PathBuf> = logs
        .into_iter()
        .filter(|path| session_stem(path).is_some_and(|stem| stem.starts_with(target)))
        .collect();

    if let Some(exact) = matches.iter().position(|path| session_stem(path) == Some(target)) {
        return Selection::Found(matches.swap_remove(exact));
    }

    match matches.len() {
        0 => Selection::NotFound,
        1 => Selection::Found(matches.remove(0)),
        _ => Selection::Ambiguous(matches),
    }
}
