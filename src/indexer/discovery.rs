use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use walkdir::WalkDir;

/// Sub-agent transcripts share the directory but are not user sessions
pub const AGENT_LOG_PREFIX: &str = "agent-";

const LOG_EXTENSION: &str = "jsonl";

/// Find every session log under `projects_dir`
///
/// Logs live exactly one level below the project directories
/// (`projects/<project>/<session>.jsonl`). Sub-agent logs are skipped. The
/// result is sorted by path; a missing directory yields an empty list.
pub fn discover_session_logs(projects_dir: &Path) -> Result<Vec<PathBuf>> {
    if !projects_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut logs = Vec::new();
    for entry in WalkDir::new(projects_dir).min_depth(2).max_depth(2) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() > 0 => {
                tracing::warn!("Skipping unreadable entry under {}: {}", projects_dir.display(), e);
                continue;
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read projects directory: {}", projects_dir.display()));
            }
        };

        if entry.file_type().is_file() && is_session_log(entry.path()) {
            logs.push(entry.into_path());
        }
    }

    logs.sort();
    Ok(logs)
}

/// Stem of a session log, which doubles as its session id
pub fn session_stem(path: &Path) -> Option<&str> {
    path.file_stem().and_then(|stem| stem.to_str())
}

fn is_session_log(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == LOG_EXTENSION)
        && session_stem(path).is_some_and(|stem| !stem.starts_with(AGENT_LOG_PREFIX))
}
