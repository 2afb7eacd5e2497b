use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::models::{Conversation, RawRecord};
use crate::reconstruction::reconstruct;

/// Title used when a conversation has no user turn to take it from
pub const UNKNOWN_TITLE: &str = "Unknown";

const MAX_TITLE_CHARS: usize = 100;

/// Records of one session log plus the metadata collected while reading it
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    pub records: Vec<RawRecord>,
    /// Last non-empty `sessionId` in file order
    pub session_id: Option<String>,
    /// Last `cwd` in file order
    pub project: Option<String>,
    /// Last `timestamp` in file order (not necessarily the maximum)
    pub last_timestamp: Option<String>,
    pub skipped_lines: usize,
}

/// Read a session log from any buffered reader
///
/// Lines that are blank are ignored; lines that fail to deserialize are
/// counted and skipped. Only read errors are fatal.
pub fn parse_log<R: BufRead>(reader: R) -> Result<EventLog> {
    let mut log = EventLog::default();

    for line in reader.lines() {
        let line = line.context("Failed to read line from session log")?;

        if line.trim().is_empty() {
            continue;
        }

        let record = match serde_json::from_str::<RawRecord>(&line) {
            Ok(record) => record,
            Err(_) => {
                log.skipped_lines += 1;
                continue;
            }
        };

        if let Some(session_id) = record.session_id.as_deref().filter(|s| !s.is_empty()) {
            log.session_id = Some(session_id.to_string());
        }
        if let Some(cwd) = &record.cwd {
            log.project = Some(cwd.clone());
        }
        if let Some(timestamp) = &record.timestamp {
            log.last_timestamp = Some(timestamp.clone());
        }

        log.records.push(record);
    }

    Ok(log)
}

/// Read a session log file from disk
pub fn read_log_file(path: &Path) -> Result<EventLog> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open session log: {}", path.display()))?;

    let log = parse_log(BufReader::new(file))
        .with_context(|| format!("Failed to read session log: {}", path.display()))?;

    if log.skipped_lines > 0 {
        debug!(
            path = %path.display(),
            records = log.records.len(),
            skipped = log.skipped_lines,
            "skipped malformed records"
        );
    }

    Ok(log)
}

/// Turn a parsed log into a [`Conversation`]
///
/// Returns `None` when the log holds no records or nothing survives
/// reconstruction.
pub fn build_conversation(path: &Path, log: EventLog, home: Option<&Path>) -> Option<Conversation> {
    if log.records.is_empty() {
        return None;
    }

    let turns = reconstruct(&log.records, home);
    if turns.is_empty() {
        return None;
    }

    let title = turns
        .iter()
        .find(|t| t.is_user())
        .map(|t| t.text.split('\n').next().unwrap_or_default().chars().take(MAX_TITLE_CHARS).collect())
        .unwrap_or_else(|| UNKNOWN_TITLE.to_string());

    let session_id = log.session_id.unwrap_or_else(|| {
        path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default()
    });

    Some(Conversation {
        path: path.to_path_buf(),
        session_id,
        project: log.project,
        title,
        last_timestamp: log.last_timestamp,
        turns,
    })
}

/// Load and reconstruct one session log file
///
/// # Errors
///
/// Returns an error only when the file cannot be opened or read. An empty or
/// meaningless log is `Ok(None)`.
pub fn load_conversation(path: &Path, home: Option<&Path>) -> Result<Option<Conversation>> {
    let log = read_log_file(path)?;
    Ok(build_conversation(path, log, home))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    /// Helper to create a temporary test file with given content
    fn create_test_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes()).expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_parse_log_collects_running_metadata() {
        let content = r#"{"type":"user","uuid":"u1","sessionId":"s-1","cwd":"/work/a","timestamp":"2025-01-01T10:00:00Z","message":{"role":"user","content":"hi"}}
{"type":"assistant","uuid":"a1","parentUuid":"u1","sessionId":"","cwd":"/work/b","timestamp":"2025-01-01T09:00:00Z","message":{"role":"assistant","content":[{"type":"text","text":"hello"}]}}
{"type":"summary","summary":"Greeting"}"#;

        let log = parse_log(content.as_bytes()).unwrap();
        assert_eq!(log.records.len(), 3);
        assert_eq!(log.session_id.as_deref(), Some("s-1"));
        assert_eq!(log.project.as_deref(), Some("/work/b"));
        // Last in file order, not the maximum
        assert_eq!(log.last_timestamp.as_deref(), Some("2025-01-01T09:00:00Z"));
    }

    #[test]
    fn test_parse_log_skips_malformed_lines() {
        let content = r#"{"type":"user","message":{"role":"user","content":"one"}}
not json at all
{"uuid": 42}

[1, 2, 3]
{"type":"user","message":{"role":"user","content":"two"}}"#;

        let log = parse_log(content.as_bytes()).unwrap();
        assert_eq!(log.records.len(), 2);
        assert_eq!(log.skipped_lines, 3);
    }

    #[test]
    fn test_load_conversation_builds_summary() {
        let content = r#"{"type":"user","uuid":"u1","sessionId":"abc-123","cwd":"/work/app","timestamp":"2025-01-01T10:00:00Z","message":{"role":"user","content":"Fix the login bug\nit fails on empty passwords"}}
{"type":"assistant","uuid":"a1","parentUuid":"u1","timestamp":"2025-01-01T10:00:05Z","message":{"role":"assistant","content":[{"type":"text","text":"Looking now."}]}}"#;

        let file = create_test_file(content);
        let conv = load_conversation(file.path(), None).unwrap().unwrap();

        assert_eq!(conv.session_id, "abc-123");
        assert_eq!(conv.project.as_deref(), Some("/work/app"));
        assert_eq!(conv.title, "Fix the login bug");
        assert_eq!(conv.last_timestamp.as_deref(), Some("2025-01-01T10:00:05Z"));
        assert_eq!(conv.message_count(), 2);
        assert_eq!(conv.user_message_count(), 1);
    }

    #[test]
    fn test_session_id_falls_back_to_file_stem() {
        let content = r#"{"type":"user","message":{"role":"user","content":"hello"}}"#;
        let file = create_test_file(content);
        let conv = load_conversation(file.path(), None).unwrap().unwrap();

        let stem = file.path().file_stem().unwrap().to_string_lossy().into_owned();
        assert_eq!(conv.session_id, stem);
    }

    #[test]
    fn test_title_is_truncated_to_100_chars() {
        let long = "x".repeat(150);
        let content = format!(r#"{{"type":"user","message":{{"role":"user","content":"{}"}}}}"#, long);
        let file = create_test_file(&content);
        let conv = load_conversation(file.path(), None).unwrap().unwrap();
        assert_eq!(conv.title.chars().count(), 100);
    }

    #[test]
    fn test_title_unknown_without_user_turn() {
        let content = r#"{"type":"assistant","message":{"role":"assistant","content":"Unprompted reply"}}"#;
        let file = create_test_file(content);
        let conv = load_conversation(file.path(), None).unwrap().unwrap();
        assert_eq!(conv.title, UNKNOWN_TITLE);
    }

    #[test]
    fn test_empty_file_is_no_conversation() {
        let file = create_test_file("");
        assert!(load_conversation(file.path(), None).unwrap().is_none());
    }

    #[test]
    fn test_only_meta_records_is_no_conversation() {
        let content = r#"{"type":"user","isMeta":true,"message":{"role":"user","content":"<command-name>/clear</command-name>"}}
{"type":"user","message":{"role":"user","content":"<local-command-stdout></local-command-stdout>"}}
{"type":"summary","summary":"nothing"}"#;
        let file = create_test_file(content);
        assert!(load_conversation(file.path(), None).unwrap().is_none());
    }

    #[test]
    fn test_nonexistent_file_is_error() {
        let result = load_conversation(Path::new("/nonexistent/session.jsonl"), None);
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Failed to open"));
    }
}
