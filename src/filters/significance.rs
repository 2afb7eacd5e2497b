//! Significance test for message text.
//!
//! Claude Code echoes slash commands, their output and interruption notices
//! into the log as ordinary user messages. None of that is conversation.

/// Prefixes of system-generated messages
const BOILERPLATE_PREFIXES: &[&str] =
    &["<command-name>", "<local-command-stdout>", "[Request interrupted"];

/// Returns `true` when `text` is something a person actually wrote or read
///
/// Text is insignificant when it is blank after trimming, or starts with a
/// known boilerplate marker.
pub fn is_significant(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && !BOILERPLATE_PREFIXES.iter().any(|prefix| trimmed.starts_with(prefix))
}
