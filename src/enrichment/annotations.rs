use std::path::Path;

use serde_json::Value;
use url::Url;

use crate::utils::shorten_path;

const MAX_COMMAND_CHARS: usize = 60;

/// Tools Claude Code invokes that get a dedicated annotation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolKind {
    Read,
    Write,
    Edit,
    WebSearch,
    WebFetch,
    Task,
    Bash,
    Glob,
    Grep,
    EnterPlanMode,
    ExitPlanMode,
    AskUserQuestion,
    Other(String),
}

impl ToolKind {
    pub fn from_name(name: &str) -> Self {
        match name {
            "Read" => ToolKind::Read,
            "Write" => ToolKind::Write,
            "Edit" => ToolKind::Edit,
            "WebSearch" => ToolKind::WebSearch,
            "WebFetch" => ToolKind::WebFetch,
            "Task" => ToolKind::Task,
            "Bash" => ToolKind::Bash,
            "Glob" => ToolKind::Glob,
            "Grep" => ToolKind::Grep,
            "EnterPlanMode" => ToolKind::EnterPlanMode,
            "ExitPlanMode" => ToolKind::ExitPlanMode,
            "AskUserQuestion" => ToolKind::AskUserQuestion,
            other => ToolKind::Other(other.to_string()),
        }
    }

    /// One-line description of an invocation of this tool
    ///
    /// Returns `None` for interactive questions, which are rendered as Q&A
    /// blocks instead.
    pub fn annotate(&self, input: &Value, home: Option<&Path>) -> Option<String> {
        let annotation = match self {
            ToolKind::Read => format!("Read: {}", short_file_path(input, home)),
            ToolKind::Write => format!("Wrote: {}", short_file_path(input, home)),
            ToolKind::Edit => format!("Edited: {}", short_file_path(input, home)),
            ToolKind::WebSearch => format!("Searched web: \"{}\"", str_field(input, "query")),
            ToolKind::WebFetch => format!("Fetched: {}", host_and_path(str_field(input, "url"))),
            ToolKind::Task => format!("Launched agent: {}", str_field(input, "description")),
            ToolKind::Bash => format!("Ran: `{}`", command_label(input)),
            ToolKind::Glob => format!("Found files: {}", str_field(input, "pattern")),
            ToolKind::Grep => format!("Searched code: \"{}\"", str_field(input, "pattern")),
            ToolKind::EnterPlanMode => "Entered plan mode".to_string(),
            ToolKind::ExitPlanMode => "Exited plan mode".to_string(),
            ToolKind::AskUserQuestion => return None,
            ToolKind::Other(name) => format!("Used tool: {}", name),
        };
        Some(annotation)
    }
}

pub(crate) fn str_field<'a>(input: &'a Value, key: &str) -> &'a str {
    input.get(key).and_then(Value::as_str).unwrap_or_default()
}

fn short_file_path(input: &Value, home: Option<&Path>) -> String {
    shorten_path(str_field(input, "file_path"), home)
}

/// Description when given, otherwise the command cut to 60 characters
fn command_label(input: &Value) -> String {
    let description = str_field(input, "description");
    if !description.is_empty() {
        return description.to_string();
    }

    let command = str_field(input, "command");
    let mut chars = command.chars();
    let head: String = chars.by_ref().take(MAX_COMMAND_CHARS).collect();
    if chars.next().is_some() { format!("{}...", head) } else { head }
}

/// `https://docs.rs/serde/latest?x=1` becomes `docs.rs/serde/latest`
///
/// Strings that don't parse as absolute URLs are shown as written.
fn host_and_path(raw: &str) -> String {
    let Ok(url) = Url::parse(raw) else {
        return raw.to_string();
    };

    let mut reduced = url.host_str().unwrap_or_default().to_string();
    if let Some(port) = url.port() {
        reduced.push_str(&format!(":{}", port));
    }
    // The parser reports "/" for a bare origin; only keep a path that was written
    if !url.cannot_be_a_base() && has_explicit_path(raw) {
        reduced.push_str(url.path());
    }
    reduced
}

fn has_explicit_path(raw: &str) -> bool {
    let after_scheme = raw.split_once("://").map_or(raw, |(_, rest)| rest);
    after_scheme.find(['/', '?', '#']).is_some_and(|i| after_scheme[i..].starts_with('/'))
}
