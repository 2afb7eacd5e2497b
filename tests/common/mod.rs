//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Value, json};
use tempfile::TempDir;

/// Builder for a fake home directory holding `.claude/projects/<project>/<session>.jsonl`
pub struct ClaudeDirBuilder {
    temp_dir: TempDir,
}

impl ClaudeDirBuilder {
    /// Create a new builder with an empty `.claude` directory
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir(temp_dir.path().join(".claude")).expect("Failed to create .claude dir");
        Self { temp_dir }
    }

    /// Get the path to the fake home directory
    pub fn home(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Add a project directory with the given name and session logs
    pub fn with_project(self, dir_name: &str, sessions: &[SessionFileBuilder]) -> Self {
        let project_dir = projects_dir(self.temp_dir.path()).join(dir_name);
        fs::create_dir_all(&project_dir).expect("Failed to create project dir");

        for session in sessions {
            session.create_in(&project_dir);
        }

        self
    }

    /// Build and return the temp home directory (consumes self)
    pub fn build(self) -> TempDir {
        self.temp_dir
    }
}

impl Default for ClaudeDirBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn claude_dir(home: &Path) -> PathBuf {
    home.join(".claude")
}

pub fn projects_dir(home: &Path) -> PathBuf {
    claude_dir(home).join("projects")
}

/// Builder for one session log file
pub struct SessionFileBuilder {
    stem: String,
    lines: Vec<String>,
}

impl SessionFileBuilder {
    /// Create a session log named `<stem>.jsonl`
    pub fn new(stem: &str) -> Self {
        Self { stem: stem.to_string(), lines: Vec::new() }
    }

    /// Append a record
    pub fn with_record(mut self, record: RecordBuilder) -> Self {
        self.lines.push(record.to_json());
        self
    }

    /// Append a raw line, e.g. a corrupted record
    pub fn with_raw_line(mut self, line: &str) -> Self {
        self.lines.push(line.to_string());
        self
    }

    pub fn file_name(&self) -> String {
        format!("{}.jsonl", self.stem)
    }

    /// Create the file in the given directory
    pub fn create_in(&self, dir: &Path) -> PathBuf {
        let path = dir.join(self.file_name());
        let mut content = self.lines.join("\n");
        content.push('\n');
        fs::write(&path, content).expect("Failed to write session log");
        path
    }
}

/// Builder for one log record
pub struct RecordBuilder {
    value: Value,
}

impl RecordBuilder {
    fn message(role: &str, content: Value) -> Self {
        Self {
            value: json!({
                "type": role,
                "message": {"role": role, "content": content},
            }),
        }
    }

    /// User record with plain string content
    pub fn user(text: &str) -> Self {
        Self::message("user", json!(text))
    }

    /// User record with content blocks
    pub fn user_blocks(blocks: Vec<Value>) -> Self {
        Self::message("user", Value::Array(blocks))
    }

    /// Assistant record with a single text block
    pub fn assistant(text: &str) -> Self {
        Self::message("assistant", json!([text_block(text)]))
    }

    /// Assistant record with content blocks
    pub fn assistant_blocks(blocks: Vec<Value>) -> Self {
        Self::message("assistant", Value::Array(blocks))
    }

    fn set(mut self, key: &str, value: Value) -> Self {
        self.value[key] = value;
        self
    }

    pub fn uuid(self, uuid: &str) -> Self {
        self.set("uuid", json!(uuid))
    }

    pub fn parent(self, parent_uuid: &str) -> Self {
        self.set("parentUuid", json!(parent_uuid))
    }

    pub fn request_id(self, request_id: &str) -> Self {
        self.set("requestId", json!(request_id))
    }

    pub fn timestamp(self, timestamp: &str) -> Self {
        self.set("timestamp", json!(timestamp))
    }

    pub fn session_id(self, session_id: &str) -> Self {
        self.set("sessionId", json!(session_id))
    }

    pub fn cwd(self, cwd: &str) -> Self {
        self.set("cwd", json!(cwd))
    }

    pub fn meta(self) -> Self {
        self.set("isMeta", json!(true))
    }

    /// Convert to a JSON line
    pub fn to_json(&self) -> String {
        self.value.to_string()
    }
}

pub fn text_block(text: &str) -> Value {
    json!({"type": "text", "text": text})
}

pub fn tool_use_block(id: &str, name: &str, input: Value) -> Value {
    json!({"type": "tool_use", "id": id, "name": name, "input": input})
}

pub fn tool_result_block(tool_use_id: &str, content: Value) -> Value {
    json!({"type": "tool_result", "tool_use_id": tool_use_id, "content": content})
}

/// A session where the assistant's first reply was retried; only the retry survives
pub fn retried_session(stem: &str, cwd: &str) -> SessionFileBuilder {
    SessionFileBuilder::new(stem)
        .with_record(
            RecordBuilder::user("fix the flaky login test")
                .uuid("u1")
                .session_id(stem)
                .cwd(cwd)
                .timestamp("2025-04-02T09:00:00Z"),
        )
        .with_record(
            RecordBuilder::assistant("abandoned attempt")
                .uuid("a1")
                .parent("u1")
                .request_id("req_1")
                .session_id(stem)
                .cwd(cwd)
                .timestamp("2025-04-02T09:00:05Z"),
        )
        .with_record(
            RecordBuilder::assistant("The race is in the session fixture; it now awaits the login.")
                .uuid("a2")
                .parent("u1")
                .request_id("req_2")
                .session_id(stem)
                .cwd(cwd)
                .timestamp("2025-04-02T09:01:00Z"),
        )
}

/// Helper to create a home directory with two projects and three sessions
pub fn realistic_claude_dir() -> TempDir {
    ClaudeDirBuilder::new()
        .with_project(
            "-nonexistent-root-shop",
            &[
                retried_session("3f2a0000-aaaa-bbbb-cccc-000000000001", "/nonexistent-root/shop"),
                SessionFileBuilder::new("3f99ffff-aaaa-bbbb-cccc-000000000002").with_record(
                    RecordBuilder::user("add a Redis cache to the cart service")
                        .uuid("x1")
                        .cwd("/nonexistent-root/shop")
                        .timestamp("2025-04-01T08:00:00Z"),
                ),
            ],
        )
        .with_project(
            "-nonexistent-root-blog",
            &[SessionFileBuilder::new("9bc00000-aaaa-bbbb-cccc-000000000003")
                .with_record(
                    RecordBuilder::user("write a post about redis eviction")
                        .uuid("y1")
                        .cwd("/nonexistent-root/blog")
                        .timestamp("2025-03-15T10:00:00Z"),
                )
                .with_record(
                    RecordBuilder::assistant("Drafted the post.")
                        .uuid("y2")
                        .parent("y1")
                        .request_id("req_y")
                        .cwd("/nonexistent-root/blog")
                        .timestamp("2025-03-15T10:02:00Z"),
                )],
        )
        .build()
}
