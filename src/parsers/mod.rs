//! JSONL parsing for Claude Code session logs
//!
//! # Error Handling Strategy
//!
//! Session logs are append-only and their schema drifts between releases:
//!
//! - **Individual line failures**: Lines that are not valid JSON, or that do not
//!   fit the record shape, are skipped silently. The total skipped count is
//!   emitted once at `debug` level.
//!
//! - **Unknown content**: Unknown content part types and malformed parts degrade
//!   to an opaque part rather than rejecting the record.
//!
//! - **Empty results**: A log with no usable turns is `Ok(None)`, not an error.
//!
//! - **Error propagation**: Only I/O failures (open/read) are returned as
//!   `anyhow` errors, with context naming the file.

pub mod conversation;
pub mod deserializers;

pub use conversation::{EventLog, load_conversation, parse_log, read_log_file};
