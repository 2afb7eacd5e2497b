//! find-conversations - Find, search and export Claude Code conversations
//!
//! Claude Code records each session as an append-only JSON Lines log under
//! `~/.claude/projects/`. Retries and edits branch the log, so a naive read
//! shows abandoned replies next to the ones the user kept. This library:
//!
//! - Parses session logs, skipping malformed records
//! - Resolves the winning branch of each log and groups it into turns
//! - Describes tool invocations in plain words, pairing questions with answers
//! - Renders a conversation as a markdown document with a table of contents
//!
//! # Example
//!
//! ```no_run
//! use find_conversations::{load_conversation, render_document, DocumentHeader};
//! use std::path::Path;
//!
//! let path = Path::new("/Users/alice/.claude/projects/-Users-alice-app/3f2a.jsonl");
//! if let Some(conv) = load_conversation(path, dirs::home_dir().as_deref())? {
//!     let markdown = render_document(&DocumentHeader::from_conversation(&conv), &conv.turns)?;
//!     println!("{}", markdown);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod cli;
pub mod clipboard;
pub mod enrichment;
pub mod filters;
pub mod indexer;
pub mod models;
pub mod parsers;
pub mod reconstruction;
pub mod render;
pub mod search;
pub mod utils;

// Re-export commonly used types
pub use indexer::{Selection, load_all_conversations, select_conversation};
pub use models::{Conversation, Turn};
pub use parsers::load_conversation;
pub use reconstruction::reconstruct;
pub use render::{DocumentHeader, export_conversation, render_document};
pub use search::search_conversations;
pub use utils::paths::{format_path_with_tilde, shorten_path};
