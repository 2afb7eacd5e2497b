//! Data models for Claude Code session logs.
//!
//! - [`RawRecord`] - One deserialized log line, as written by Claude Code
//! - [`Turn`] - A reconstructed user or assistant turn with its enrichments
//! - [`Conversation`] - A whole session log after reconstruction
//! - [`SearchHit`] - Keyword matches within one conversation
//!
//! Raw records use serde with custom deserializers for the loosely typed
//! fields (timestamps, message content) in the `parsers::deserializers` module.

pub mod conversation;
pub mod record;
pub mod search;

pub use conversation::{
    Conversation, Question, QuestionAnswer, QuestionOption, Role, ToolAnnotation, Turn,
    WrittenFile,
};
pub use record::{ContentPart, Message, MessageContent, RawRecord};
pub use search::{SearchHit, TurnMatch};
