//! Discovery and bulk loading of session logs
//!
//! - [`discovery`] - Walks `<claude dir>/projects` for session logs
//! - [`builder`] - Loads every log in parallel into sorted conversations
//! - [`selection`] - Resolves a session id or id prefix to one log

pub mod builder;
pub mod discovery;
pub mod selection;

pub use builder::{load_all_conversations, load_from_environment};
pub use discovery::discover_session_logs;
pub use selection::{Selection, select_conversation};
