//! Markdown rendering of reconstructed conversations

pub mod export;
pub mod markdown;

pub use export::{default_output_path, export_conversation};
pub use markdown::{DocumentHeader, render_document};
