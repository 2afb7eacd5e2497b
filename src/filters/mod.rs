//! Conversation and message filters
//!
//! - [`significance`] - Drops system-generated noise from turns and search
//! - [`project`] - Restricts conversations to one project directory

pub mod project;
pub mod significance;

pub use project::{filter_by_project, matches_project};
pub use significance::is_significant;
