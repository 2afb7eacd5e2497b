use std::path::Path;

use crate::models::Conversation;
use crate::utils::normalize_path;

/// Keep conversations recorded in `project`, plus those with no recorded project
///
/// `project` must already be normalized; the conversation's own `cwd` is
/// normalized here before comparison.
pub fn matches_project(conversation: &Conversation, project: Option<&Path>) -> bool {
    let (Some(filter), Some(recorded)) = (project, conversation.project.as_deref()) else {
        return true;
    };
    normalize_path(recorded) == filter
}

/// Apply [`matches_project`] to a whole list
pub fn filter_by_project(conversations: Vec<Conversation>, project: Option<&Path>) -> Vec<Conversation> {
    if project.is_none() {
        return conversations;
    }
    conversations.into_iter().filter(|c| matches_project(c, project)).collect()
}
