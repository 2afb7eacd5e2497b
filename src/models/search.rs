use serde::{Deserialize, Serialize};

use crate::models::{Conversation, Role};

/// One turn whose text contains the searched keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnMatch {
    /// 1-based position of the turn in the conversation
    pub turn_number: usize,
    pub role: Role,
    pub snippet: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub conversation: Conversation,
    pub matches: Vec<TurnMatch>,
}
