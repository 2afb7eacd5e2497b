//! Case-insensitive keyword search over reconstructed turns

use crate::models::{Conversation, SearchHit, TurnMatch};

/// Characters of context kept on each side of a match
pub const SNIPPET_CONTEXT_CHARS: usize = 50;

/// Search every turn of every conversation for `keyword`
///
/// Each turn contributes at most one match (its first occurrence). Conversations
/// without matches are left out; the rest keep their input order.
pub fn search_conversations(conversations: Vec<Conversation>, keyword: &str) -> Vec<SearchHit> {
    let needle: Vec<char> = keyword.chars().flat_map(char::to_lowercase).collect();
    if needle.is_empty() {
        return Vec::new();
    }

    conversations
        .into_iter()
        .filter_map(|conversation| {
            let matches: Vec<TurnMatch> = conversation
                .turns
                .iter()
                .enumerate()
                .filter_map(|(i, turn)| {
                    snippet_for(&turn.text, &needle).map(|snippet| TurnMatch {
                        turn_number: i + 1,
                        role: turn.role,
                        snippet,
                    })
                })
                .collect();

            (!matches.is_empty()).then_some(SearchHit { conversation, matches })
        })
        .collect()
}

/// `...context + match + context...` around the first occurrence of `needle`
fn snippet_for(text: &str, needle: &[char]) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    let (start, len) = (0..chars.len()).find_map(|i| match_len_at(&chars, i, needle).map(|len| (i, len)))?;

    let from = start.saturating_sub(SNIPPET_CONTEXT_CHARS);
    let to = (start + len + SNIPPET_CONTEXT_CHARS).min(chars.len());
    let context: String = chars[from..to].iter().collect();
    Some(format!("...{}...", context))
}

/// Number of text characters matching the lowercased `needle` at `start`
///
/// Lowercasing may expand one character into several, so the match length in
/// the original text can differ from the needle length.
fn match_len_at(chars: &[char], start: usize, needle: &[char]) -> Option<usize> {
    let mut matched = 0;
    let mut consumed = 0;

    while matched < needle.len() {
        let c = *chars.get(start + consumed)?;
        for lower in c.to_lowercase() {
            if needle.get(matched) != Some(&lower) {
                return None;
            }
            matched += 1;
        }
        consumed += 1;
    }

    Some(consumed)
}
