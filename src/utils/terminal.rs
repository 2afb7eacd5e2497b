//! Terminal output helpers
//!
//! # Security: Terminal Injection Prevention
//!
//! Titles, snippets and assistant replies come straight from session logs, and
//! a log can contain anything a tool printed, ANSI escape sequences included.
//! Every listing command passes such text through [`strip_ansi_codes`] before
//! printing it. Exported markdown files are written unmodified.

/// Strips ANSI CSI escape sequences and control characters from a string
///
/// Tabs, newlines and carriage returns are kept.
///
/// # Examples
///
/// ```
/// use find_conversations::utils::terminal::strip_ansi_codes;
///
/// let text = "\x1b[31mRed text\x1b[0m";
/// assert_eq!(strip_ansi_codes(text), "Red text");
/// ```
pub fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\x1b' if chars.peek() == Some(&'[') => {
                chars.next();
                // CSI sequences end at the first letter
                for next in chars.by_ref() {
                    if next.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
            '\t' | '\n' | '\r' => result.push(ch),
            c if c.is_control() => {}
            c => result.push(c),
        }
    }

    result
}

/// First `max_chars` characters of `text`, with `...` appended when cut
pub fn preview(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() { format!("{}...", head) } else { head }
}
