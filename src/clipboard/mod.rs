use anyhow::{Context, Result};
use arboard::Clipboard;

use crate::models::Conversation;

/// Maximum clipboard size (10MB); assistant replies are far smaller
const MAX_CLIPBOARD_SIZE: usize = 10 * 1024 * 1024;

/// Trait for clipboard operations (allows mocking in tests)
trait ClipboardProvider {
    fn set_text(&mut self, text: &str) -> Result<()>;
}

/// Real clipboard implementation using arboard
struct SystemClipboard {
    clipboard: Clipboard,
}

impl SystemClipboard {
    fn new() -> Result<Self> {
        let clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        Ok(Self { clipboard })
    }
}

impl ClipboardProvider for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.clipboard.set_text(text).context("Failed to set clipboard contents")?;
        Ok(())
    }
}

/// Validates clipboard text without accessing system clipboard
fn validate_clipboard_text(text: &str) -> Result<()> {
    if text.is_empty() {
        anyhow::bail!("Cannot copy empty text to clipboard");
    }

    if text.len() > MAX_CLIPBOARD_SIZE {
        anyhow::bail!("Text too large for clipboard ({} bytes, max {})", text.len(), MAX_CLIPBOARD_SIZE);
    }

    Ok(())
}

fn copy_with_provider(text: &str, provider: &mut dyn ClipboardProvider) -> Result<()> {
    validate_clipboard_text(text)?;
    provider.set_text(text)?;
    Ok(())
}

/// Text of the conversation's final assistant turn, if it has any
///
/// A final turn that only invoked tools has nothing to copy.
fn last_copyable_text(conversation: &Conversation) -> Option<&str> {
    conversation.last_assistant_text().filter(|text| !text.trim().is_empty())
}

/// Copy text to the system clipboard.
///
/// # Errors
/// Returns error if:
/// - Text is empty
/// - Text is too large for clipboard (>10MB)
/// - System clipboard is unavailable (headless environment)
pub fn copy_to_clipboard(text: &str) -> Result<()> {
    // Validate first, before initializing clipboard (for better error messages in CI)
    validate_clipboard_text(text)?;

    let mut clipboard = SystemClipboard::new()?;
    copy_with_provider(text, &mut clipboard)
}

/// Copy the final assistant reply of `conversation` to the system clipboard
///
/// Returns the copied text, or `None` (without touching the clipboard) when
/// there is no assistant reply to copy.
pub fn copy_last_assistant_message(conversation: &Conversation) -> Result<Option<&str>> {
    let Some(text) = last_copyable_text(conversation) else {
        return Ok(None);
    };
    copy_to_clipboard(text)?;
    Ok(Some(text))
}
