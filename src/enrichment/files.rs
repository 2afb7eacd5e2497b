use serde_json::Value;

use crate::enrichment::annotations::str_field;
use crate::models::WrittenFile;

/// Largest file (in lines) whose written content is rendered inline
pub const MAX_INLINE_LINES: usize = 200;

/// Capture the content of a `Write` invocation if it is small enough to inline
pub fn capture_written_file(input: &Value) -> Option<WrittenFile> {
    let content = str_field(input, "content");
    if content.is_empty() {
        return None;
    }

    let line_count = content.matches('\n').count() + 1;
    if line_count > MAX_INLINE_LINES {
        return None;
    }

    Some(WrittenFile {
        file_path: str_field(input, "file_path").to_string(),
        content: content.to_string(),
        line_count,
    })
}

/// Fence language hint for a file, taken from its extension
pub fn language_hint(file_path: &str) -> &str {
    let name = file_path.rsplit(['/', '\\']).next().unwrap_or(file_path);
    match name.rfind('.') {
        // A leading dot is a hidden file, not an extension
        Some(idx) if idx > 0 => &name[idx + 1..],
        _ => "",
    }
}
