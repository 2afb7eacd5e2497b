use std::env;
use std::path::{Component, Path, PathBuf};

/// Shortens a path for display by replacing a leading home directory with `~`
///
/// Works on the raw string so that paths recorded on another machine are left
/// untouched when they don't share the prefix.
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use find_conversations::shorten_path;
///
/// let home = Path::new("/Users/alice");
/// assert_eq!(shorten_path("/Users/alice/src/app.rs", Some(home)), "~/src/app.rs");
/// assert_eq!(shorten_path("/opt/app.rs", Some(home)), "/opt/app.rs");
/// ```
pub fn shorten_path(path: &str, home: Option<&Path>) -> String {
    if path.is_empty() {
        return String::new();
    }

    let home = home.map(|h| h.to_string_lossy());
    if let Some(home) = home.as_deref()
        && !home.is_empty()
        && let Some(rest) = path.strip_prefix(home)
    {
        return format!("~{}", rest);
    }

    path.to_string()
}

/// Formats a path with ~ substitution for the current user's home directory
pub fn format_path_with_tilde(path: &Path) -> String {
    let home = dirs::home_dir();
    shorten_path(&path.to_string_lossy(), home.as_deref())
}

/// Normalizes a user-supplied path to an absolute path
///
/// Expands a leading `~`, resolves relative paths against the current
/// directory, and resolves symlinks when the path exists. Paths that don't
/// exist are cleaned lexically (`.` and `..` components) instead.
pub fn normalize_path(path: &str) -> PathBuf {
    let expanded = expand_tilde(path, dirs::home_dir().as_deref());

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        match env::current_dir() {
            Ok(cwd) => cwd.join(expanded),
            Err(_) => expanded,
        }
    };

    absolute.canonicalize().unwrap_or_else(|_| clean_lexically(&absolute))
}

fn expand_tilde(path: &str, home: Option<&Path>) -> PathBuf {
    match (path.strip_prefix('~'), home) {
        (Some(""), Some(home)) => home.to_path_buf(),
        (Some(rest), Some(home)) if rest.starts_with('/') => home.join(&rest[1..]),
        _ => PathBuf::from(path),
    }
}

fn clean_lexically(path: &Path) -> PathBuf {
    let mut cleaned = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                cleaned.pop();
            }
            other => cleaned.push(other.as_os_str()),
        }
    }
    cleaned
}
