use std::env;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Environment variable that relocates the Claude directory
pub const CLAUDE_CONFIG_DIR_VAR: &str = "CLAUDE_CONFIG_DIR";

/// Locations the tool reads from, resolved once per run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Used to shorten paths in annotations; `None` disables shortening
    pub home_dir: Option<PathBuf>,
    pub claude_dir: PathBuf,
}

impl Environment {
    /// Resolve from `$CLAUDE_CONFIG_DIR`, falling back to `~/.claude`
    pub fn from_env() -> Result<Self> {
        let home_dir = dirs::home_dir();
        let claude_dir = resolve_claude_dir(env::var_os(CLAUDE_CONFIG_DIR_VAR).map(PathBuf::from), home_dir.as_deref())?;
        Ok(Self { home_dir, claude_dir })
    }

    /// Directory holding one sub-directory of session logs per project
    pub fn projects_dir(&self) -> PathBuf {
        self.claude_dir.join("projects")
    }

    pub fn home(&self) -> Option<&Path> {
        self.home_dir.as_deref()
    }
}

fn resolve_claude_dir(override_dir: Option<PathBuf>, home: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir.filter(|d| !d.as_os_str().is_empty()) {
        return Ok(dir);
    }
    let home = home.context("Home directory could not be determined")?;
    Ok(home.join(".claude"))
}
