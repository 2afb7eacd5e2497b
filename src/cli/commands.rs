use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::clipboard::copy_last_assistant_message;
use crate::indexer::{Selection, load_from_environment, select_conversation};
use crate::models::Conversation;
use crate::parsers::load_conversation;
use crate::render::export_conversation;
use crate::search::search_conversations;
use crate::utils::{Environment, format_listing_date, format_path_with_tilde, normalize_path, preview, strip_ansi_codes};

const SEPARATOR_WIDTH: usize = 100;
const SEARCH_MATCHES_SHOWN: usize = 3;
const COPY_PREVIEW_CHARS: usize = 150;
const UNKNOWN_PROJECT: &str = "Unknown";

#[derive(Parser)]
#[command(name = "find-conversations")]
#[command(version = "0.1.0")]
#[command(about = "Find, search and export Claude Code conversations", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Only consider conversations recorded in this project directory
    #[arg(long, global = true, value_name = "PATH")]
    pub project: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List all conversations, most recent first
    List,
    /// Show the most recent conversations
    Recent {
        #[arg(default_value_t = 10)]
        limit: usize,
    },
    /// Search all conversations for a keyword (case-insensitive)
    Search { keyword: String },
    /// Export a conversation to markdown with a table of contents
    Export {
        /// Session id, or a unique prefix of one
        session_id: String,
        output: Option<PathBuf>,
    },
    /// Copy the last assistant message of the most recent conversation
    CopyLast,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let env = Environment::from_env()?;
    let project = cli.project.as_deref().map(normalize_path);
    let project = project.as_deref();

    match &cli.command {
        Commands::List => list(&env, project),
        Commands::Recent { limit } => recent(&env, project, *limit),
        Commands::Search { keyword } => search(&env, project, keyword),
        Commands::Export { session_id, output } => export(&env, session_id, output.as_deref()),
        Commands::CopyLast => copy_last(&env, project),
    }
}

fn list(env: &Environment, project: Option<&Path>) -> Result<()> {
    match project {
        Some(project) => println!("Scanning conversations for project: {}\n", project.display()),
        None => println!("Scanning conversations in {}...\n", format_path_with_tilde(&env.projects_dir())),
    }

    let conversations = load_from_environment(env, project)?;

    println!("Found {} conversations\n", conversations.len());
    println!("{}", "=".repeat(SEPARATOR_WIDTH));

    for (i, conv) in conversations.iter().enumerate() {
        print_summary(i + 1, conv);
        println!("   Messages: {} user, {} total", conv.user_message_count(), conv.message_count());
        println!("   Session: {}", conv.session_id);
        println!("   Path: {}", conv.path.display());
    }

    Ok(())
}

fn recent(env: &Environment, project: Option<&Path>, limit: usize) -> Result<()> {
    match project {
        Some(project) => {
            println!("Scanning for {} most recent conversations in project: {}\n", limit, project.display())
        }
        None => println!("Scanning for {} most recent conversations...\n", limit),
    }

    let mut conversations = load_from_environment(env, project)?;
    conversations.truncate(limit);

    println!("Showing {} most recent conversations\n", conversations.len());
    println!("{}", "=".repeat(SEPARATOR_WIDTH));

    for (i, conv) in conversations.iter().enumerate() {
        print_summary(i + 1, conv);
        println!("   Messages: {} user, {} total", conv.user_message_count(), conv.message_count());
        println!("   Session: {}", conv.session_id);
        println!("\n   To export: find-conversations export {}", conv.session_id);
    }

    Ok(())
}

fn search(env: &Environment, project: Option<&Path>, keyword: &str) -> Result<()> {
    let shown_keyword = strip_ansi_codes(keyword);
    match project {
        Some(project) => println!("Searching for '{}' in project: {}\n", shown_keyword, project.display()),
        None => println!(
            "Searching for '{}' in {}...\n",
            shown_keyword,
            format_path_with_tilde(&env.projects_dir())
        ),
    }

    let hits = search_conversations(load_from_environment(env, project)?, keyword);

    if hits.is_empty() {
        println!("No conversations found containing '{}'", shown_keyword);
        return Ok(());
    }

    println!("Found {} conversation(s) with matches\n", hits.len());
    println!("{}", "=".repeat(SEPARATOR_WIDTH));

    for (i, hit) in hits.iter().enumerate() {
        print_summary(i + 1, &hit.conversation);
        println!("   Session: {}", hit.conversation.session_id);
        println!("   Matches: {}", hit.matches.len());

        for m in hit.matches.iter().take(SEARCH_MATCHES_SHOWN) {
            println!("   - Msg #{} ({}): {}", m.turn_number, m.role.as_str(), strip_ansi_codes(&m.snippet));
        }

        if hit.matches.len() > SEARCH_MATCHES_SHOWN {
            println!("   ... and {} more matches", hit.matches.len() - SEARCH_MATCHES_SHOWN);
        }
    }

    Ok(())
}

fn export(env: &Environment, session_id: &str, output: Option<&Path>) -> Result<()> {
    let shown_id = strip_ansi_codes(session_id);

    let path = match select_conversation(&env.projects_dir(), session_id)? {
        Selection::Found(path) => path,
        Selection::NotFound => {
            println!("Conversation {} not found", shown_id);
            return Ok(());
        }
        Selection::Ambiguous(candidates) => {
            println!("Ambiguous prefix '{}', matches {} conversations:", shown_id, candidates.len());
            for candidate in &candidates {
                if let Some(stem) = candidate.file_stem() {
                    println!("  {}", stem.to_string_lossy());
                }
            }
            println!("\nUse a longer prefix to narrow it down.");
            return Ok(());
        }
    };

    let Some(conv) = load_conversation(&path, env.home())? else {
        println!("Failed to parse conversation {}", shown_id);
        return Ok(());
    };

    let written = export_conversation(&conv, output)?;

    println!("Exported to: {}", written.display());
    println!("Table of Contents: {} user messages", conv.user_message_count());
    Ok(())
}

fn copy_last(env: &Environment, project: Option<&Path>) -> Result<()> {
    match project {
        Some(project) => println!("Finding most recent conversation in project: {}\n", project.display()),
        None => println!("Finding most recent conversation...\n"),
    }

    let conversations = load_from_environment(env, project)?;
    let Some(conv) = conversations.first() else {
        println!("No conversations found");
        return Ok(());
    };

    let Some(text) = copy_last_assistant_message(conv).context("Failed to copy to clipboard")? else {
        println!("No assistant messages found in the most recent conversation");
        return Ok(());
    };

    println!("✓ Copied last assistant message to clipboard!");
    println!("\nFrom conversation: {}", strip_ansi_codes(&conv.title));
    println!("Project: {}", project_label(conv));
    println!("Date: {}", format_listing_date(conv.last_timestamp.as_deref()));
    println!("\nMessage length: {} characters", text.chars().count());
    println!("Preview: {}", strip_ansi_codes(&preview(text, COPY_PREVIEW_CHARS)));
    Ok(())
}

/// Numbered title line plus project and date, shared by every listing
fn print_summary(index: usize, conv: &Conversation) {
    println!("\n{}. {}", index, strip_ansi_codes(&conv.title));
    println!("   Project: {}", project_label(conv));
    println!("   Date: {}", format_listing_date(conv.last_timestamp.as_deref()));
}

fn project_label(conv: &Conversation) -> String {
    conv.project_name().map(|name| strip_ansi_codes(&name)).unwrap_or_else(|| UNKNOWN_PROJECT.to_string())
}
