//! Command handlers for the CLI.

mod add;
mod delete;
mod list;
mod resolve;
mod review;
mod show;
mod tags;
mod update;

#[cfg(test)]
pub(crate) mod tests;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::path::Path;

use crate::store::SqliteStore;

// Re-export public items
pub use add::handle_add;
pub use delete::handle_rm;
pub use list::handle_list;
pub use resolve::{ResolveResult, resolve_note};
pub use review::{handle_records, handle_review};
pub use show::handle_show;
pub use tags::handle_tags;
pub use update::handle_update;

// Re-export for tests
#[cfg(test)]
pub(crate) use add::new_note_from_args;
#[cfg(test)]
pub(crate) use list::build_query;
#[cfg(test)]
pub(crate) use update::update_from_args;

// ===========================================
// Shared Utilities
// ===========================================

/// Opens the store at `db_path`, creating it on first use.
pub(crate) fn open_store(db_path: &Path) -> Result<SqliteStore> {
    SqliteStore::open(db_path)
        .with_context(|| format!("failed to open database at {}", db_path.display()))
}

/// Reads a JSON array from a file, or from stdin when the path is `-`.
pub(crate) fn read_json_input<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let contents = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };
    parse_json_input(&contents).with_context(|| format!("invalid JSON in {}", path.display()))
}

pub(crate) fn parse_json_input<T: DeserializeOwned>(contents: &str) -> Result<Vec<T>> {
    Ok(serde_json::from_str(contents)?)
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    let s = s.lines().next().unwrap_or("");
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
