//! Tags command handler.

use anyhow::{Context, Result};
use std::path::Path;

use super::open_store;
use crate::cli::TagsArgs;
use crate::cli::output::{OutputFormat, print_json};
use crate::store::NoteRepository;

pub fn handle_tags(args: &TagsArgs, db_path: &Path) -> Result<()> {
    let store = open_store(db_path)?;
    let tags = store.all_tags().context("failed to list tags")?;

    match args.format {
        OutputFormat::Human => {
            if tags.is_empty() {
                println!("No tags found.");
            } else {
                for tag in &tags {
                    println!("{} ({})", tag.name(), tag.count());
                }
            }
        }
        OutputFormat::Json => print_json(&tags)?,
    }
    Ok(())
}
