//! Show command handler.

use anyhow::{Context, Result};
use std::path::Path;

use super::open_store;
use super::resolve::resolve_one;
use crate::cli::ShowArgs;
use crate::cli::output::{NoteDetail, OutputFormat, StatsListing, print_json};
use crate::store::NoteRepository;

pub fn handle_show(args: &ShowArgs, db_path: &Path) -> Result<()> {
    let store = open_store(db_path)?;
    let note = resolve_one(&store, &args.note)?;
    let stats = store
        .note_stats(note.id())
        .context("failed to load review stats")?;

    match args.format {
        OutputFormat::Human => {
            println!("# {}", note.english());
            println!("{}", note.japanese());
            println!();

            if !note.description().is_empty() {
                println!("{}", note.description());
                println!();
            }
            if !note.examples().is_empty() {
                println!("Examples:");
                for line in note.examples().lines() {
                    println!("  {}", line);
                }
                println!();
            }
            if !note.similar().is_empty() {
                println!("Similar: {}", note.similar());
            }

            println!(
                "ID: {}  Created: {}  Modified: {}",
                note.id(),
                note.created().format("%Y-%m-%d"),
                note.modified().format("%Y-%m-%d")
            );

            if !note.tags().is_empty() {
                let tags: Vec<String> = note
                    .tags()
                    .iter()
                    .map(|t| format!("{}:{}", t.id(), t.name()))
                    .collect();
                println!("Tags: {}", tags.join(", "));
            }

            match stats.rate() {
                Some(rate) => println!(
                    "Reviews: {} ({} correct, {:.0}%)",
                    stats.plays,
                    stats.correct,
                    rate * 100.0
                ),
                None => println!("Reviews: none"),
            }
            if let Some(last) = stats.last_played {
                println!("Last played: {}", last.format("%Y-%m-%d %H:%M"));
            }
        }
        OutputFormat::Json => print_json(NoteDetail {
            note: &note,
            stats: StatsListing::from(stats),
        })?,
    }

    Ok(())
}
