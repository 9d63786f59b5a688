//! Review and records command handlers.

use anyhow::{Context, Result};
use std::path::Path;

use super::open_store;
use super::resolve::resolve_one;
use crate::cli::output::{OutputFormat, print_json};
use crate::cli::{RecordsArgs, ReviewArgs};
use crate::domain::NewRecord;
use crate::store::NoteRepository;

pub fn handle_review(args: &ReviewArgs, db_path: &Path) -> Result<()> {
    let mut store = open_store(db_path)?;
    let note = resolve_one(&store, &args.note)?;

    let record = NewRecord {
        note_id: note.id().clone(),
        correct: args.pass,
    };
    let added = store
        .add_records(vec![record])
        .context("failed to record review")?;

    match args.format {
        OutputFormat::Human => {
            let outcome = if args.pass { "pass" } else { "fail" };
            println!("Recorded {}: {} [{}]", outcome, note.english(), note.id().short());
        }
        OutputFormat::Json => print_json(&added)?,
    }
    Ok(())
}

pub fn handle_records(args: &RecordsArgs, db_path: &Path) -> Result<()> {
    let store = open_store(db_path)?;

    let records = match &args.note {
        Some(identifier) => {
            let note = resolve_one(&store, identifier)?;
            store.records_for_note(note.id())
        }
        None => store.read_records(),
    }
    .context("failed to read records")?;

    match args.format {
        OutputFormat::Human => {
            if records.is_empty() {
                println!("No records found.");
            } else {
                println!("{:>6}  {:<10}  {:<6}  {}", "ID", "Note", "Result", "When");
                for record in &records {
                    println!(
                        "{:>6}  {:<10}  {:<6}  {}",
                        record.id().get(),
                        record.note_id().short(),
                        if record.correct() { "pass" } else { "fail" },
                        record.created().format("%Y-%m-%d %H:%M")
                    );
                }
                println!();
                println!("{} record(s)", records.len());
            }
        }
        OutputFormat::Json => print_json(&records)?,
    }
    Ok(())
}
