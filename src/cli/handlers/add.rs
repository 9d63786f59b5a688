//! Add command handler.

use anyhow::{Context, Result};
use std::path::Path;

use super::{open_store, read_json_input};
use crate::cli::AddArgs;
use crate::cli::output::{OutputFormat, print_json};
use crate::domain::{NewNote, NoteFields};
use crate::store::NoteRepository;

/// Builds a single note from the command line fields.
///
/// Tag names arrive trimmed and non-empty from the argument parser and are
/// stored as given, colons included.
pub(crate) fn new_note_from_args(args: &AddArgs) -> NewNote {
    let fields = NoteFields {
        english: args.english.clone().unwrap_or_default(),
        japanese: args.japanese.clone().unwrap_or_default(),
        description: args.desc.clone().unwrap_or_default(),
        examples: args.examples.clone().unwrap_or_default(),
        similar: args.similar.clone().unwrap_or_default(),
    };
    NewNote {
        fields,
        tags: args.tags.clone(),
    }
}

pub fn handle_add(args: &AddArgs, db_path: &Path) -> Result<()> {
    let notes = match &args.from {
        Some(path) => read_json_input::<NewNote>(path)?,
        None => vec![new_note_from_args(args)],
    };

    let mut store = open_store(db_path)?;
    let created = store.add_notes(notes).context("failed to add notes")?;

    match args.format {
        OutputFormat::Human => {
            for note in &created {
                println!("Added: {} / {} [{}]", note.english(), note.japanese(), note.id().short());
            }
        }
        OutputFormat::Json => print_json(&created)?,
    }

    Ok(())
}
