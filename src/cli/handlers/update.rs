//! Update command handler.

use anyhow::{Context, Result, anyhow};
use std::path::Path;

use super::resolve::resolve_one;
use super::{open_store, read_json_input};
use crate::cli::UpdateArgs;
use crate::cli::output::{OutputFormat, print_json};
use crate::domain::{Note, NoteFields, NoteUpdate, TagDraft};
use crate::store::NoteRepository;

/// Builds the full replacement for `current` from the command line.
///
/// With `--keep-tags` the current tags are carried over first. `--tag-id`
/// entries follow, then every `--tag` as a new tag.
pub(crate) fn update_from_args(args: &UpdateArgs, current: &Note) -> NoteUpdate {
    let fields = NoteFields {
        english: args.english.clone(),
        japanese: args.japanese.clone(),
        description: args.desc.clone(),
        examples: args.examples.clone(),
        similar: args.similar.clone(),
    };

    let mut update = if args.keep_tags {
        current.to_update(fields)
    } else {
        NoteUpdate::new(current.id().clone(), fields)
    };

    for draft in &args.tag_ids {
        update = update.tag(draft.clone());
    }
    for name in &args.tags {
        update = update.tag(TagDraft::new(name.clone()));
    }

    update
}

pub fn handle_update(args: &UpdateArgs, db_path: &Path) -> Result<()> {
    let mut store = open_store(db_path)?;

    let updates = match (&args.from, &args.note) {
        (Some(path), _) => read_json_input::<NoteUpdate>(path)?,
        (None, Some(identifier)) => {
            let current = resolve_one(&store, identifier)?;
            vec![update_from_args(args, &current)]
        }
        (None, None) => return Err(anyhow!("a note or --from is required")),
    };

    let updated = store
        .update_notes(updates)
        .context("failed to update notes")?;

    match args.format {
        OutputFormat::Human => {
            for note in &updated {
                println!("Updated: {} [{}]", note.english(), note.id().short());
            }
        }
        OutputFormat::Json => print_json(&updated)?,
    }

    Ok(())
}
