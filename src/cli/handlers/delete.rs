//! Rm command handler.

use anyhow::{Context, Result};
use std::path::Path;

use super::open_store;
use super::resolve::resolve_one;
use crate::cli::RmArgs;
use crate::store::NoteRepository;

pub fn handle_rm(args: &RmArgs, db_path: &Path) -> Result<()> {
    let mut store = open_store(db_path)?;

    // Resolve everything first so a bad identifier deletes nothing
    let notes = args
        .notes
        .iter()
        .map(|identifier| resolve_one(&store, identifier))
        .collect::<Result<Vec<_>>>()?;

    let ids: Vec<_> = notes.iter().map(|n| n.id().clone()).collect();
    store.delete_notes(&ids).context("failed to delete notes")?;

    for note in &notes {
        println!("Deleted: {} [{}]", note.english(), note.id().short());
    }
    Ok(())
}
