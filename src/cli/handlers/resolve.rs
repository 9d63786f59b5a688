//! Note resolution utilities.

use anyhow::{Context, Result, bail};

use crate::domain::{Note, NoteId};
use crate::store::{NoteRepository, StoreError};

/// Result of resolving a note identifier.
#[derive(Debug)]
pub enum ResolveResult {
    /// Exactly one note matched.
    Unique(Note),
    /// Multiple notes matched (ambiguous).
    Ambiguous(Vec<Note>),
    /// No notes matched.
    NotFound,
}

/// Prints the candidates of an ambiguous identifier to help pick one.
pub(crate) fn print_ambiguous_notes(identifier: &str, notes: &[Note]) {
    eprintln!("Ambiguous: '{}' matches {} notes:", identifier, notes.len());
    for note in notes {
        eprintln!("  {} - {} / {}", note.id(), note.english(), note.japanese());
        if !note.tags().is_empty() {
            eprintln!("      tags: {}", note.tag_names().join(", "));
        }
    }
    eprintln!();
    eprintln!("Use a longer ID prefix to specify which note you mean.");
}

/// Resolves a full note ID or an ID prefix.
///
/// A complete ULID is looked up directly; anything shorter of at least four
/// alphanumeric characters is matched as a prefix.
pub fn resolve_note<R: NoteRepository>(repo: &R, identifier: &str) -> Result<ResolveResult> {
    let identifier = identifier.trim();

    if let Ok(id) = identifier.parse::<NoteId>() {
        return match repo.read_note(&id) {
            Ok(note) => Ok(ResolveResult::Unique(note)),
            Err(StoreError::NoteNotFound { .. }) => Ok(ResolveResult::NotFound),
            Err(e) => Err(e).context("failed to look up note"),
        };
    }

    let looks_like_id =
        identifier.len() >= 4 && identifier.chars().all(|c| c.is_ascii_alphanumeric());
    if !looks_like_id {
        return Ok(ResolveResult::NotFound);
    }

    let mut matches = repo
        .find_by_id_prefix(identifier)
        .context("failed to search by ID prefix")?;

    match matches.len() {
        0 => Ok(ResolveResult::NotFound),
        1 => Ok(matches
            .pop()
            .map_or(ResolveResult::NotFound, ResolveResult::Unique)),
        _ => Ok(ResolveResult::Ambiguous(matches)),
    }
}

/// Resolves an identifier to exactly one note, failing otherwise.
pub(crate) fn resolve_one<R: NoteRepository>(repo: &R, identifier: &str) -> Result<Note> {
    match resolve_note(repo, identifier)? {
        ResolveResult::Unique(note) => Ok(note),
        ResolveResult::Ambiguous(notes) => {
            print_ambiguous_notes(identifier, &notes);
            bail!("ambiguous note identifier");
        }
        ResolveResult::NotFound => bail!("note not found: '{}'", identifier),
    }
}
