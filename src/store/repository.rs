//! NoteRepository trait and result types.

use crate::domain::{
    Criteria, NewNote, NewRecord, Note, NoteId, NoteStats, NoteUpdate, Page, PageRequest, Record,
};
use std::path::PathBuf;
use thiserror::Error;

// ===========================================
// StoreError Type
// ===========================================

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested note does not exist or was deleted.
    #[error("note not found: {id}")]
    NoteNotFound { id: String },

    /// A database error occurred.
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored value could not be decoded.
    #[error("invalid stored data: {0}")]
    InvalidData(String),

    /// A batch operation was called with nothing to do.
    #[error("no {0} given")]
    EmptyInput(&'static str),

    /// An I/O error occurred.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// ===========================================
// TagWithCount Type
// ===========================================

/// A tag name with the number of live notes carrying it.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct TagWithCount {
    name: String,
    count: u32,
}

impl TagWithCount {
    pub fn new(name: impl Into<String>, count: u32) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn count(&self) -> u32 {
        self.count
    }
}

// ===========================================
// NoteRepository Trait
// ===========================================

/// Repository for vocabulary notes and their review records.
///
/// Every read goes to the storage engine; implementations keep no cache.
/// Deleted notes and tags are invisible to all reads.
pub trait NoteRepository {
    /// Creates notes together with their tags.
    fn add_notes(&mut self, notes: Vec<NewNote>) -> StoreResult<Vec<Note>>;

    /// Reads one page of notes matching `criteria`, tags included.
    fn read_notes(&self, criteria: &Criteria, page: PageRequest) -> StoreResult<Page<Note>>;

    /// Reads a single note with its tags.
    fn read_note(&self, id: &NoteId) -> StoreResult<Note>;

    /// Replaces every scalar field of each note and reconciles its tags.
    ///
    /// The batch is atomic: an unknown id fails the whole call and nothing is
    /// written.
    fn update_notes(&mut self, updates: Vec<NoteUpdate>) -> StoreResult<Vec<Note>>;

    /// Deletes notes and, explicitly, the tags they own.
    fn delete_notes(&mut self, ids: &[NoteId]) -> StoreResult<()>;

    /// Appends review records. The referenced notes are not checked.
    fn add_records(&mut self, records: Vec<NewRecord>) -> StoreResult<Vec<Record>>;

    /// Reads every review record, oldest first.
    fn read_records(&self) -> StoreResult<Vec<Record>>;

    /// Reads the review records of one note, oldest first.
    fn records_for_note(&self, id: &NoteId) -> StoreResult<Vec<Record>>;

    /// Summarises the review history of one note.
    fn note_stats(&self, id: &NoteId) -> StoreResult<NoteStats>;

    /// Returns every tag name in use with its note count, ordered by name.
    fn all_tags(&self) -> StoreResult<Vec<TagWithCount>>;

    /// Finds live notes whose id starts with the given prefix.
    ///
    /// Matching is case-insensitive. An empty prefix returns an empty result.
    fn find_by_id_prefix(&self, prefix: &str) -> StoreResult<Vec<Note>>;
}
