//! Review records: one pass/fail attempt against a note.

use crate::domain::{NoteId, RecordId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An immutable review attempt.
///
/// Correctness is a plain bool here and is stored as `0`/`1`, so the
/// correct-rate of a note is the arithmetic mean of its stored values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    id: RecordId,
    note_id: NoteId,
    correct: bool,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
}

impl Record {
    pub fn new(
        id: RecordId,
        note_id: NoteId,
        correct: bool,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            note_id,
            correct,
            created,
            modified,
        }
    }

    pub fn id(&self) -> RecordId {
        self.id
    }

    /// Returns the id of the reviewed note.
    pub fn note_id(&self) -> &NoteId {
        &self.note_id
    }

    pub fn correct(&self) -> bool {
        self.correct
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }
}

/// A review attempt to be appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
    pub note_id: NoteId,
    pub correct: bool,
}

impl NewRecord {
    pub fn pass(note_id: NoteId) -> Self {
        Self {
            note_id,
            correct: true,
        }
    }

    pub fn fail(note_id: NoteId) -> Self {
        Self {
            note_id,
            correct: false,
        }
    }
}

/// Aggregate review history of a single note.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct NoteStats {
    pub plays: u32,
    pub correct: u32,
    pub last_played: Option<DateTime<Utc>>,
}

impl NoteStats {
    /// Mean correctness, or `None` for a note that was never reviewed.
    pub fn rate(&self) -> Option<f64> {
        if self.plays == 0 {
            None
        } else {
            Some(f64::from(self.correct) / f64::from(self.plays))
        }
    }
}
