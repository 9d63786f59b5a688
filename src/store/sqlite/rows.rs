//! Conversions between SQLite rows and domain types.

use crate::domain::{Note, NoteFields, NoteId, Record, RecordId, Tag, TagId};
use crate::store::{StoreError, StoreResult};
use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use rusqlite::Row;

/// Formats a timestamp for storage.
///
/// Fixed-width RFC 3339 in UTC with microseconds, so text comparison in SQL
/// agrees with chronological order.
pub(crate) fn fmt_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(s: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::InvalidData(format!("invalid timestamp '{}': {}", s, e)))
}

/// The current time at storage precision.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

pub(crate) fn parse_note_id(s: &str) -> StoreResult<NoteId> {
    s.parse()
        .map_err(|e| StoreError::InvalidData(format!("invalid note ID in database: {}", e)))
}

/// Raw note columns as selected by `filter::NOTE_COLUMNS`.
pub(crate) struct NoteRow {
    id: String,
    fields: NoteFields,
    created: String,
    modified: String,
}

impl NoteRow {
    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            fields: NoteFields {
                english: row.get(1)?,
                japanese: row.get(2)?,
                description: row.get(3)?,
                examples: row.get(4)?,
                similar: row.get(5)?,
            },
            created: row.get(6)?,
            modified: row.get(7)?,
        })
    }

    pub(crate) fn id(&self) -> &str {
        &self.id
    }

    /// Decodes the row, attaching the given tags.
    pub(crate) fn into_note(self, tags: Vec<Tag>) -> StoreResult<Note> {
        Ok(Note::new(
            parse_note_id(&self.id)?,
            self.fields,
            parse_timestamp(&self.created)?,
            parse_timestamp(&self.modified)?,
            tags,
        ))
    }
}

/// Raw tag columns: `id, note_id, name, created, modified`.
pub(crate) struct TagRow {
    id: i64,
    note_id: String,
    name: String,
    created: String,
    modified: String,
}

impl TagRow {
    pub(crate) const COLUMNS: &'static str = "id, note_id, name, created, modified";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            note_id: row.get(1)?,
            name: row.get(2)?,
            created: row.get(3)?,
            modified: row.get(4)?,
        })
    }

    pub(crate) fn note_id(&self) -> &str {
        &self.note_id
    }

    pub(crate) fn into_tag(self) -> StoreResult<Tag> {
        Ok(Tag::new(
            TagId::new(self.id),
            parse_note_id(&self.note_id)?,
            self.name,
            parse_timestamp(&self.created)?,
            parse_timestamp(&self.modified)?,
        ))
    }
}

/// Raw record columns: `id, note_id, correct, created, modified`.
pub(crate) struct RecordRow {
    id: i64,
    note_id: String,
    correct: bool,
    created: String,
    modified: String,
}

impl RecordRow {
    pub(crate) const COLUMNS: &'static str = "id, note_id, correct, created, modified";

    pub(crate) fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            note_id: row.get(1)?,
            correct: row.get(2)?,
            created: row.get(3)?,
            modified: row.get(4)?,
        })
    }

    pub(crate) fn into_record(self) -> StoreResult<Record> {
        Ok(Record::new(
            RecordId::new(self.id),
            parse_note_id(&self.note_id)?,
            self.correct,
            parse_timestamp(&self.created)?,
            parse_timestamp(&self.modified)?,
        ))
    }
}
