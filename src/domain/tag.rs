//! Tags owned by a single note.

use crate::domain::{NoteId, TagId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A free-text label owned by exactly one note.
///
/// Tags have no identity outside their note. Names are not unique: a note may
/// carry two tags with the same name, but never two tags with the same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    id: TagId,
    note_id: NoteId,
    name: String,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
}

impl Tag {
    pub fn new(
        id: TagId,
        note_id: NoteId,
        name: impl Into<String>,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            note_id,
            name: name.into(),
            created,
            modified,
        }
    }

    pub fn id(&self) -> TagId {
        self.id
    }

    /// Returns the id of the owning note.
    pub fn note_id(&self) -> &NoteId {
        &self.note_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    /// Returns a draft that keeps this tag as-is on the next update.
    pub fn to_draft(&self) -> TagDraft {
        TagDraft::existing(self.id, self.name.clone())
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A desired tag supplied with a note update.
///
/// A draft carrying an id keeps (and possibly renames) the persisted tag with
/// that id. A draft without an id, or with an id the note does not own,
/// becomes a new tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TagId>,
    pub name: String,
}

impl TagDraft {
    /// A draft for a tag that does not exist yet.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }

    /// A draft referring to a persisted tag.
    pub fn existing(id: TagId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            name: name.into(),
        }
    }
}

/// Error returned when a tag argument cannot be parsed.
#[derive(Debug, Clone)]
pub struct ParseTagError(String);

impl fmt::Display for ParseTagError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ParseTagError {}

/// Validates a plain tag name, trimming surrounding whitespace.
///
/// Colons and digits are ordinary characters here; `10:30` is a name.
pub fn parse_tag_name(s: &str) -> Result<String, ParseTagError> {
    let name = s.trim();
    if name.is_empty() {
        return Err(ParseTagError("tag name cannot be empty".to_string()));
    }
    Ok(name.to_string())
}

/// Parses `ID:name`, a reference to a persisted tag.
///
/// Everything after the first colon is the name, so `3:10:30` keeps tag 3
/// under the name `10:30`.
impl FromStr for TagDraft {
    type Err = ParseTagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, name) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| ParseTagError(format!("expected ID:NAME, got '{}'", s)))?;
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
            return Err(ParseTagError(format!("tag id must be a number: '{}'", id)));
        }
        let id: i64 = id
            .parse()
            .map_err(|_| ParseTagError(format!("tag id out of range: {}", id)))?;
        Ok(TagDraft::existing(TagId::new(id), parse_tag_name(name)?))
    }
}
