//! Vocabulary notes and the inputs used to create and replace them.

use crate::domain::{NoteId, Tag, TagDraft};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The free-text content of a note.
///
/// No field has a length or non-empty invariant. Every field defaults to the
/// empty string, which is what an update stores when a field is omitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoteFields {
    pub english: String,
    pub japanese: String,
    pub description: String,
    pub examples: String,
    pub similar: String,
}

impl NoteFields {
    /// Creates fields with the language pair set and everything else empty.
    pub fn new(english: impl Into<String>, japanese: impl Into<String>) -> Self {
        Self {
            english: english.into(),
            japanese: japanese.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn examples(mut self, examples: impl Into<String>) -> Self {
        self.examples = examples.into();
        self
    }

    pub fn similar(mut self, similar: impl Into<String>) -> Self {
        self.similar = similar.into();
        self
    }
}

/// A persisted vocabulary note with its tags.
///
/// # Examples
///
/// ```
/// use tango::domain::{Note, NoteFields, NoteId};
/// use chrono::Utc;
///
/// let now = Utc::now();
/// let note = Note::new(NoteId::new(), NoteFields::new("cat", "猫"), now, now, vec![]);
/// assert_eq!(note.english(), "cat");
/// assert!(note.tags().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Note {
    id: NoteId,
    #[serde(flatten)]
    fields: NoteFields,
    created: DateTime<Utc>,
    modified: DateTime<Utc>,
    tags: Vec<Tag>,
}

impl Note {
    pub fn new(
        id: NoteId,
        fields: NoteFields,
        created: DateTime<Utc>,
        modified: DateTime<Utc>,
        tags: Vec<Tag>,
    ) -> Self {
        Self {
            id,
            fields,
            created,
            modified,
            tags,
        }
    }

    pub fn id(&self) -> &NoteId {
        &self.id
    }

    pub fn fields(&self) -> &NoteFields {
        &self.fields
    }

    pub fn english(&self) -> &str {
        &self.fields.english
    }

    pub fn japanese(&self) -> &str {
        &self.fields.japanese
    }

    pub fn description(&self) -> &str {
        &self.fields.description
    }

    pub fn examples(&self) -> &str {
        &self.fields.examples
    }

    pub fn similar(&self) -> &str {
        &self.fields.similar
    }

    pub fn created(&self) -> DateTime<Utc> {
        self.created
    }

    pub fn modified(&self) -> DateTime<Utc> {
        self.modified
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    /// Returns the tag names in stored order.
    pub fn tag_names(&self) -> Vec<&str> {
        self.tags.iter().map(Tag::name).collect()
    }

    /// Builds an update that replaces this note with `fields`, keeping the
    /// current tags.
    pub fn to_update(&self, fields: NoteFields) -> NoteUpdate {
        NoteUpdate {
            id: self.id.clone(),
            fields,
            tags: self.tags.iter().map(Tag::to_draft).collect(),
        }
    }
}

/// A note to be created. Tags are given by name; ids are assigned on insert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewNote {
    #[serde(flatten)]
    pub fields: NoteFields,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewNote {
    pub fn new(fields: NoteFields) -> Self {
        Self {
            fields,
            tags: Vec::new(),
        }
    }

    /// Adds a tag by name.
    pub fn tag(mut self, name: impl Into<String>) -> Self {
        self.tags.push(name.into());
        self
    }
}

/// A full replacement of an existing note.
///
/// Every scalar field is overwritten, including those left at their default.
/// `tags` is the complete desired tag set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteUpdate {
    pub id: NoteId,
    #[serde(flatten)]
    pub fields: NoteFields,
    #[serde(default)]
    pub tags: Vec<TagDraft>,
}

impl NoteUpdate {
    pub fn new(id: NoteId, fields: NoteFields) -> Self {
        Self {
            id,
            fields,
            tags: Vec::new(),
        }
    }

    pub fn tag(mut self, draft: TagDraft) -> Self {
        self.tags.push(draft);
        self
    }
}
