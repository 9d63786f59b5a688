//! Builder for test notes with sensible defaults.

use tango::domain::{NewNote, NoteFields};

/// Builder for creating test notes with sensible defaults.
///
/// The Japanese text defaults to a placeholder so only the English side
/// needs to be given.
#[derive(Debug)]
pub struct TestNote {
    fields: NoteFields,
    tags: Vec<String>,
}

#[allow(dead_code)]
impl TestNote {
    /// Creates a new test note with the given English text.
    pub fn new(english: impl Into<String>) -> Self {
        Self {
            fields: NoteFields::new(english, "テスト"),
            tags: Vec::new(),
        }
    }

    /// Sets the Japanese text.
    pub fn japanese(mut self, japanese: impl Into<String>) -> Self {
        self.fields.japanese = japanese.into();
        self
    }

    /// Sets the description.
    pub fn description(mut self, desc: impl Into<String>) -> Self {
        self.fields.description = desc.into();
        self
    }

    /// Sets the example sentences.
    pub fn examples(mut self, examples: impl Into<String>) -> Self {
        self.fields.examples = examples.into();
        self
    }

    /// Adds a tag to the note.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Returns the English text.
    pub fn english(&self) -> &str {
        &self.fields.english
    }

    /// Converts to the store's input type.
    pub fn to_new_note(&self) -> NewNote {
        NewNote {
            fields: self.fields.clone(),
            tags: self.tags.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_note_defaults() {
        let note = TestNote::new("cat").to_new_note();
        assert_eq!(note.fields.english, "cat");
        assert_eq!(note.fields.japanese, "テスト");
        assert!(note.tags.is_empty());
    }

    #[test]
    fn test_note_builder_methods() {
        let note = TestNote::new("cat")
            .japanese("猫")
            .description("animal")
            .tag("noun")
            .tag("n5")
            .to_new_note();
        assert_eq!(note.fields.japanese, "猫");
        assert_eq!(note.fields.description, "animal");
        assert_eq!(note.tags, vec!["noun", "n5"]);
    }
}
