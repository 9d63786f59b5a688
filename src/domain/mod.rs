//! Core types: Note, Tag, Record, their ids, and read Criteria

mod criteria;
mod ids;
mod note;
mod record;
mod tag;

pub use criteria::{
    Bounds, Criteria, Ordering, Page, PageRequest, ParseSortFieldError, SortDirection, SortField,
};
pub use ids::{NoteId, ParseNoteIdError, RecordId, TagId};
pub use note::{NewNote, Note, NoteFields, NoteUpdate};
pub use record::{NewRecord, NoteStats, Record};
pub use tag::{ParseTagError, Tag, TagDraft, parse_tag_name};
