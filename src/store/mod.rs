//! Storage: repository trait, SQLite implementation, schema and tag reconciliation

pub mod reconcile;
mod repository;
mod schema;
pub mod sqlite;

pub use reconcile::{TagPlan, plan_tags};
pub use repository::{NoteRepository, StoreError, StoreResult, TagWithCount};
pub use schema::{SCHEMA_VERSION, create_schema, get_schema_version};
pub use sqlite::{SqliteStore, Transaction};
