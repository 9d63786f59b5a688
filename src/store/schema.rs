//! SQLite schema creation for the vocabulary store.

use rusqlite::Connection;

/// Current schema version written to `schema_version`.
pub const SCHEMA_VERSION: i64 = 1;

/// Creates the database schema.
///
/// Idempotent: calling it on an existing database changes nothing.
///
/// # Tables Created
/// - `notes` - Vocabulary notes, soft-deleted through `deleted_at`
/// - `tags` - Tags owned by one note each, soft-deleted through `deleted_at`
/// - `records` - Append-only review attempts
/// - `schema_version` - Schema version tracking
///
/// Tags reference their note without `ON DELETE CASCADE`; the store removes
/// a note's tags itself.
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS notes (
            id TEXT PRIMARY KEY,
            english TEXT NOT NULL DEFAULT '',
            japanese TEXT NOT NULL DEFAULT '',
            description TEXT NOT NULL DEFAULT '',
            examples TEXT NOT NULL DEFAULT '',
            similar TEXT NOT NULL DEFAULT '',
            created TEXT NOT NULL,
            modified TEXT NOT NULL,
            deleted_at TEXT
        );",
    )?;

    // AUTOINCREMENT keeps ids of deleted tags from being handed out again
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS tags (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            note_id TEXT NOT NULL REFERENCES notes(id),
            name TEXT NOT NULL,
            created TEXT NOT NULL,
            modified TEXT NOT NULL,
            deleted_at TEXT
        );",
    )?;

    // No foreign key: records may name notes this layer never validated
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS records (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            note_id TEXT NOT NULL,
            correct INTEGER NOT NULL CHECK (correct IN (0, 1)),
            created TEXT NOT NULL,
            modified TEXT NOT NULL
        );",
    )?;

    conn.execute_batch(
        "CREATE INDEX IF NOT EXISTS idx_notes_created ON notes(created);
         CREATE INDEX IF NOT EXISTS idx_notes_modified ON notes(modified);
         CREATE INDEX IF NOT EXISTS idx_tags_note_id ON tags(note_id);
         CREATE INDEX IF NOT EXISTS idx_tags_name ON tags(name);
         CREATE INDEX IF NOT EXISTS idx_records_note_id ON records(note_id);
         CREATE INDEX IF NOT EXISTS idx_records_modified ON records(modified);",
    )?;

    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        );",
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version, applied_at) VALUES (?1, datetime('now'))",
        [SCHEMA_VERSION],
    )?;

    Ok(())
}

/// Returns the highest applied schema version.
pub fn get_schema_version(conn: &Connection) -> rusqlite::Result<i64> {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get(0)
    })
}
