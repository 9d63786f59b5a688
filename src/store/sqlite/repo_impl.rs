//! NoteRepository trait implementation for SqliteStore.

use super::SqliteStore;
use super::filter::{NOTE_COLUMNS, NoteQuery, Predicate};
use super::pagination::{fetch_all, fetch_page, hydrate};
use super::rows::{NoteRow, RecordRow, TagRow, fmt_timestamp, now, parse_timestamp};
use crate::domain::{
    Criteria, NewNote, NewRecord, Note, NoteId, NoteStats, NoteUpdate, Page, PageRequest, Record,
    RecordId, Tag, TagId,
};
use crate::store::reconcile::plan_tags;
use crate::store::{NoteRepository, StoreError, StoreResult, TagWithCount};
use rusqlite::{Connection, OptionalExtension, params};

// ===========================================
// Statement helpers
// ===========================================

fn insert_tag(conn: &Connection, note_id: &str, name: &str, ts: &str) -> StoreResult<TagId> {
    conn.execute(
        "INSERT INTO tags (note_id, name, created, modified) VALUES (?1, ?2, ?3, ?3)",
        params![note_id, name, ts],
    )?;
    Ok(TagId::new(conn.last_insert_rowid()))
}

fn live_tags(conn: &Connection, note_id: &str) -> StoreResult<Vec<Tag>> {
    let sql = format!(
        "SELECT {} FROM tags WHERE note_id = ? AND deleted_at IS NULL ORDER BY id",
        TagRow::COLUMNS
    );
    let rows: Vec<TagRow> = conn
        .prepare(&sql)?
        .query_map([note_id], TagRow::from_row)?
        .collect::<Result<_, _>>()?;
    rows.into_iter().map(TagRow::into_tag).collect()
}

fn note_exists(conn: &Connection, note_id: &str) -> StoreResult<bool> {
    let found = conn
        .query_row(
            "SELECT 1 FROM notes WHERE id = ? AND deleted_at IS NULL",
            [note_id],
            |_| Ok(()),
        )
        .optional()?;
    Ok(found.is_some())
}

fn select_note(conn: &Connection, id: &NoteId) -> StoreResult<Note> {
    let sql = format!(
        "SELECT {} FROM notes n WHERE n.id = ? AND n.deleted_at IS NULL",
        NOTE_COLUMNS
    );
    let row = conn
        .query_row(&sql, [id.to_string()], NoteRow::from_row)
        .optional()?
        .ok_or_else(|| StoreError::NoteNotFound { id: id.to_string() })?;

    hydrate(conn, vec![row])?
        .pop()
        .ok_or_else(|| StoreError::NoteNotFound { id: id.to_string() })
}

/// Applies one full-replace update: tags first, then the note row.
fn replace_note(conn: &Connection, update: &NoteUpdate) -> StoreResult<()> {
    let id_str = update.id.to_string();
    if !note_exists(conn, &id_str)? {
        return Err(StoreError::NoteNotFound { id: id_str });
    }

    let ts = fmt_timestamp(now());
    let persisted = live_tags(conn, &id_str)?;
    let plan = plan_tags(&persisted, &update.tags);
    tracing::debug!(
        note = %update.id,
        delete = plan.delete.len(),
        rename = plan.rename.len(),
        insert = plan.insert.len(),
        unchanged = plan.unchanged,
        "reconciling tags"
    );

    for tag_id in &plan.delete {
        conn.execute(
            "UPDATE tags SET deleted_at = ?1, modified = ?1 WHERE id = ?2 AND note_id = ?3",
            params![ts, tag_id.get(), id_str],
        )?;
    }
    for (tag_id, name) in &plan.rename {
        conn.execute(
            "UPDATE tags SET name = ?1, modified = ?2 WHERE id = ?3 AND note_id = ?4",
            params![name, ts, tag_id.get(), id_str],
        )?;
    }
    for name in &plan.insert {
        insert_tag(conn, &id_str, name, &ts)?;
    }

    let fields = &update.fields;
    let changed = conn.execute(
        "UPDATE notes SET english = ?1, japanese = ?2, description = ?3, examples = ?4,
             similar = ?5, modified = ?6
         WHERE id = ?7 AND deleted_at IS NULL",
        params![
            fields.english,
            fields.japanese,
            fields.description,
            fields.examples,
            fields.similar,
            ts,
            id_str,
        ],
    )?;
    if changed == 0 {
        return Err(StoreError::NoteNotFound { id: id_str });
    }
    Ok(())
}

fn select_records(conn: &Connection, note_id: Option<&NoteId>) -> StoreResult<Vec<Record>> {
    let rows: Vec<RecordRow> = match note_id {
        Some(id) => {
            let sql = format!(
                "SELECT {} FROM records WHERE note_id = ? ORDER BY id",
                RecordRow::COLUMNS
            );
            conn.prepare(&sql)?
                .query_map([id.to_string()], RecordRow::from_row)?
                .collect::<Result<_, _>>()?
        }
        None => {
            let sql = format!("SELECT {} FROM records ORDER BY id", RecordRow::COLUMNS);
            conn.prepare(&sql)?
                .query_map([], RecordRow::from_row)?
                .collect::<Result<_, _>>()?
        }
    };
    rows.into_iter().map(RecordRow::into_record).collect()
}

impl NoteRepository for SqliteStore {
    fn add_notes(&mut self, notes: Vec<NewNote>) -> StoreResult<Vec<Note>> {
        if notes.is_empty() {
            return Err(StoreError::EmptyInput("notes"));
        }

        let tx = self.transaction()?;
        let mut ids = Vec::with_capacity(notes.len());

        for note in &notes {
            let id = NoteId::new();
            let id_str = id.to_string();
            let ts = fmt_timestamp(now());
            let fields = &note.fields;

            tx.execute(
                "INSERT INTO notes (id, english, japanese, description, examples, similar, created, modified)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)",
                params![
                    id_str,
                    fields.english,
                    fields.japanese,
                    fields.description,
                    fields.examples,
                    fields.similar,
                    ts,
                ],
            )?;
            for name in &note.tags {
                insert_tag(tx.conn(), &id_str, name, &ts)?;
            }
            ids.push(id);
        }

        tx.commit()?;
        tracing::info!(count = ids.len(), "added notes");

        ids.iter().map(|id| select_note(&self.conn, id)).collect()
    }

    fn read_notes(&self, criteria: &Criteria, page: PageRequest) -> StoreResult<Page<Note>> {
        let query = NoteQuery::from_criteria(criteria);
        let result = fetch_page(&self.conn, &query, page)?;
        tracing::debug!(
            total = result.total,
            page = result.page,
            returned = result.items.len(),
            "read notes"
        );
        Ok(result)
    }

    fn read_note(&self, id: &NoteId) -> StoreResult<Note> {
        select_note(&self.conn, id)
    }

    fn update_notes(&mut self, updates: Vec<NoteUpdate>) -> StoreResult<Vec<Note>> {
        if updates.is_empty() {
            return Ok(Vec::new());
        }

        let tx = self.transaction()?;
        for update in &updates {
            // Returning early drops `tx`, rolling back earlier notes of the batch
            replace_note(tx.conn(), update)?;
        }
        tx.commit()?;
        tracing::info!(count = updates.len(), "updated notes");

        updates
            .iter()
            .map(|update| select_note(&self.conn, &update.id))
            .collect()
    }

    fn delete_notes(&mut self, ids: &[NoteId]) -> StoreResult<()> {
        if ids.is_empty() {
            return Ok(());
        }

        let tx = self.transaction()?;
        let ts = fmt_timestamp(now());
        let mut deleted = 0;

        for id in ids {
            let id_str = id.to_string();
            // Tags go first: the schema does not cascade
            tx.execute(
                "UPDATE tags SET deleted_at = ?1, modified = ?1 WHERE note_id = ?2 AND deleted_at IS NULL",
                params![ts, id_str],
            )?;
            deleted += tx.execute(
                "UPDATE notes SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
                params![ts, id_str],
            )?;
        }

        tx.commit()?;
        tracing::info!(requested = ids.len(), deleted, "deleted notes");
        Ok(())
    }

    fn add_records(&mut self, records: Vec<NewRecord>) -> StoreResult<Vec<Record>> {
        if records.is_empty() {
            return Err(StoreError::EmptyInput("records"));
        }

        let tx = self.transaction()?;
        let created = now();
        let ts = fmt_timestamp(created);
        let mut out = Vec::with_capacity(records.len());

        for record in records {
            tx.execute(
                "INSERT INTO records (note_id, correct, created, modified) VALUES (?1, ?2, ?3, ?3)",
                params![record.note_id.to_string(), record.correct, ts],
            )?;
            let id = RecordId::new(tx.conn().last_insert_rowid());
            out.push(Record::new(id, record.note_id, record.correct, created, created));
        }

        tx.commit()?;
        tracing::info!(count = out.len(), "added records");
        Ok(out)
    }

    fn read_records(&self) -> StoreResult<Vec<Record>> {
        select_records(&self.conn, None)
    }

    fn records_for_note(&self, id: &NoteId) -> StoreResult<Vec<Record>> {
        select_records(&self.conn, Some(id))
    }

    fn note_stats(&self, id: &NoteId) -> StoreResult<NoteStats> {
        let (plays, correct, last): (i64, i64, Option<String>) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(correct), 0), MAX(modified)
             FROM records WHERE note_id = ?",
            [id.to_string()],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;

        let to_u32 = |n: i64| u32::try_from(n).unwrap_or(u32::MAX);
        Ok(NoteStats {
            plays: to_u32(plays),
            correct: to_u32(correct),
            last_played: last.as_deref().map(parse_timestamp).transpose()?,
        })
    }

    fn all_tags(&self) -> StoreResult<Vec<TagWithCount>> {
        let mut stmt = self.conn.prepare(
            "SELECT t.name, COUNT(DISTINCT t.note_id)
             FROM tags t JOIN notes n ON n.id = t.note_id
             WHERE t.deleted_at IS NULL AND n.deleted_at IS NULL
             GROUP BY t.name
             ORDER BY t.name",
        )?;
        let tags = stmt
            .query_map([], |row| {
                let name: String = row.get(0)?;
                let count: u32 = row.get(1)?;
                Ok(TagWithCount::new(name, count))
            })?
            .collect::<Result<_, _>>()?;
        Ok(tags)
    }

    fn find_by_id_prefix(&self, prefix: &str) -> StoreResult<Vec<Note>> {
        let prefix = prefix.trim();
        if prefix.is_empty() {
            return Ok(Vec::new());
        }

        let query = NoteQuery::new().filter(Predicate::IdPrefix(prefix.to_ascii_uppercase()));
        fetch_all(&self.conn, &query)
    }
}
