//! Query execution: pagination and tag hydration.

use super::filter::NoteQuery;
use super::rows::{NoteRow, TagRow};
use crate::domain::{Note, Page, PageRequest, Tag};
use crate::store::StoreResult;
use rusqlite::{Connection, params_from_iter, types::Value};
use std::collections::HashMap;

/// Upper bound on bound parameters per tag-hydration statement.
const HYDRATE_CHUNK: usize = 500;

/// Executes `query` for one page and reports the totals of the whole listing.
///
/// A page past the end yields no items but the same totals.
pub(crate) fn fetch_page(
    conn: &Connection,
    query: &NoteQuery,
    request: PageRequest,
) -> StoreResult<Page<Note>> {
    let (count_sql, count_params) = query.count_sql();
    let total: i64 = conn.query_row(&count_sql, params_from_iter(count_params), |row| {
        row.get(0)
    })?;
    let total = u64::try_from(total).unwrap_or(0);

    let items = if request.offset() >= total {
        Vec::new()
    } else {
        let window = (u64::from(request.size()), request.offset());
        select_notes(conn, query, Some(window))?
    };

    Ok(Page::new(items, total, request))
}

/// Executes `query` without a window.
pub(crate) fn fetch_all(conn: &Connection, query: &NoteQuery) -> StoreResult<Vec<Note>> {
    select_notes(conn, query, None)
}

fn select_notes(
    conn: &Connection,
    query: &NoteQuery,
    window: Option<(u64, u64)>,
) -> StoreResult<Vec<Note>> {
    let (sql, params) = query.select_sql(window);
    tracing::debug!(%sql, params = params.len(), "selecting notes");

    let rows: Vec<NoteRow> = conn
        .prepare(&sql)?
        .query_map(params_from_iter(params), NoteRow::from_row)?
        .collect::<Result<_, _>>()?;

    hydrate(conn, rows)
}

/// Attaches live tags to note rows, keeping row order.
pub(crate) fn hydrate(conn: &Connection, rows: Vec<NoteRow>) -> StoreResult<Vec<Note>> {
    let mut tags_by_note: HashMap<String, Vec<Tag>> = HashMap::new();

    for chunk in rows.chunks(HYDRATE_CHUNK) {
        let placeholders = vec!["?"; chunk.len()].join(", ");
        let sql = format!(
            "SELECT {} FROM tags WHERE deleted_at IS NULL AND note_id IN ({}) ORDER BY id",
            TagRow::COLUMNS,
            placeholders
        );
        let ids = chunk.iter().map(|r| Value::Text(r.id().to_string()));
        let tag_rows: Vec<TagRow> = conn
            .prepare(&sql)?
            .query_map(params_from_iter(ids), TagRow::from_row)?
            .collect::<Result<_, _>>()?;

        for tag_row in tag_rows {
            let note_id = tag_row.note_id().to_string();
            tags_by_note
                .entry(note_id)
                .or_default()
                .push(tag_row.into_tag()?);
        }
    }

    rows.into_iter()
        .map(|row| {
            let tags = tags_by_note.remove(row.id()).unwrap_or_default();
            row.into_note(tags)
        })
        .collect()
}
