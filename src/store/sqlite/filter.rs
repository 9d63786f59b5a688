//! Filter composition for note listings.
//!
//! Each filter category is one `Predicate` variant rendering a fixed SQL
//! fragment. Caller data only ever reaches SQLite as bound parameters;
//! operators and column names come from the enums below.

use super::rows::fmt_timestamp;
use crate::domain::{Bounds, Criteria, Ordering, SortDirection, SortField};
use chrono::{DateTime, Utc};
use rusqlite::types::Value;

/// Columns selected for every note row, in `NoteRow::from_row` order.
pub(crate) const NOTE_COLUMNS: &str =
    "n.id, n.english, n.japanese, n.description, n.examples, n.similar, n.created, n.modified";

/// Note text columns covered by the search filter.
const SEARCH_COLUMNS: [&str; 5] = [
    "n.english",
    "n.japanese",
    "n.description",
    "n.similar",
    "n.examples",
];

// ===========================================
// Comparison operators
// ===========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Comparison {
    Greater,
    Less,
    GreaterOrEqual,
}

impl Comparison {
    fn sql(self) -> &'static str {
        match self {
            Comparison::Greater => ">",
            Comparison::Less => "<",
            Comparison::GreaterOrEqual => ">=",
        }
    }
}

// ===========================================
// Predicates
// ===========================================

/// One filter category. Predicates are conjoined by `NoteQuery`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Predicate {
    /// Substring of any text column (case-sensitive).
    Search(String),
    /// Owns a live tag with any of these names.
    TagsAny(Vec<String>),
    /// Has a review record inside `[start, end)`.
    PlayedWithin(Bounds<DateTime<Utc>>),
    /// Mean correctness strictly inside `(start, end)`; unreviewed notes never match.
    RateWithin(Bounds<f64>),
    /// Id starts with this (upper-case) prefix.
    IdPrefix(String),
}

impl Predicate {
    /// Renders the predicate, pushing its bound values onto `params`.
    fn render(&self, params: &mut Vec<Value>) -> String {
        match self {
            Predicate::Search(text) => {
                let alternatives: Vec<String> = SEARCH_COLUMNS
                    .iter()
                    .map(|col| {
                        params.push(Value::Text(text.clone()));
                        format!("instr({}, ?) > 0", col)
                    })
                    .collect();
                format!("({})", alternatives.join(" OR "))
            }
            Predicate::TagsAny(names) => {
                params.extend(names.iter().cloned().map(Value::Text));
                format!(
                    "n.id IN (SELECT DISTINCT t.note_id FROM tags t \
                     WHERE t.deleted_at IS NULL AND t.name IN ({}))",
                    placeholders(names.len())
                )
            }
            Predicate::PlayedWithin(bounds) => {
                let mut conditions = Vec::new();
                if let Some(start) = bounds.start {
                    params.push(Value::Text(fmt_timestamp(start)));
                    conditions.push(format!("r.modified {} ?", Comparison::GreaterOrEqual.sql()));
                }
                if let Some(end) = bounds.end {
                    params.push(Value::Text(fmt_timestamp(end)));
                    conditions.push(format!("r.modified {} ?", Comparison::Less.sql()));
                }
                format!(
                    "n.id IN (SELECT r.note_id FROM records r WHERE {} GROUP BY r.note_id)",
                    conditions.join(" AND ")
                )
            }
            Predicate::RateWithin(bounds) => {
                let mut conditions = Vec::new();
                if let Some(above) = bounds.start {
                    params.push(Value::Real(above));
                    conditions.push(format!("AVG(r.correct) {} ?", Comparison::Greater.sql()));
                }
                if let Some(below) = bounds.end {
                    params.push(Value::Real(below));
                    conditions.push(format!("AVG(r.correct) {} ?", Comparison::Less.sql()));
                }
                format!(
                    "n.id IN (SELECT r.note_id FROM records r GROUP BY r.note_id HAVING {})",
                    conditions.join(" AND ")
                )
            }
            Predicate::IdPrefix(prefix) => {
                params.push(Value::Integer(prefix.chars().count() as i64));
                params.push(Value::Text(prefix.clone()));
                "substr(n.id, 1, ?) = ?".to_string()
            }
        }
    }
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

fn sort_expression(field: SortField) -> &'static str {
    match field {
        SortField::Created => "n.created",
        SortField::Modified => "n.modified",
        SortField::Played => "(SELECT MAX(r.modified) FROM records r WHERE r.note_id = n.id)",
        SortField::English => "n.english",
    }
}

fn order_clause(ordering: Ordering) -> Option<String> {
    match ordering {
        Ordering::Unordered => None,
        Ordering::Random => Some("ORDER BY RANDOM()".to_string()),
        Ordering::By { field, direction } => {
            let dir = match direction {
                SortDirection::Asc => "ASC",
                SortDirection::Desc => "DESC",
            };
            // id breaks ties so consecutive pages never overlap
            Some(format!("ORDER BY {} {}, n.id {}", sort_expression(field), dir, dir))
        }
    }
}

// ===========================================
// NoteQuery
// ===========================================

/// A composed query over live notes.
#[derive(Debug, Clone, Default)]
pub(crate) struct NoteQuery {
    predicates: Vec<Predicate>,
    ordering: Ordering,
}

impl NoteQuery {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Builds the query for `criteria`, skipping every absent filter.
    ///
    /// Filters are added in a fixed order (search, tags, played, rate); since
    /// they are conjoined the order does not change the result.
    pub(crate) fn from_criteria(criteria: &Criteria) -> Self {
        let mut query = Self::new();

        if let Some(text) = criteria.search.as_deref().filter(|t| !t.is_empty()) {
            query = query.filter(Predicate::Search(text.to_string()));
        }

        let mut names: Vec<String> = Vec::with_capacity(criteria.tags.len());
        for name in &criteria.tags {
            if !names.contains(name) {
                names.push(name.clone());
            }
        }
        if !names.is_empty() {
            query = query.filter(Predicate::TagsAny(names));
        }

        if !criteria.played.is_unbounded() {
            query = query.filter(Predicate::PlayedWithin(criteria.played));
        }

        if !criteria.rate.is_unbounded() {
            query = query.filter(Predicate::RateWithin(criteria.rate));
        }

        query.order_by(criteria.ordering)
    }

    pub(crate) fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub(crate) fn order_by(mut self, ordering: Ordering) -> Self {
        self.ordering = ordering;
        self
    }

    #[cfg(test)]
    pub(crate) fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    fn where_clause(&self, params: &mut Vec<Value>) -> String {
        let mut clauses = vec!["n.deleted_at IS NULL".to_string()];
        clauses.extend(self.predicates.iter().map(|p| p.render(params)));
        clauses.join(" AND ")
    }

    /// SQL and parameters counting every matching note.
    pub(crate) fn count_sql(&self) -> (String, Vec<Value>) {
        let mut params = Vec::new();
        let sql = format!(
            "SELECT COUNT(*) FROM notes n WHERE {}",
            self.where_clause(&mut params)
        );
        (sql, params)
    }

    /// SQL and parameters selecting matching notes in order.
    ///
    /// `window` is `(limit, offset)`; `None` selects every row.
    pub(crate) fn select_sql(&self, window: Option<(u64, u64)>) -> (String, Vec<Value>) {
        let mut params = Vec::new();
        let mut sql = format!(
            "SELECT {} FROM notes n WHERE {}",
            NOTE_COLUMNS,
            self.where_clause(&mut params)
        );
        if let Some(order) = order_clause(self.ordering) {
            sql.push(' ');
            sql.push_str(&order);
        }
        if let Some((limit, offset)) = window {
            sql.push_str(" LIMIT ? OFFSET ?");
            params.push(Value::Integer(to_sql_int(limit)));
            params.push(Value::Integer(to_sql_int(offset)));
        }
        (sql, params)
    }
}

fn to_sql_int(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}
