//! Write transactions for the note store.

use crate::store::StoreResult;
use rusqlite::{Connection, Params};
use std::cell::Cell;

/// An open `BEGIN IMMEDIATE` transaction.
///
/// Dropping it without `commit()` rolls back every statement run since it
/// began, so a batch that fails part way leaves the store untouched.
pub struct Transaction<'a> {
    conn: &'a Connection,
    changed: Cell<usize>,
    committed: bool,
}

impl<'a> Transaction<'a> {
    pub(crate) fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            changed: Cell::new(0),
            committed: false,
        }
    }

    /// The connection, for helpers that take `&Connection`.
    ///
    /// Rows changed through it are not counted.
    pub(crate) fn conn(&self) -> &Connection {
        self.conn
    }

    /// Runs one statement and returns the rows it changed.
    pub fn execute(&self, sql: &str, params: impl Params) -> StoreResult<usize> {
        let rows = self.conn.execute(sql, params)?;
        self.changed.set(self.changed.get() + rows);
        Ok(rows)
    }

    /// Commits, returning the rows changed through `execute`.
    pub fn commit(mut self) -> StoreResult<usize> {
        self.conn.execute_batch("COMMIT")?;
        self.committed = true;
        tracing::debug!(rows = self.changed.get(), "committed");
        Ok(self.changed.get())
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        match self.conn.execute_batch("ROLLBACK") {
            Ok(()) => tracing::debug!(rows = self.changed.get(), "rolled back uncommitted writes"),
            Err(e) => tracing::warn!(error = %e, "rollback on drop failed"),
        }
    }
}
