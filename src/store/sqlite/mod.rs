//! SQLite-backed vocabulary store.

mod connection;
pub(crate) mod filter;
mod pagination;
mod repo_impl;
pub(crate) mod rows;
mod transaction;


use rusqlite::Connection;

pub use transaction::Transaction;

// ===========================================
// SqliteStore Struct
// ===========================================

/// SQLite-backed note and record store.
///
/// Owns its connection; each store is an isolated engine handle, so tests
/// can open one in memory per case.
pub struct SqliteStore {
    pub(crate) conn: Connection,
}
