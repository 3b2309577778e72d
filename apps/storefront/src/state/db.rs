//! # Database State
//!
//! Wraps the `Database` handle for use in commands.
//!
//! The pool inside `Database` is thread-safe, so commands run queries
//! concurrently without extra locking.

use signboard_db::Database;

/// Wrapper around `Database` for shell state.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
