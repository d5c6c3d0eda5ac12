// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the meeting roster.
//!
//! The roster is one JSON document (`{assignments, settings}`). This crate
//! stores it with a version number and serves it through a cached gateway.
//!
//! ## Stores
//!
//! - **`SQLite`** via Diesel: one row per document key, embedded migrations,
//!   WAL mode for file databases. Used by the server.
//! - **Memory**: a plain in-process store with failure injection. Used by
//!   tests across the workspace.
//!
//! ## Versioning
//!
//! Every successful store bumps the version. A write that carries the
//! version it was based on fails with
//! [`PersistenceError::VersionConflict`] if another writer got there first,
//! so a lost update becomes an ordinary write failure.
//!
//! ## Testing Philosophy
//!
//! - Every in-memory `SQLite` store gets its own shared-cache database name
//!   from an atomic counter, so tests never see each other's data
//! - Gateway behavior is tested against the memory store

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod gateway;
mod memory;
mod mutations;
mod queries;
mod store;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use gateway::PersistenceGateway;
pub use memory::MemoryDocumentStore;
pub use store::{DocumentStore, ROSTER_DOCUMENT_KEY, StoredDocument};

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// A document store backed by a `SQLite` database.
pub struct SqliteDocumentStore {
    conn: SqliteConnection,
    key: String,
}

impl SqliteDocumentStore {
    /// Creates a store over a fresh in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String =
            format!("file:memdb_roster_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        Ok(Self {
            conn,
            key: ROSTER_DOCUMENT_KEY.to_string(),
        })
    }

    /// Creates a store over a `SQLite` database file, creating it if needed.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        backend::sqlite::enable_wal_mode(&mut conn)?;

        Ok(Self {
            conn,
            key: ROSTER_DOCUMENT_KEY.to_string(),
        })
    }

    /// Stores the document under a different key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the active `SQLite` journal mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the PRAGMA query fails.
    pub fn journal_mode(&mut self) -> Result<String, PersistenceError> {
        backend::sqlite::journal_mode(&mut self.conn)
    }

    /// Returns when the document was last stored (RFC 3339), if ever.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn updated_at(&mut self) -> Result<Option<String>, PersistenceError> {
        Ok(queries::get_document(&mut self.conn, &self.key)?.map(|row| row.updated_at))
    }
}

impl DocumentStore for SqliteDocumentStore {
    fn fetch(&mut self) -> Result<Option<StoredDocument>, PersistenceError> {
        Ok(
            queries::get_document(&mut self.conn, &self.key)?.map(|row| StoredDocument {
                body: row.body,
                version: row.version,
            }),
        )
    }

    fn store(
        &mut self,
        body: &str,
        expected_version: Option<i64>,
    ) -> Result<i64, PersistenceError> {
        mutations::store_document(&mut self.conn, &self.key, body, expected_version)
    }
}
