// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PersistenceError;

/// The key of the combined roster document.
pub const ROSTER_DOCUMENT_KEY: &str = "roster";

/// A document body with the version it was stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    /// The serialized JSON document.
    pub body: String,
    /// Incremented on every store, starting at 1.
    pub version: i64,
}

/// Versioned storage for one JSON document.
///
/// Version 0 means "no document". A conditional store only succeeds if the
/// current version equals the one the caller read.
pub trait DocumentStore {
    /// Reads the current document, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn fetch(&mut self) -> Result<Option<StoredDocument>, PersistenceError>;

    /// Replaces the document.
    ///
    /// # Arguments
    ///
    /// * `body` - The serialized document
    /// * `expected_version` - `Some(v)` to fail unless the stored version is
    ///   `v`, `None` to write unconditionally
    ///
    /// # Returns
    ///
    /// The new version.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::VersionConflict` if the version check
    /// fails, or another error if the write fails.
    fn store(&mut self, body: &str, expected_version: Option<i64>)
    -> Result<i64, PersistenceError>;
}
