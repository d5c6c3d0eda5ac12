// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PersistenceError;
use crate::store::{DocumentStore, StoredDocument};

/// A document store kept in memory.
///
/// Reads and writes can be made to fail, which lets callers exercise the
/// fallback and rollback paths without a database.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    document: Option<StoredDocument>,
    fail_reads: bool,
    fail_writes: bool,
    fetch_count: usize,
}

impl MemoryDocumentStore {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            document: None,
            fail_reads: false,
            fail_writes: false,
            fetch_count: 0,
        }
    }

    /// Creates a store that already holds `body` at version 1.
    #[must_use]
    pub fn with_body(body: impl Into<String>) -> Self {
        Self {
            document: Some(StoredDocument {
                body: body.into(),
                version: 1,
            }),
            ..Self::new()
        }
    }

    pub const fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    pub const fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    /// The stored document, bypassing failure injection.
    #[must_use]
    pub const fn document(&self) -> Option<&StoredDocument> {
        self.document.as_ref()
    }

    /// How many times `fetch` has been called.
    #[must_use]
    pub const fn fetch_count(&self) -> usize {
        self.fetch_count
    }

    /// Replaces the document as another writer would, bumping the version.
    pub fn overwrite(&mut self, body: impl Into<String>) {
        let version: i64 = self.current_version() + 1;
        self.document = Some(StoredDocument {
            body: body.into(),
            version,
        });
    }

    fn current_version(&self) -> i64 {
        self.document.as_ref().map_or(0, |doc| doc.version)
    }
}

impl DocumentStore for MemoryDocumentStore {
    fn fetch(&mut self) -> Result<Option<StoredDocument>, PersistenceError> {
        self.fetch_count += 1;
        if self.fail_reads {
            return Err(PersistenceError::Unavailable(String::from(
                "read failure injected",
            )));
        }
        Ok(self.document.clone())
    }

    fn store(
        &mut self,
        body: &str,
        expected_version: Option<i64>,
    ) -> Result<i64, PersistenceError> {
        if self.fail_writes {
            return Err(PersistenceError::Unavailable(String::from(
                "write failure injected",
            )));
        }
        let current: i64 = self.current_version();
        if let Some(expected) = expected_version.filter(|expected| *expected != current) {
            return Err(PersistenceError::VersionConflict {
                expected,
                actual: current,
            });
        }
        self.overwrite(body);
        Ok(current + 1)
    }
}
