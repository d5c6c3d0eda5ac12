// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Document writes.

use diesel::SqliteConnection;
use diesel::prelude::*;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;
use tracing::debug;

use crate::data_models::NewDocumentRow;
use crate::diesel_schema::documents;
use crate::error::PersistenceError;
use crate::queries::get_document_version;

/// Stores a document body, replacing any previous body under the same key.
///
/// The read of the current version and the write happen in one immediate
/// transaction, so two writers cannot both pass the version check.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `key` - The document key
/// * `body` - The serialized document
/// * `expected_version` - The version the caller last read, or `None` to
///   write unconditionally
///
/// # Returns
///
/// The new version of the document.
///
/// # Errors
///
/// Returns an error if:
/// - The stored version differs from `expected_version`
/// - The database write fails
pub fn store_document(
    conn: &mut SqliteConnection,
    key: &str,
    body: &str,
    expected_version: Option<i64>,
) -> Result<i64, PersistenceError> {
    conn.immediate_transaction(|conn| {
        let current: i64 = get_document_version(conn, key)?;
        if let Some(expected) = expected_version.filter(|expected| *expected != current) {
            return Err(PersistenceError::VersionConflict {
                expected,
                actual: current,
            });
        }

        let version: i64 = current + 1;
        let updated_at: String = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|e| PersistenceError::SerializationError(e.to_string()))?;

        let row: NewDocumentRow<'_> = NewDocumentRow {
            document_key: key,
            body,
            version,
            updated_at: &updated_at,
        };

        diesel::insert_into(documents::table)
            .values(&row)
            .on_conflict(documents::document_key)
            .do_update()
            .set((
                documents::body.eq(body),
                documents::version.eq(version),
                documents::updated_at.eq(&updated_at),
            ))
            .execute(conn)?;

        debug!(key, version, "Stored document");
        Ok(version)
    })
}

