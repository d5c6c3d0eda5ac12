// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only document queries.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::DocumentRow;
use crate::diesel_schema::documents;
use crate::error::PersistenceError;

/// Loads a document row by key.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `key` - The document key
///
/// # Returns
///
/// * `Ok(None)` if no document has been stored under `key`
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_document(
    conn: &mut SqliteConnection,
    key: &str,
) -> Result<Option<DocumentRow>, PersistenceError> {
    documents::table
        .filter(documents::document_key.eq(key))
        .select(DocumentRow::as_select())
        .first(conn)
        .optional()
        .map_err(Into::into)
}

/// Returns the stored version of a document, or 0 if it does not exist.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_document_version(
    conn: &mut SqliteConnection,
    key: &str,
) -> Result<i64, PersistenceError> {
    let version: Option<i64> = documents::table
        .filter(documents::document_key.eq(key))
        .select(documents::version)
        .first::<i64>(conn)
        .optional()?;
    Ok(version.unwrap_or(0))
}
