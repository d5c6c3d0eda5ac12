// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::diesel_schema::documents;
use diesel::prelude::*;

/// A stored document row.
#[derive(Debug, Clone, PartialEq, Eq, Queryable, Selectable)]
#[diesel(table_name = documents)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct DocumentRow {
    pub document_key: String,
    pub body: String,
    pub version: i64,
    pub updated_at: String,
}

/// Values for inserting a document row.
#[derive(Debug, Insertable)]
#[diesel(table_name = documents)]
pub struct NewDocumentRow<'a> {
    pub document_key: &'a str,
    pub body: &'a str,
    pub version: i64,
    pub updated_at: &'a str,
}
