// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the meeting roster.
//!
//! Requests arrive as plain strings and JSON values. This crate parses them
//! into domain types, runs them through the roster session and translates
//! every failure into an [`ApiError`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod export;
mod handlers;
mod import;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{ApiError, translate_commit_error, translate_core_error, translate_domain_error};
pub use export::{schedule_file_name, schedule_to_csv};
pub use handlers::{
    EXPORT_SUCCESS_MESSAGE, add_roster_person, assign, clear_past_assignments, export_document,
    get_schedule, import_document, list_candidates, load_document, parse_date, parse_role,
    reload_document, remove_roster_person, save_settings, schedule_csv,
};
pub use import::{ImportValidationError, export_file_name, export_json, parse_import};
pub use request_response::{
    AssignRequest, CandidatesQuery, CandidatesResponse, ClearPastRequest, CsvExport,
    DocumentResponse, ExportResponse, MutationResponse, PersonRequest, SaveSettingsRequest,
    ScheduleQuery,
};
