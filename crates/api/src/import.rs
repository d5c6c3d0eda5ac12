// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backup export and import of the whole roster document.

use meeting_roster::RosterState;
use meeting_roster_domain::DateKey;
use serde_json::Value;
use thiserror::Error;

/// Reasons an import file is refused before anything changes.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ImportValidationError {
    /// The file is not JSON.
    #[error("Import file is not valid JSON: {0}")]
    InvalidJson(String),

    /// The top level is not an object.
    #[error("Import file must contain a JSON object")]
    NotAnObject,

    /// `assignments` is missing or not an object.
    #[error("Import file must contain an 'assignments' object")]
    AssignmentsNotAnObject,

    /// `settings` is missing or not an object.
    #[error("Import file must contain a 'settings' object")]
    SettingsNotAnObject,

    /// `settings.people` is missing or not an array.
    #[error("'settings.people' must be an array")]
    PeopleNotAnArray,

    /// `settings.meetingDays` is missing or not an array.
    #[error("'settings.meetingDays' must be an array")]
    MeetingDaysNotAnArray,

    /// The structure is right but a value cannot be decoded.
    #[error("Import file has invalid content: {0}")]
    InvalidContent(String),
}

/// Validates and decodes an import file.
///
/// The structure is checked first (object, `assignments` object,
/// `settings.people` and `settings.meetingDays` arrays), then the values are
/// decoded into typed data.
///
/// # Errors
///
/// Returns the first structural or content problem found.
pub fn parse_import(body: &str) -> Result<RosterState, ImportValidationError> {
    let value: Value =
        serde_json::from_str(body).map_err(|e| ImportValidationError::InvalidJson(e.to_string()))?;

    let object: &serde_json::Map<String, Value> =
        value.as_object().ok_or(ImportValidationError::NotAnObject)?;
    if !object.get("assignments").is_some_and(Value::is_object) {
        return Err(ImportValidationError::AssignmentsNotAnObject);
    }
    let settings: &serde_json::Map<String, Value> = object
        .get("settings")
        .and_then(Value::as_object)
        .ok_or(ImportValidationError::SettingsNotAnObject)?;
    if !settings.get("people").is_some_and(Value::is_array) {
        return Err(ImportValidationError::PeopleNotAnArray);
    }
    if !settings.get("meetingDays").is_some_and(Value::is_array) {
        return Err(ImportValidationError::MeetingDaysNotAnArray);
    }

    serde_json::from_value(value).map_err(|e| ImportValidationError::InvalidContent(e.to_string()))
}

/// Serializes the document as the pretty-printed backup file.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn export_json(state: &RosterState) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(state)
}

/// The suggested backup file name for a given day.
#[must_use]
pub fn export_file_name(today: DateKey) -> String {
    format!("backup_designacoes_{today}.json")
}
