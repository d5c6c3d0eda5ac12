// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use meeting_roster::{NotificationKind, RosterState};
use meeting_roster_domain::{Candidate, Settings};

/// API request to assign a person to a role on a date.
///
/// An empty `person` clears the role.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AssignRequest {
    /// The meeting date (`YYYY-MM-DD`).
    pub date: String,
    /// The role display name (e.g. `"Leitura"`).
    pub role: String,
    /// The person's display name, or empty to unassign.
    #[serde(default)]
    pub person: String,
    /// Optional free-text note.
    #[serde(default)]
    pub note: Option<String>,
}

/// API request to replace the settings.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSettingsRequest {
    /// Meeting weekdays, Sunday is 0.
    pub meeting_days: Vec<u8>,
    /// Roster display names.
    pub people: Vec<String>,
}

impl From<SaveSettingsRequest> for Settings {
    fn from(request: SaveSettingsRequest) -> Self {
        Self::new(request.meeting_days, request.people)
    }
}

/// API request to add or remove one roster name.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PersonRequest {
    /// The display name.
    pub name: String,
}

/// API request to drop assignments before the current month.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClearPastRequest {
    /// Overrides the server's idea of today (`YYYY-MM-DD`).
    #[serde(default)]
    pub today: Option<String>,
}

/// Query for the candidate picker.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CandidatesQuery {
    /// The date being edited (`YYYY-MM-DD`).
    pub date: String,
    /// The role display name.
    pub role: String,
}

/// Query for a schedule listing or export.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ScheduleQuery {
    /// `week` (default) or `month`.
    #[serde(default)]
    pub period: Option<String>,
    /// The cursor date; today when absent.
    #[serde(default)]
    pub date: Option<String>,
    /// `list` (default) or `table`.
    #[serde(default)]
    pub format: Option<String>,
}

/// API response carrying the visible document.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DocumentResponse {
    /// The document, flattened to `assignments` and `settings`.
    #[serde(flatten)]
    pub document: RosterState,
    /// Version of the last stored document, when known.
    pub version: Option<i64>,
}

/// API response for a committed mutation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MutationResponse {
    /// The mutation that ran.
    pub mutation: String,
    /// The success message shown to the user.
    pub message: String,
    /// The notification kind for the message.
    pub kind: NotificationKind,
    /// The document after the mutation.
    #[serde(flatten)]
    pub document: RosterState,
    /// Version of the stored document after the write.
    pub version: Option<i64>,
}

/// API response for the candidate picker.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CandidatesResponse {
    /// The edited date.
    pub date: String,
    /// The edited role.
    pub role: String,
    /// The recency window in days.
    pub recency_window_days: u32,
    /// The person currently holding the role, if any.
    pub current: Option<String>,
    /// Eligible people, sorted by name.
    pub candidates: Vec<Candidate>,
}

/// A backup file ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportResponse {
    /// Suggested file name.
    pub file_name: String,
    /// Pretty-printed document.
    pub body: String,
    /// The message shown after a successful export.
    pub message: String,
}

/// A CSV schedule ready for download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvExport {
    /// Suggested file name.
    pub file_name: String,
    /// CSV text, header row first.
    pub body: String,
}
