// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Boundary operations over a roster session and its persistence gateway.
//!
//! Every mutating handler goes through `RosterSession::commit`, so the
//! visible state changes before the write and is rolled back if the write
//! fails. Input is parsed here and all lower-layer errors are translated to
//! `ApiError`.

use crate::error::{ApiError, translate_commit_error, translate_domain_error};
use crate::export::{schedule_file_name, schedule_to_csv};
use crate::import::{export_file_name, export_json, parse_import};
use crate::request_response::{
    AssignRequest, CandidatesQuery, CandidatesResponse, ClearPastRequest, CsvExport,
    DocumentResponse, ExportResponse, MutationResponse, PersonRequest, SaveSettingsRequest,
    ScheduleQuery,
};
use meeting_roster::{Mutation, NotificationKind, NotificationSink, RosterSession, RosterState};
use meeting_roster_domain::{
    Candidate, DateKey, Period, RecencyWindow, Role, Schedule, ScheduleFormat, Settings,
    add_person, build_schedule, candidates, meeting_dates, remove_person,
};
use meeting_roster_persistence::{DocumentStore, PersistenceGateway};
use tracing::{debug, info};

/// The message shown after a backup file is produced.
pub const EXPORT_SUCCESS_MESSAGE: &str = "Dados exportados com sucesso!";

/// Parses a `YYYY-MM-DD` date from a request.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the text is not a calendar date.
pub fn parse_date(value: &str) -> Result<DateKey, ApiError> {
    value.parse::<DateKey>().map_err(translate_domain_error)
}

/// Parses a role display name from a request.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if no role has that name.
pub fn parse_role(value: &str) -> Result<Role, ApiError> {
    value.parse::<Role>().map_err(translate_domain_error)
}

fn parse_optional<T>(
    value: Option<&str>,
    parse: impl FnOnce(&str) -> Result<T, meeting_roster_domain::DomainError>,
) -> Result<Option<T>, ApiError> {
    value.map(parse).transpose().map_err(translate_domain_error)
}

fn document_response<S: DocumentStore>(
    session: &RosterSession,
    gateway: &PersistenceGateway<S>,
) -> DocumentResponse {
    DocumentResponse {
        document: session.state().clone(),
        version: gateway.version(),
    }
}

fn run_mutation<S, N>(
    session: &mut RosterSession,
    gateway: &mut PersistenceGateway<S>,
    sink: &N,
    mutation: Mutation,
) -> Result<MutationResponse, ApiError>
where
    S: DocumentStore,
    N: NotificationSink + ?Sized,
{
    let name: &'static str = mutation.name();
    let success: &'static str = mutation.messages().success;

    let document: RosterState = session
        .commit(mutation, gateway, sink)
        .map_err(translate_commit_error)?
        .clone();

    Ok(MutationResponse {
        mutation: name.to_string(),
        message: success.to_string(),
        kind: NotificationKind::Success,
        document,
        version: gateway.version(),
    })
}

/// Returns the visible document and its stored version.
#[must_use]
pub fn load_document<S: DocumentStore>(
    session: &RosterSession,
    gateway: &PersistenceGateway<S>,
) -> DocumentResponse {
    document_response(session, gateway)
}

/// Re-reads the stored document and shows it.
///
/// Used after a write failed because another writer changed the document.
///
/// # Errors
///
/// Returns an error if the store cannot be read. The visible state and the
/// cached version are left untouched.
pub fn reload_document<S: DocumentStore>(
    session: &mut RosterSession,
    gateway: &mut PersistenceGateway<S>,
) -> Result<DocumentResponse, ApiError> {
    let state: RosterState = gateway
        .reload()
        .map_err(|err| ApiError::PersistenceFailed {
            message: err.to_string(),
        })?
        .clone();
    info!(version = ?gateway.version(), "Reloaded roster document");
    session.reset(state);
    Ok(document_response(session, gateway))
}

/// Lists the people who may be picked for a role on a date.
///
/// # Arguments
///
/// * `session` - The roster session
/// * `query` - The date and role being edited
/// * `window` - How recent an assignment must be to be flagged
///
/// # Errors
///
/// Returns an error if the date or role cannot be parsed.
pub fn list_candidates(
    session: &RosterSession,
    query: &CandidatesQuery,
    window: RecencyWindow,
) -> Result<CandidatesResponse, ApiError> {
    let date: DateKey = parse_date(&query.date)?;
    let role: Role = parse_role(&query.role)?;
    let state: &RosterState = session.state();

    let picked: Vec<Candidate> = candidates(
        &state.assignments,
        &state.settings.people,
        date,
        role,
        session.policy(),
        window,
    );

    Ok(CandidatesResponse {
        date: date.to_string(),
        role: role.to_string(),
        recency_window_days: window.days(),
        current: state
            .assignments
            .role(&date, role)
            .map(|value| value.person.clone()),
        candidates: picked,
    })
}

/// Assigns, reassigns or clears one role on one date.
///
/// # Errors
///
/// Returns an error if:
/// - The date or role cannot be parsed
/// - The person is not on the roster, not eligible, or busy that day
/// - The write fails (the change is rolled back)
pub fn assign<S, N>(
    session: &mut RosterSession,
    gateway: &mut PersistenceGateway<S>,
    sink: &N,
    request: AssignRequest,
) -> Result<MutationResponse, ApiError>
where
    S: DocumentStore,
    N: NotificationSink + ?Sized,
{
    let date: DateKey = parse_date(&request.date)?;
    let role: Role = parse_role(&request.role)?;
    debug!(%date, %role, person = %request.person, "Assign requested");

    run_mutation(
        session,
        gateway,
        sink,
        Mutation::Assign {
            date,
            role,
            person: request.person,
            note: request.note,
        },
    )
}

/// Replaces the settings and prunes assignments of removed people.
///
/// # Errors
///
/// Returns an error if the settings are invalid or the write fails.
pub fn save_settings<S, N>(
    session: &mut RosterSession,
    gateway: &mut PersistenceGateway<S>,
    sink: &N,
    request: SaveSettingsRequest,
) -> Result<MutationResponse, ApiError>
where
    S: DocumentStore,
    N: NotificationSink + ?Sized,
{
    run_mutation(
        session,
        gateway,
        sink,
        Mutation::SaveSettings {
            settings: Settings::from(request),
        },
    )
}

/// Adds one name to the roster and saves the settings.
///
/// # Errors
///
/// Returns an error if the name is empty, already present (ignoring case),
/// or the write fails.
pub fn add_roster_person<S, N>(
    session: &mut RosterSession,
    gateway: &mut PersistenceGateway<S>,
    sink: &N,
    request: &PersonRequest,
) -> Result<MutationResponse, ApiError>
where
    S: DocumentStore,
    N: NotificationSink + ?Sized,
{
    let current: &Settings = &session.state().settings;
    let people: Vec<String> =
        add_person(&current.people, &request.name).map_err(translate_domain_error)?;
    let settings: Settings = Settings::new(current.meeting_days.clone(), people);

    run_mutation(session, gateway, sink, Mutation::SaveSettings { settings })
}

/// Removes one name from the roster, with its assignments, and saves.
///
/// # Errors
///
/// Returns an error if the name is not on the roster or the write fails.
pub fn remove_roster_person<S, N>(
    session: &mut RosterSession,
    gateway: &mut PersistenceGateway<S>,
    sink: &N,
    request: &PersonRequest,
) -> Result<MutationResponse, ApiError>
where
    S: DocumentStore,
    N: NotificationSink + ?Sized,
{
    let current: &Settings = &session.state().settings;
    let people: Vec<String> =
        remove_person(&current.people, &request.name).map_err(translate_domain_error)?;
    let settings: Settings = Settings::new(current.meeting_days.clone(), people);

    run_mutation(session, gateway, sink, Mutation::SaveSettings { settings })
}

/// Drops every assignment dated before the first day of the current month.
///
/// # Arguments
///
/// * `today` - The server's date, used unless the request names one
///
/// # Errors
///
/// Returns an error if the requested date is invalid or the write fails.
pub fn clear_past_assignments<S, N>(
    session: &mut RosterSession,
    gateway: &mut PersistenceGateway<S>,
    sink: &N,
    request: &ClearPastRequest,
    today: DateKey,
) -> Result<MutationResponse, ApiError>
where
    S: DocumentStore,
    N: NotificationSink + ?Sized,
{
    let today: DateKey =
        parse_optional(request.today.as_deref(), str::parse::<DateKey>)?.unwrap_or(today);

    run_mutation(session, gateway, sink, Mutation::ClearPast { today })
}

/// Replaces the whole document with an uploaded backup.
///
/// # Errors
///
/// Returns `ApiError::InvalidInput` if the file fails validation, in which
/// case nothing changes and no notification is sent. Returns
/// `ApiError::PersistenceFailed` if the write fails.
pub fn import_document<S, N>(
    session: &mut RosterSession,
    gateway: &mut PersistenceGateway<S>,
    sink: &N,
    body: &str,
) -> Result<MutationResponse, ApiError>
where
    S: DocumentStore,
    N: NotificationSink + ?Sized,
{
    let document: RosterState = parse_import(body)?;
    info!(
        dates = document.assignments.len(),
        people = document.settings.people.len(),
        "Importing roster document"
    );

    run_mutation(session, gateway, sink, Mutation::Import { document })
}

/// Produces the backup file for the visible document.
///
/// # Errors
///
/// Returns `ApiError::Internal` if serialization fails.
pub fn export_document(
    session: &RosterSession,
    today: DateKey,
) -> Result<ExportResponse, ApiError> {
    let body: String = export_json(session.state()).map_err(|e| ApiError::Internal {
        message: format!("Failed to serialize document: {e}"),
    })?;

    Ok(ExportResponse {
        file_name: export_file_name(today),
        body,
        message: EXPORT_SUCCESS_MESSAGE.to_string(),
    })
}

/// Lays out the assignments of a week or month.
///
/// # Errors
///
/// Returns an error if the period, date or format cannot be parsed.
pub fn get_schedule(
    session: &RosterSession,
    query: &ScheduleQuery,
    today: DateKey,
) -> Result<Schedule, ApiError> {
    let period: Period =
        parse_optional(query.period.as_deref(), str::parse::<Period>)?.unwrap_or_default();
    let cursor: DateKey =
        parse_optional(query.date.as_deref(), str::parse::<DateKey>)?.unwrap_or(today);
    let format: ScheduleFormat =
        parse_optional(query.format.as_deref(), str::parse::<ScheduleFormat>)?
            .unwrap_or_default();

    let state: &RosterState = session.state();
    let dates: Vec<DateKey> = meeting_dates(period, cursor, &state.settings.meeting_days)
        .map_err(translate_domain_error)?;

    Ok(build_schedule(
        &state.assignments,
        &dates,
        period,
        cursor,
        format,
    ))
}

/// Exports a schedule table as CSV.
///
/// The table format is always used so every meeting date gets a row.
///
/// # Errors
///
/// Returns an error if the query cannot be parsed or the CSV cannot be written.
pub fn schedule_csv(
    session: &RosterSession,
    query: &ScheduleQuery,
    today: DateKey,
) -> Result<CsvExport, ApiError> {
    let table_query: ScheduleQuery = ScheduleQuery {
        format: Some(String::from("table")),
        ..query.clone()
    };
    let schedule: Schedule = get_schedule(session, &table_query, today)?;
    let cursor: String = query
        .date
        .clone()
        .unwrap_or_else(|| today.to_string());

    Ok(CsvExport {
        file_name: schedule_file_name(&schedule, &cursor),
        body: schedule_to_csv(&schedule)?,
    })
}
