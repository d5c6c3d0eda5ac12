// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

mod live;

use axum::{
    Json, Router,
    extract::{FromRef, Query, State as AxumState},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use live::{LiveEvent, LiveEventBroadcaster, live_events_handler};
use meeting_roster::{Notification, NotificationSink, RosterConfig, RosterSession, RosterState};
use meeting_roster_api::{
    ApiError, AssignRequest, CandidatesQuery, CandidatesResponse, ClearPastRequest, CsvExport,
    DocumentResponse, ExportResponse, MutationResponse, PersonRequest, SaveSettingsRequest,
    ScheduleQuery, add_roster_person, assign, clear_past_assignments, export_document,
    get_schedule, import_document, list_candidates, load_document, reload_document,
    remove_roster_person, save_settings, schedule_csv,
};
use meeting_roster_domain::{DateKey, RecencyWindow, RestrictionPolicy, Schedule};
use meeting_roster_persistence::{PersistenceGateway, SqliteDocumentStore};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Meeting roster server - HTTP server for meeting role assignments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// Path to a JSON roster configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Days after an assignment during which a person is flagged as recent.
    /// Overrides the configuration file.
    #[arg(long)]
    recency_window_days: Option<u32>,
}

/// The visible session and the gateway it writes through.
struct Roster {
    session: RosterSession,
    gateway: PersistenceGateway<SqliteDocumentStore>,
}

/// Application state shared across handlers.
///
/// The roster sits behind one mutex so mutations run one at a time.
#[derive(Clone)]
struct AppState {
    roster: Arc<Mutex<Roster>>,
    broadcaster: Arc<LiveEventBroadcaster>,
    recency_window: RecencyWindow,
}

impl FromRef<AppState> for Arc<LiveEventBroadcaster> {
    fn from_ref(app_state: &AppState) -> Self {
        Arc::clone(&app_state.broadcaster)
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
#[derive(Debug)]
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match &err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::PersistenceFailed { .. } => {
                warn!(error = %err, "Mutation rolled back");
                StatusCode::SERVICE_UNAVAILABLE
            }
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            message: err.to_string(),
        }
    }
}

/// The server's calendar date.
fn today() -> DateKey {
    DateKey::new(time::OffsetDateTime::now_utc().date())
}

/// Tells live clients the stored document moved on.
fn announce_change(app_state: &AppState, response: &MutationResponse) {
    app_state.broadcaster.broadcast(&LiveEvent::DocumentChanged {
        version: response.version,
    });
}

/// Handler for GET `/document` endpoint.
async fn handle_get_document(AxumState(app_state): AxumState<AppState>) -> Json<DocumentResponse> {
    let roster = app_state.roster.lock().await;
    Json(load_document(&roster.session, &roster.gateway))
}

/// Handler for POST `/document/reload` endpoint.
///
/// Drops the cache and shows what is stored now.
async fn handle_reload_document(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<DocumentResponse>, HttpError> {
    let mut roster = app_state.roster.lock().await;
    let Roster { session, gateway } = &mut *roster;
    Ok(Json(reload_document(session, gateway)?))
}

/// Handler for GET `/candidates` endpoint.
async fn handle_list_candidates(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<CandidatesQuery>,
) -> Result<Json<CandidatesResponse>, HttpError> {
    let roster = app_state.roster.lock().await;
    let response: CandidatesResponse =
        list_candidates(&roster.session, &query, app_state.recency_window)?;
    Ok(Json(response))
}

/// Handler for POST `/assignments` endpoint.
async fn handle_assign(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<AssignRequest>,
) -> Result<Json<MutationResponse>, HttpError> {
    info!(date = %req.date, role = %req.role, person = %req.person, "Handling assign request");

    let mut roster = app_state.roster.lock().await;
    let Roster { session, gateway } = &mut *roster;
    let response: MutationResponse = assign(session, gateway, app_state.broadcaster.as_ref(), req)?;
    drop(roster);

    announce_change(&app_state, &response);
    Ok(Json(response))
}

/// Handler for POST `/settings` endpoint.
async fn handle_save_settings(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<SaveSettingsRequest>,
) -> Result<Json<MutationResponse>, HttpError> {
    info!(
        people = req.people.len(),
        meeting_days = ?req.meeting_days,
        "Handling save_settings request"
    );

    let mut roster = app_state.roster.lock().await;
    let Roster { session, gateway } = &mut *roster;
    let response: MutationResponse =
        save_settings(session, gateway, app_state.broadcaster.as_ref(), req)?;
    drop(roster);

    announce_change(&app_state, &response);
    Ok(Json(response))
}

/// Handler for POST `/settings/people` endpoint.
async fn handle_add_person(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<PersonRequest>,
) -> Result<Json<MutationResponse>, HttpError> {
    info!(name = %req.name, "Handling add_person request");

    let mut roster = app_state.roster.lock().await;
    let Roster { session, gateway } = &mut *roster;
    let response: MutationResponse =
        add_roster_person(session, gateway, app_state.broadcaster.as_ref(), &req)?;
    drop(roster);

    announce_change(&app_state, &response);
    Ok(Json(response))
}

/// Handler for POST `/settings/people/remove` endpoint.
async fn handle_remove_person(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<PersonRequest>,
) -> Result<Json<MutationResponse>, HttpError> {
    info!(name = %req.name, "Handling remove_person request");

    let mut roster = app_state.roster.lock().await;
    let Roster { session, gateway } = &mut *roster;
    let response: MutationResponse =
        remove_roster_person(session, gateway, app_state.broadcaster.as_ref(), &req)?;
    drop(roster);

    announce_change(&app_state, &response);
    Ok(Json(response))
}

/// Handler for POST `/assignments/clear_past` endpoint.
async fn handle_clear_past(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<ClearPastRequest>,
) -> Result<Json<MutationResponse>, HttpError> {
    info!(today = ?req.today, "Handling clear_past request");

    let mut roster = app_state.roster.lock().await;
    let Roster { session, gateway } = &mut *roster;
    let response: MutationResponse = clear_past_assignments(
        session,
        gateway,
        app_state.broadcaster.as_ref(),
        &req,
        today(),
    )?;
    drop(roster);

    announce_change(&app_state, &response);
    Ok(Json(response))
}

/// Handler for POST `/import` endpoint.
///
/// The body is the raw backup file.
async fn handle_import(
    AxumState(app_state): AxumState<AppState>,
    body: String,
) -> Result<Json<MutationResponse>, HttpError> {
    info!(bytes = body.len(), "Handling import request");

    let mut roster = app_state.roster.lock().await;
    let Roster { session, gateway } = &mut *roster;
    let response: MutationResponse =
        import_document(session, gateway, app_state.broadcaster.as_ref(), &body)?;
    drop(roster);

    announce_change(&app_state, &response);
    Ok(Json(response))
}

/// Handler for GET `/export` endpoint.
async fn handle_export(AxumState(app_state): AxumState<AppState>) -> Result<Response, HttpError> {
    let roster = app_state.roster.lock().await;
    let export: ExportResponse = export_document(&roster.session, today())?;
    drop(roster);

    info!(file_name = %export.file_name, "Exported roster document");
    app_state
        .broadcaster
        .notify(Notification::success(export.message));

    Ok((
        [
            (header::CONTENT_TYPE, String::from("application/json")),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.file_name),
            ),
        ],
        export.body,
    )
        .into_response())
}

/// Handler for GET `/schedule` endpoint.
async fn handle_get_schedule(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Json<Schedule>, HttpError> {
    let roster = app_state.roster.lock().await;
    let schedule: Schedule = get_schedule(&roster.session, &query, today())?;
    Ok(Json(schedule))
}

/// Handler for GET `/schedule.csv` endpoint.
async fn handle_schedule_csv(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ScheduleQuery>,
) -> Result<Response, HttpError> {
    let roster = app_state.roster.lock().await;
    let export: CsvExport = schedule_csv(&roster.session, &query, today())?;
    drop(roster);

    Ok((
        [
            (header::CONTENT_TYPE, String::from("text/csv; charset=utf-8")),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", export.file_name),
            ),
        ],
        export.body,
    )
        .into_response())
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/document", get(handle_get_document))
        .route("/document/reload", post(handle_reload_document))
        .route("/candidates", get(handle_list_candidates))
        .route("/assignments", post(handle_assign))
        .route("/assignments/clear_past", post(handle_clear_past))
        .route("/settings", post(handle_save_settings))
        .route("/settings/people", post(handle_add_person))
        .route("/settings/people/remove", post(handle_remove_person))
        .route("/import", post(handle_import))
        .route("/export", get(handle_export))
        .route("/schedule", get(handle_get_schedule))
        .route("/schedule.csv", get(handle_schedule_csv))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}

/// Loads the stored document and wires the shared state.
///
/// # Errors
///
/// Returns an error if the restriction codes in `config` are invalid.
fn create_app_state(
    config: &RosterConfig,
    store: SqliteDocumentStore,
) -> Result<AppState, Box<dyn std::error::Error>> {
    let policy: RestrictionPolicy = config.restriction_policy()?;
    let mut gateway: PersistenceGateway<SqliteDocumentStore> =
        PersistenceGateway::new(store, config.default_state());
    let state: RosterState = gateway.initialize().clone();
    info!(
        dates = state.assignments.len(),
        people = state.settings.people.len(),
        version = ?gateway.version(),
        "Loaded roster document"
    );

    Ok(AppState {
        roster: Arc::new(Mutex::new(Roster {
            session: RosterSession::new(state, policy),
            gateway,
        })),
        broadcaster: Arc::new(LiveEventBroadcaster::new()),
        recency_window: config.recency_window(),
    })
}

fn load_config(args: &Args) -> Result<RosterConfig, Box<dyn std::error::Error>> {
    let mut config: RosterConfig = match &args.config {
        Some(path) => {
            info!("Loading configuration from: {}", path);
            RosterConfig::from_json(&std::fs::read_to_string(path)?)?
        }
        None => RosterConfig::default(),
    };
    if let Some(days) = args.recency_window_days {
        config.recency_window_days = days;
    }
    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing meeting roster server");

    let config: RosterConfig = load_config(&args)?;

    let store: SqliteDocumentStore = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        SqliteDocumentStore::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        SqliteDocumentStore::new_in_memory()?
    };

    let app_state: AppState = create_app_state(&config, store)?;

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
