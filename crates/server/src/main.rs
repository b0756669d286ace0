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

use axum::{
    Json, Router,
    extract::{
        Path, Query, State as AxumState,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use shiftcycle::{EngineConfig, MutationExecutor, PatternEngine, StaticIdentity, SystemClock};
use shiftcycle_api::{
    ApiError, CreatePatternResponse, DeletePatternResponse, ListPatternsResponse,
    ListShiftsResponse, PatternInfo, PatternStatisticsRequest, PatternStatisticsResponse,
    PreviewPatternRequest, PreviewPatternResponse, ResolveScheduleResponse, SavePatternRequest,
    ScheduleRangeRequest, ScheduleRangeResponse, ShiftInfo, UpdatePatternResponse,
    UpsertShiftRequest, ValidatePatternResponse,
};
use shiftcycle_domain::DecodeMode;
use shiftcycle_persistence::Persistence;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{error, info};

/// Shiftcycle Server - HTTP server for recurring work-shift patterns
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "SHIFTCYCLE_DATABASE")]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// User on whose behalf patterns are managed
    #[arg(long, env = "SHIFTCYCLE_USER_ID", default_value_t = 1)]
    user_id: i64,

    /// Team recorded on new assignments
    #[arg(long, env = "SHIFTCYCLE_TEAM", default_value = "default")]
    team: String,

    /// Maximum number of mutations running at once
    #[arg(long, default_value_t = 4)]
    mutation_workers: usize,

    /// Recover partial patterns from corrupt stored payloads instead of failing
    #[arg(long)]
    lenient_decode: bool,
}

impl Args {
    const fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            mutation_workers: self.mutation_workers,
            decode_mode: if self.lenient_decode {
                DecodeMode::Lenient
            } else {
                DecodeMode::Strict
            },
        }
    }
}

/// Application state shared across handlers.
///
/// Mutations go through the executor; reads lock its store directly.
#[derive(Clone)]
struct AppState {
    executor: MutationExecutor<Persistence>,
}

impl AppState {
    async fn store(&self) -> MutexGuard<'_, Persistence> {
        self.executor.store().lock().await
    }

    fn engine(&self) -> &PatternEngine {
        self.executor.engine()
    }
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Stable failure kind.
    kind: String,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The failure kind reported to the caller.
    kind: &'static str,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            kind: self.kind.to_string(),
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
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::UnreadablePattern { .. }
            | ApiError::StorageFailure { .. }
            | ApiError::Internal { .. } => {
                error!(error = %err, "Request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

impl HttpError {
    fn malformed(message: String) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            kind: "validation",
            message,
        }
    }
}

impl From<JsonRejection> for HttpError {
    fn from(rejection: JsonRejection) -> Self {
        Self::malformed(format!("Malformed request body: {}", rejection.body_text()))
    }
}

impl From<PathRejection> for HttpError {
    fn from(rejection: PathRejection) -> Self {
        Self::malformed(format!("Malformed path: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for HttpError {
    fn from(rejection: QueryRejection) -> Self {
        Self::malformed(format!("Malformed query: {}", rejection.body_text()))
    }
}

/// Handler for POST `/shifts` endpoint.
async fn handle_upsert_shift(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<UpsertShiftRequest>, JsonRejection>,
) -> Result<Json<ShiftInfo>, HttpError> {
    let Json(req) = payload?;
    info!(shift_id = %req.shift_id, "Handling upsert_shift request");
    let mut store = app_state.store().await;
    Ok(Json(shiftcycle_api::upsert_shift(&mut store, &req)?))
}

/// Handler for GET `/shifts` endpoint.
async fn handle_list_shifts(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListShiftsResponse>, HttpError> {
    let mut store = app_state.store().await;
    Ok(Json(shiftcycle_api::list_shifts(&mut store)?))
}

/// Handler for POST `/patterns` endpoint.
async fn handle_create_pattern(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<SavePatternRequest>, JsonRejection>,
) -> Result<Json<CreatePatternResponse>, HttpError> {
    let Json(req) = payload?;
    info!(name = %req.name, days = req.days.len(), "Handling create_pattern request");
    Ok(Json(
        shiftcycle_api::create_pattern(&app_state.executor, &req).await?,
    ))
}

/// Handler for GET `/patterns` endpoint.
async fn handle_list_patterns(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<ListPatternsResponse>, HttpError> {
    let mut store = app_state.store().await;
    Ok(Json(shiftcycle_api::list_patterns(
        &mut store,
        app_state.engine(),
    )?))
}

/// Handler for GET `/patterns/{id}` endpoint.
async fn handle_get_pattern(
    AxumState(app_state): AxumState<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<PatternInfo>, HttpError> {
    let Path(assignment_id) = path?;
    let mut store = app_state.store().await;
    Ok(Json(shiftcycle_api::get_pattern(
        &mut store,
        app_state.engine(),
        assignment_id,
    )?))
}

/// Handler for PUT `/patterns/{id}` endpoint.
async fn handle_update_pattern(
    AxumState(app_state): AxumState<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<SavePatternRequest>, JsonRejection>,
) -> Result<Json<UpdatePatternResponse>, HttpError> {
    let Path(assignment_id) = path?;
    let Json(req) = payload?;
    info!(assignment_id, name = %req.name, "Handling update_pattern request");
    Ok(Json(
        shiftcycle_api::update_pattern(&app_state.executor, assignment_id, &req).await?,
    ))
}

/// Handler for DELETE `/patterns/{id}` endpoint.
async fn handle_delete_pattern(
    AxumState(app_state): AxumState<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> Result<Json<DeletePatternResponse>, HttpError> {
    let Path(assignment_id) = path?;
    info!(assignment_id, "Handling delete_pattern request");
    Ok(Json(
        shiftcycle_api::delete_pattern(&app_state.executor, assignment_id).await?,
    ))
}

/// Handler for POST `/patterns/validate` endpoint.
async fn handle_validate_pattern(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<SavePatternRequest>, JsonRejection>,
) -> Result<Json<ValidatePatternResponse>, HttpError> {
    let Json(req) = payload?;
    let mut store = app_state.store().await;
    Ok(Json(shiftcycle_api::validate_pattern(
        &mut store,
        app_state.engine(),
        &req,
    )?))
}

/// Handler for POST `/patterns/preview` endpoint.
async fn handle_preview_pattern(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<PreviewPatternRequest>, JsonRejection>,
) -> Result<Json<PreviewPatternResponse>, HttpError> {
    let Json(req) = payload?;
    let mut store = app_state.store().await;
    Ok(Json(shiftcycle_api::preview_pattern(
        &mut store,
        app_state.engine(),
        &req,
    )?))
}

/// Handler for POST `/patterns/statistics` endpoint.
async fn handle_pattern_statistics(
    AxumState(app_state): AxumState<AppState>,
    payload: Result<Json<PatternStatisticsRequest>, JsonRejection>,
) -> Result<Json<PatternStatisticsResponse>, HttpError> {
    let Json(req) = payload?;
    let mut store = app_state.store().await;
    Ok(Json(shiftcycle_api::pattern_statistics(
        &mut store,
        app_state.engine(),
        &req,
    )?))
}

/// Handler for GET `/schedule/{date}` endpoint.
async fn handle_resolve_schedule(
    AxumState(app_state): AxumState<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<ResolveScheduleResponse>, HttpError> {
    let Path(date) = path?;
    let mut store = app_state.store().await;
    Ok(Json(shiftcycle_api::resolve_schedule(
        &mut store,
        app_state.engine(),
        &date,
    )?))
}

/// Handler for GET `/patterns/{id}/schedule?from=&to=` endpoint.
async fn handle_resolve_schedule_range(
    AxumState(app_state): AxumState<AppState>,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<ScheduleRangeRequest>, QueryRejection>,
) -> Result<Json<ScheduleRangeResponse>, HttpError> {
    let Path(assignment_id) = path?;
    let Query(range) = query?;
    let mut store = app_state.store().await;
    Ok(Json(shiftcycle_api::resolve_schedule_range(
        &mut store,
        app_state.engine(),
        assignment_id,
        &range,
    )?))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/shifts", post(handle_upsert_shift).get(handle_list_shifts))
        .route(
            "/patterns",
            post(handle_create_pattern).get(handle_list_patterns),
        )
        .route("/patterns/validate", post(handle_validate_pattern))
        .route("/patterns/preview", post(handle_preview_pattern))
        .route("/patterns/statistics", post(handle_pattern_statistics))
        .route(
            "/patterns/{id}",
            get(handle_get_pattern)
                .put(handle_update_pattern)
                .delete(handle_delete_pattern),
        )
        .route(
            "/patterns/{id}/schedule",
            get(handle_resolve_schedule_range),
        )
        .route("/schedule/{date}", get(handle_resolve_schedule))
        .with_state(app_state)
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

    info!("Initializing Shiftcycle Server");

    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let config: EngineConfig = args.engine_config();
    info!(
        user_id = args.user_id,
        team = %args.team,
        mutation_workers = config.mutation_workers,
        decode_mode = ?config.decode_mode,
        "Engine configured"
    );

    let engine: PatternEngine = PatternEngine::new(
        Arc::new(StaticIdentity::new(args.user_id, args.team.clone())),
        Arc::new(SystemClock),
        config,
    );
    let app_state: AppState = AppState {
        executor: MutationExecutor::new(engine, Arc::new(Mutex::new(persistence))),
    };

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
