//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the routine
//! service for business logic.

use axum::{
    extract::{Path, State},
    Json,
};

use super::dto::{
    GenerateRoutineRequest, HealthResponse, RunDetailResponse, RunDto, RunListResponse,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{RunId, SemesterOfferingId};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// GET /health
///
/// Health check endpoint to verify the service is running and the store is
/// accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match state.repository.health_check().await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

/// POST /v1/routines/generate
///
/// Generate a routine for a semester offering. Partial placement is not an
/// error: the response carries a FAILED run whose report explains what was
/// left unplaced.
pub async fn generate_routine(
    State(state): State<AppState>,
    Json(request): Json<GenerateRoutineRequest>,
) -> HandlerResult<RunDto> {
    let run = state.service.generate(request.semester_offering_id).await?;
    Ok(Json(run.into()))
}

/// GET /v1/routines/{id}
///
/// Fetch a schedule run with its per-slot entries.
pub async fn get_run(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<RunDetailResponse> {
    let run_id = RunId::new(id);
    let run = state.service.get_run(run_id).await?;
    let entries = state.service.entries_for_run(run_id).await?;
    Ok(Json(RunDetailResponse {
        run: run.into(),
        entries,
    }))
}

/// GET /v1/routines/semester-offering/{semester_offering_id}
///
/// List schedule runs for a semester offering, most recent first.
pub async fn list_runs_for_offering(
    State(state): State<AppState>,
    Path(semester_offering_id): Path<i64>,
) -> HandlerResult<RunListResponse> {
    let runs = state
        .service
        .runs_for_offering(SemesterOfferingId::new(semester_offering_id))
        .await?;
    let runs: Vec<RunDto> = runs.into_iter().map(Into::into).collect();
    let total = runs.len();
    Ok(Json(RunListResponse { runs, total }))
}

/// POST /v1/routines/{id}/commit
///
/// Commit a DRAFT run. Refused with 409 when the run is not a draft or when
/// re-validation detects a conflict with the committed schedule.
pub async fn commit_run(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<RunDto> {
    let run = state.service.commit(RunId::new(id)).await?;
    Ok(Json(run.into()))
}

/// POST /v1/routines/{id}/cancel
///
/// Cancel a non-committed run; its entries are removed.
pub async fn cancel_run(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<RunDto> {
    let run = state.service.cancel(RunId::new(id)).await?;
    Ok(Json(run.into()))
}

/// DELETE /v1/routines/{id}
///
/// Delete a non-committed run with its blocks and entries.
pub async fn delete_run(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<axum::http::StatusCode, AppError> {
    state.service.delete(RunId::new(id)).await?;
    Ok(axum::http::StatusCode::NO_CONTENT)
}
