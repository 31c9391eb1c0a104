//! Data Transfer Objects for the HTTP API.

use serde::{Deserialize, Serialize};

use crate::api::{RunId, SemesterOfferingId};
use crate::models::{RunStatus, ScheduleEntry, ScheduleRun};

/// Request body for routine generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRoutineRequest {
    pub semester_offering_id: SemesterOfferingId,
}

/// A schedule run as returned by the API. `report` is the run's meta JSON
/// parsed back into a structured value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunDto {
    pub id: RunId,
    pub semester_offering_id: SemesterOfferingId,
    pub status: RunStatus,
    pub algorithm_version: String,
    pub generated_at: chrono::DateTime<chrono::Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub committed_at: Option<chrono::DateTime<chrono::Utc>>,
    pub report: serde_json::Value,
}

impl From<ScheduleRun> for RunDto {
    fn from(run: ScheduleRun) -> Self {
        let report = serde_json::from_str(&run.meta).unwrap_or(serde_json::Value::Null);
        Self {
            id: run.id,
            semester_offering_id: run.semester_offering_id,
            status: run.status,
            algorithm_version: run.algorithm_version,
            generated_at: run.generated_at,
            committed_at: run.committed_at,
            report,
        }
    }
}

/// A run together with its per-slot entries, for timetable rendering.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunDetailResponse {
    #[serde(flatten)]
    pub run: RunDto,
    pub entries: Vec<ScheduleEntry>,
}

/// Run list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunListResponse {
    pub runs: Vec<RunDto>,
    pub total: usize,
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Repository connection status
    pub database: String,
}
