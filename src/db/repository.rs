//! Repository trait and error types for schedule persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::api::{RunId, SemesterOfferingId, SessionId};
use crate::models::{ScheduleBlock, ScheduleEntry, ScheduleRun, SemesterOffering};

/// Result type for repository operations.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Error type for repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Requested entity was not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Data validation failed before or after a store operation.
    #[error("Data validation error: {0}")]
    Validation(String),

    /// Configuration or initialization error.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal/unexpected store errors.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RepositoryError {
    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}

/// Storage operations the routine engine depends on.
///
/// Reads cover the flattened semester offering snapshot and committed
/// entries of a session; writes cover the run / block / entry records a
/// generation produces and the run status transitions. Ids are assigned by
/// the store: `create_*` methods return the record with its id filled in.
#[async_trait]
pub trait RoutineRepository: Send + Sync {
    /// Load the flattened semester offering with its course offerings and
    /// their teacher/room assignments.
    async fn semester_offering(
        &self,
        id: SemesterOfferingId,
    ) -> RepositoryResult<SemesterOffering>;

    /// Insert a new schedule run; the returned run carries its assigned id.
    async fn create_run(&self, run: ScheduleRun) -> RepositoryResult<ScheduleRun>;

    /// Fetch a run by id.
    async fn run(&self, id: RunId) -> RepositoryResult<ScheduleRun>;

    /// Runs generated for a semester offering, most recent first.
    async fn runs_for_offering(
        &self,
        offering_id: SemesterOfferingId,
    ) -> RepositoryResult<Vec<ScheduleRun>>;

    /// Persist updated run fields (status, meta, timestamps).
    async fn update_run(&self, run: &ScheduleRun) -> RepositoryResult<()>;

    /// Insert a placed block; the returned block carries its assigned id.
    async fn create_block(&self, block: ScheduleBlock) -> RepositoryResult<ScheduleBlock>;

    /// Blocks of one run.
    async fn blocks_for_run(&self, run_id: RunId) -> RepositoryResult<Vec<ScheduleBlock>>;

    /// Bulk-insert per-slot entries.
    async fn create_entries(&self, entries: Vec<ScheduleEntry>) -> RepositoryResult<()>;

    /// Entries of one run, ordered by (day, slot).
    async fn entries_for_run(&self, run_id: RunId) -> RepositoryResult<Vec<ScheduleEntry>>;

    /// Entries of all COMMITTED runs in a session, the conflict-relevant
    /// slice of the store.
    async fn committed_entries(&self, session_id: SessionId)
        -> RepositoryResult<Vec<ScheduleEntry>>;

    /// Remove all entries of a run.
    async fn delete_entries_for_run(&self, run_id: RunId) -> RepositoryResult<()>;

    /// Remove all blocks of a run.
    async fn delete_blocks_for_run(&self, run_id: RunId) -> RepositoryResult<()>;

    /// Remove the run record itself.
    async fn delete_run(&self, run_id: RunId) -> RepositoryResult<()>;

    /// Atomically mark a run COMMITTED and record the commit time.
    async fn commit_run(&self, run_id: RunId, committed_at: DateTime<Utc>)
        -> RepositoryResult<()>;

    /// Connectivity check for health endpoints.
    async fn health_check(&self) -> RepositoryResult<bool>;
}
