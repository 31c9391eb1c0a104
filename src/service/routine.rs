//! Routine generation run lifecycle.
//!
//! Orchestrates one generation end to end: load the offering snapshot,
//! create the run, pre-mark the grid with committed entries of the session,
//! derive and place blocks, materialise blocks and entries, and finalise the
//! run status. Commit, cancel, and delete manage the resulting run.
//!
//! Commit is the serialisation point between concurrent drafts: it
//! re-validates every entry of the run against then-current committed state
//! and refuses with a conflict error instead of committing a schedule that
//! would violate the session invariants.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use crate::api::{BlockId, EntryId, RunId, SemesterOfferingId};
use crate::db::repository::{RepositoryError, RoutineRepository};
use crate::engine::{build_blocks, solve, CommittedSnapshot, Grid};
use crate::models::{RunStatus, ScheduleBlock, ScheduleEntry, ScheduleRun};
use crate::service::clock::{Clock, SystemClock};

/// Version tag stamped on every generated run.
pub const ALGORITHM_VERSION: &str = "v1.0";

/// Result type for routine service operations.
pub type RoutineResult<T> = Result<T, RoutineError>;

/// Errors surfaced by the routine service.
///
/// Per-offering structural problems (missing teachers/rooms) are not errors:
/// they land in the generation report. A partial placement is not an error
/// either: it yields a FAILED run whose report drives the UX.
#[derive(Debug, thiserror::Error)]
pub enum RoutineError {
    #[error("semester offering {0} not found")]
    OfferingNotFound(SemesterOfferingId),

    #[error("schedule run {0} not found")]
    RunNotFound(RunId),

    #[error("schedule run {run} is {actual}, only DRAFT runs can be committed")]
    NotDraft { run: RunId, actual: RunStatus },

    #[error("schedule run {0} is committed and can no longer be modified")]
    AlreadyCommitted(RunId),

    #[error("commit conflict: {0}")]
    CommitConflict(String),

    #[error("generation report serialisation failed: {0}")]
    Report(#[from] serde_json::Error),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// The routine generation service.
pub struct RoutineService {
    repo: Arc<dyn RoutineRepository>,
    clock: Arc<dyn Clock>,
}

impl RoutineService {
    pub fn new(repo: Arc<dyn RoutineRepository>) -> Self {
        Self::with_clock(repo, Arc::new(SystemClock))
    }

    pub fn with_clock(repo: Arc<dyn RoutineRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    /// Generate a routine for a semester offering.
    ///
    /// Always leaves a run behind: DRAFT when every block was placed, FAILED
    /// otherwise, with the generation report serialised into `meta`.
    pub async fn generate(&self, offering_id: SemesterOfferingId) -> RoutineResult<ScheduleRun> {
        let offering = self
            .repo
            .semester_offering(offering_id)
            .await
            .map_err(|err| match err {
                RepositoryError::NotFound(_) => RoutineError::OfferingNotFound(offering_id),
                other => RoutineError::Repository(other),
            })?;

        info!(
            offering = offering_id.value(),
            courses = offering.course_offerings.len(),
            total_students = offering.total_students,
            "starting routine generation"
        );

        let run = self
            .repo
            .create_run(ScheduleRun {
                id: RunId::new(0),
                semester_offering_id: offering_id,
                status: RunStatus::Draft,
                algorithm_version: ALGORITHM_VERSION.to_string(),
                generated_at: self.clock.now(),
                committed_at: None,
                meta: "{}".to_string(),
            })
            .await?;

        // Committed entries of the session both pre-mark the working grid
        // and feed the occupancy snapshot the search consults.
        let committed = self.repo.committed_entries(offering.session_id).await?;
        let mut grid = Grid::new();
        for entry in &committed {
            grid.mark_external(entry.day_of_week, entry.slot_number);
        }
        let snapshot = CommittedSnapshot::from_entries(&committed, None);

        let derived = build_blocks(&offering);
        let structural_conflicts = derived.conflicts;
        let mut outcome = solve(derived.blocks, &mut grid, &snapshot);
        outcome.report.conflicts = structural_conflicts;

        // Materialise: one block row per placement, one entry row per
        // covered slot. The uniqueness key makes re-materialisation
        // idempotent.
        let mut entries = Vec::new();
        let mut materialised = HashSet::new();
        for placement in &outcome.placements {
            let block = &outcome.blocks[placement.block_idx];
            let key = (
                block.course_offering_id,
                placement.day,
                placement.start,
                block.duration_slots,
            );
            if !materialised.insert(key) {
                continue;
            }

            let stored = self
                .repo
                .create_block(ScheduleBlock {
                    id: BlockId::new(0),
                    run_id: run.id,
                    course_offering_id: block.course_offering_id,
                    teacher_id: block.teacher_id,
                    room_id: block.room_id,
                    day_of_week: placement.day,
                    slot_start: placement.start,
                    slot_length: block.duration_slots,
                    is_lab: block.is_lab,
                    lab_group: block.lab_group.clone(),
                })
                .await?;

            for slot in placement.start..placement.start + block.duration_slots {
                entries.push(ScheduleEntry {
                    id: EntryId::new(0),
                    run_id: run.id,
                    semester_offering_id: block.semester_offering_id,
                    session_id: offering.session_id,
                    course_offering_id: block.course_offering_id,
                    teacher_id: block.teacher_id,
                    room_id: block.room_id,
                    day_of_week: placement.day,
                    slot_number: slot,
                    block_id: Some(stored.id),
                    lab_group: block.lab_group.clone(),
                });
            }
        }
        if !entries.is_empty() {
            self.repo.create_entries(entries).await?;
        }

        let mut run = run;
        run.meta = serde_json::to_string(&outcome.report)?;
        run.status = if outcome.report.is_complete() {
            RunStatus::Draft
        } else {
            warn!(
                run = run.id.value(),
                placed = outcome.report.placed_blocks,
                total = outcome.report.total_blocks,
                "partial placement, marking run FAILED"
            );
            RunStatus::Failed
        };
        self.repo.update_run(&run).await?;

        info!(
            run = run.id.value(),
            placed = outcome.report.placed_blocks,
            total = outcome.report.total_blocks,
            status = %run.status,
            "routine generation completed"
        );

        Ok(run)
    }

    /// Commit a DRAFT run, making it authoritative for conflict checks.
    pub async fn commit(&self, run_id: RunId) -> RoutineResult<ScheduleRun> {
        let run = self.get_run(run_id).await?;
        if run.status != RunStatus::Draft {
            return Err(RoutineError::NotDraft {
                run: run_id,
                actual: run.status,
            });
        }

        self.revalidate_against_committed(run_id).await?;

        self.repo.commit_run(run_id, self.clock.now()).await?;
        info!(run = run_id.value(), "schedule run committed");
        self.get_run(run_id).await
    }

    /// Cancel a non-committed run: its entries are removed, its blocks are
    /// kept for audit.
    pub async fn cancel(&self, run_id: RunId) -> RoutineResult<ScheduleRun> {
        let mut run = self.get_run(run_id).await?;
        if run.status == RunStatus::Committed {
            return Err(RoutineError::AlreadyCommitted(run_id));
        }

        self.repo.delete_entries_for_run(run_id).await?;
        run.status = RunStatus::Cancelled;
        self.repo.update_run(&run).await?;
        info!(run = run_id.value(), "schedule run cancelled");
        Ok(run)
    }

    /// Delete a non-committed run entirely: entries, blocks, and the run.
    pub async fn delete(&self, run_id: RunId) -> RoutineResult<()> {
        let run = self.get_run(run_id).await?;
        if run.status == RunStatus::Committed {
            return Err(RoutineError::AlreadyCommitted(run_id));
        }

        self.repo.delete_entries_for_run(run_id).await?;
        self.repo.delete_blocks_for_run(run_id).await?;
        self.repo.delete_run(run_id).await?;
        info!(run = run_id.value(), "schedule run deleted");
        Ok(())
    }

    /// Fetch a run by id.
    pub async fn get_run(&self, run_id: RunId) -> RoutineResult<ScheduleRun> {
        self.repo.run(run_id).await.map_err(|err| match err {
            RepositoryError::NotFound(_) => RoutineError::RunNotFound(run_id),
            other => RoutineError::Repository(other),
        })
    }

    /// Runs generated for a semester offering, most recent first.
    pub async fn runs_for_offering(
        &self,
        offering_id: SemesterOfferingId,
    ) -> RoutineResult<Vec<ScheduleRun>> {
        Ok(self.repo.runs_for_offering(offering_id).await?)
    }

    /// Entries of one run, for clients rendering the timetable.
    pub async fn entries_for_run(&self, run_id: RunId) -> RoutineResult<Vec<ScheduleEntry>> {
        Ok(self.repo.entries_for_run(run_id).await?)
    }

    /// Re-check every entry of the run against then-current committed state.
    ///
    /// Two drafts generated concurrently can both be internally consistent
    /// yet mutually conflicting; whichever commits second must be refused.
    async fn revalidate_against_committed(&self, run_id: RunId) -> RoutineResult<()> {
        let entries = self.repo.entries_for_run(run_id).await?;
        let Some(session_id) = entries.first().map(|entry| entry.session_id) else {
            return Ok(());
        };

        let committed = self.repo.committed_entries(session_id).await?;
        for mine in &entries {
            for theirs in committed
                .iter()
                .filter(|e| e.day_of_week == mine.day_of_week && e.slot_number == mine.slot_number)
            {
                if theirs.teacher_id == mine.teacher_id {
                    return Err(RoutineError::CommitConflict(format!(
                        "teacher {} already committed on {} slot {}",
                        mine.teacher_id,
                        crate::api::day_label(mine.day_of_week),
                        mine.slot_number
                    )));
                }
                if !mine.room_id.is_sentinel() && theirs.room_id == mine.room_id {
                    return Err(RoutineError::CommitConflict(format!(
                        "room {} already committed on {} slot {}",
                        mine.room_id,
                        crate::api::day_label(mine.day_of_week),
                        mine.slot_number
                    )));
                }
                if theirs.semester_offering_id == mine.semester_offering_id {
                    return Err(RoutineError::CommitConflict(format!(
                        "semester offering {} already committed on {} slot {}",
                        mine.semester_offering_id,
                        crate::api::day_label(mine.day_of_week),
                        mine.slot_number
                    )));
                }
            }
        }
        Ok(())
    }
}
