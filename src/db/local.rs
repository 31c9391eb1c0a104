//! In-memory repository for unit testing and local development.
//!
//! Everything lives in a single [`parking_lot::RwLock`]-protected store with
//! monotonically assigned ids. Semester offerings are seeded through the
//! inherent [`LocalRepository::insert_semester_offering`]; entity CRUD is
//! owned by an external system and is not part of the repository trait.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use crate::api::{BlockId, EntryId, RunId, SemesterOfferingId, SessionId};
use crate::db::repository::{RepositoryError, RepositoryResult, RoutineRepository};
use crate::models::{RunStatus, ScheduleBlock, ScheduleEntry, ScheduleRun, SemesterOffering};

#[derive(Default)]
struct Store {
    offerings: HashMap<SemesterOfferingId, SemesterOffering>,
    runs: HashMap<RunId, ScheduleRun>,
    blocks: HashMap<BlockId, ScheduleBlock>,
    entries: HashMap<EntryId, ScheduleEntry>,
    next_run_id: i64,
    next_block_id: i64,
    next_entry_id: i64,
}

/// In-memory implementation of [`RoutineRepository`].
#[derive(Default)]
pub struct LocalRepository {
    store: RwLock<Store>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a semester offering snapshot. Replaces any previous snapshot
    /// with the same id.
    pub fn insert_semester_offering(&self, offering: SemesterOffering) {
        self.store.write().offerings.insert(offering.id, offering);
    }
}

#[async_trait]
impl RoutineRepository for LocalRepository {
    async fn semester_offering(
        &self,
        id: SemesterOfferingId,
    ) -> RepositoryResult<SemesterOffering> {
        self.store
            .read()
            .offerings
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(format!("semester offering {}", id)))
    }

    async fn create_run(&self, mut run: ScheduleRun) -> RepositoryResult<ScheduleRun> {
        let mut store = self.store.write();
        store.next_run_id += 1;
        run.id = RunId::new(store.next_run_id);
        store.runs.insert(run.id, run.clone());
        Ok(run)
    }

    async fn run(&self, id: RunId) -> RepositoryResult<ScheduleRun> {
        self.store
            .read()
            .runs
            .get(&id)
            .cloned()
            .ok_or_else(|| RepositoryError::not_found(format!("schedule run {}", id)))
    }

    async fn runs_for_offering(
        &self,
        offering_id: SemesterOfferingId,
    ) -> RepositoryResult<Vec<ScheduleRun>> {
        let store = self.store.read();
        let mut runs: Vec<ScheduleRun> = store
            .runs
            .values()
            .filter(|run| run.semester_offering_id == offering_id)
            .cloned()
            .collect();
        // Most recent first; ids are monotonic so they break timestamp ties.
        runs.sort_by_key(|run| (std::cmp::Reverse(run.generated_at), std::cmp::Reverse(run.id)));
        Ok(runs)
    }

    async fn update_run(&self, run: &ScheduleRun) -> RepositoryResult<()> {
        let mut store = self.store.write();
        if !store.runs.contains_key(&run.id) {
            return Err(RepositoryError::not_found(format!("schedule run {}", run.id)));
        }
        store.runs.insert(run.id, run.clone());
        Ok(())
    }

    async fn create_block(&self, mut block: ScheduleBlock) -> RepositoryResult<ScheduleBlock> {
        let mut store = self.store.write();
        store.next_block_id += 1;
        block.id = BlockId::new(store.next_block_id);
        store.blocks.insert(block.id, block.clone());
        Ok(block)
    }

    async fn blocks_for_run(&self, run_id: RunId) -> RepositoryResult<Vec<ScheduleBlock>> {
        let store = self.store.read();
        let mut blocks: Vec<ScheduleBlock> = store
            .blocks
            .values()
            .filter(|block| block.run_id == run_id)
            .cloned()
            .collect();
        blocks.sort_by_key(|block| (block.day_of_week, block.slot_start, block.id));
        Ok(blocks)
    }

    async fn create_entries(&self, entries: Vec<ScheduleEntry>) -> RepositoryResult<()> {
        let mut store = self.store.write();
        for mut entry in entries {
            store.next_entry_id += 1;
            entry.id = EntryId::new(store.next_entry_id);
            store.entries.insert(entry.id, entry);
        }
        Ok(())
    }

    async fn entries_for_run(&self, run_id: RunId) -> RepositoryResult<Vec<ScheduleEntry>> {
        let store = self.store.read();
        let mut entries: Vec<ScheduleEntry> = store
            .entries
            .values()
            .filter(|entry| entry.run_id == run_id)
            .cloned()
            .collect();
        entries.sort_by_key(|entry| (entry.day_of_week, entry.slot_number, entry.id));
        Ok(entries)
    }

    async fn committed_entries(
        &self,
        session_id: SessionId,
    ) -> RepositoryResult<Vec<ScheduleEntry>> {
        let store = self.store.read();
        let mut entries: Vec<ScheduleEntry> = store
            .entries
            .values()
            .filter(|entry| {
                entry.session_id == session_id
                    && store
                        .runs
                        .get(&entry.run_id)
                        .is_some_and(|run| run.status == RunStatus::Committed)
            })
            .cloned()
            .collect();
        entries.sort_by_key(|entry| (entry.day_of_week, entry.slot_number, entry.id));
        Ok(entries)
    }

    async fn delete_entries_for_run(&self, run_id: RunId) -> RepositoryResult<()> {
        self.store
            .write()
            .entries
            .retain(|_, entry| entry.run_id != run_id);
        Ok(())
    }

    async fn delete_blocks_for_run(&self, run_id: RunId) -> RepositoryResult<()> {
        self.store
            .write()
            .blocks
            .retain(|_, block| block.run_id != run_id);
        Ok(())
    }

    async fn delete_run(&self, run_id: RunId) -> RepositoryResult<()> {
        let mut store = self.store.write();
        store
            .runs
            .remove(&run_id)
            .ok_or_else(|| RepositoryError::not_found(format!("schedule run {}", run_id)))?;
        Ok(())
    }

    async fn commit_run(
        &self,
        run_id: RunId,
        committed_at: DateTime<Utc>,
    ) -> RepositoryResult<()> {
        let mut store = self.store.write();
        let run = store
            .runs
            .get_mut(&run_id)
            .ok_or_else(|| RepositoryError::not_found(format!("schedule run {}", run_id)))?;
        run.status = RunStatus::Committed;
        run.committed_at = Some(committed_at);
        Ok(())
    }

    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{CourseOfferingId, RoomId, TeacherId};

    fn run_for(offering: i64) -> ScheduleRun {
        ScheduleRun {
            id: RunId::new(0),
            semester_offering_id: SemesterOfferingId::new(offering),
            status: RunStatus::Draft,
            algorithm_version: "v1.0".to_string(),
            generated_at: Utc::now(),
            committed_at: None,
            meta: "{}".to_string(),
        }
    }

    fn entry_for(run: RunId, session: i64, day: u8, slot: u8) -> ScheduleEntry {
        ScheduleEntry {
            id: EntryId::new(0),
            run_id: run,
            semester_offering_id: SemesterOfferingId::new(1),
            session_id: SessionId::new(session),
            course_offering_id: CourseOfferingId::new(1),
            teacher_id: TeacherId::new(1),
            room_id: RoomId::new(1),
            day_of_week: day,
            slot_number: slot,
            block_id: None,
            lab_group: String::new(),
        }
    }

    #[tokio::test]
    async fn test_run_crud_roundtrip() {
        let repo = LocalRepository::new();
        let created = repo.create_run(run_for(1)).await.unwrap();
        assert_eq!(created.id.value(), 1);

        let fetched = repo.run(created.id).await.unwrap();
        assert_eq!(fetched.status, RunStatus::Draft);

        let mut updated = fetched.clone();
        updated.status = RunStatus::Failed;
        repo.update_run(&updated).await.unwrap();
        assert_eq!(repo.run(created.id).await.unwrap().status, RunStatus::Failed);

        repo.delete_run(created.id).await.unwrap();
        assert!(repo.run(created.id).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_offering_is_not_found() {
        let repo = LocalRepository::new();
        let err = repo
            .semester_offering(SemesterOfferingId::new(9))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_committed_entries_filter_by_status_and_session() {
        let repo = LocalRepository::new();

        let draft = repo.create_run(run_for(1)).await.unwrap();
        let committed = repo.create_run(run_for(1)).await.unwrap();
        repo.create_entries(vec![
            entry_for(draft.id, 1, 1, 1),
            entry_for(committed.id, 1, 2, 3),
            entry_for(committed.id, 2, 2, 4),
        ])
        .await
        .unwrap();
        repo.commit_run(committed.id, Utc::now()).await.unwrap();

        let session_one = repo.committed_entries(SessionId::new(1)).await.unwrap();
        assert_eq!(session_one.len(), 1);
        assert_eq!(session_one[0].day_of_week, 2);
        assert_eq!(session_one[0].slot_number, 3);

        // Draft entries never leak into the committed view.
        let entries = repo.entries_for_run(draft.id).await.unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_runs_for_offering_most_recent_first() {
        let repo = LocalRepository::new();
        let first = repo.create_run(run_for(1)).await.unwrap();
        let second = repo.create_run(run_for(1)).await.unwrap();
        repo.create_run(run_for(2)).await.unwrap();

        let runs = repo
            .runs_for_offering(SemesterOfferingId::new(1))
            .await
            .unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].id, second.id);
        assert_eq!(runs[1].id, first.id);
    }

    #[tokio::test]
    async fn test_delete_cascade_helpers() {
        let repo = LocalRepository::new();
        let run = repo.create_run(run_for(1)).await.unwrap();
        repo.create_entries(vec![entry_for(run.id, 1, 1, 1), entry_for(run.id, 1, 1, 2)])
            .await
            .unwrap();

        repo.delete_entries_for_run(run.id).await.unwrap();
        assert!(repo.entries_for_run(run.id).await.unwrap().is_empty());

        repo.delete_blocks_for_run(run.id).await.unwrap();
        repo.delete_run(run.id).await.unwrap();
        assert!(repo.run(run.id).await.is_err());
    }
}
