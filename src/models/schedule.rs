//! Persisted schedule records: runs, blocks, and per-slot entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::{
    BlockId, CourseOfferingId, EntryId, RoomId, RunId, SemesterOfferingId, SessionId, TeacherId,
};

/// Lifecycle status of a schedule run.
///
/// A run is created as `Draft`, becomes `Committed` (authoritative for
/// conflict checks) or `Cancelled`, or ends up `Failed` when the search could
/// not place every block. Only committed runs count towards resource
/// conflicts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    Draft,
    Committed,
    Cancelled,
    Failed,
}

impl std::fmt::Display for RunStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RunStatus::Draft => "DRAFT",
            RunStatus::Committed => "COMMITTED",
            RunStatus::Cancelled => "CANCELLED",
            RunStatus::Failed => "FAILED",
        };
        f.write_str(s)
    }
}

/// One routine generation run and its outcome.
///
/// `meta` holds the serialised generation report (JSON).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleRun {
    pub id: RunId,
    pub semester_offering_id: SemesterOfferingId,
    pub status: RunStatus,
    pub algorithm_version: String,
    pub generated_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub committed_at: Option<DateTime<Utc>>,
    pub meta: String,
}

/// A placed class block: a contiguous span of 1..=3 slots within one day,
/// owned by exactly one run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleBlock {
    pub id: BlockId,
    pub run_id: RunId,
    pub course_offering_id: CourseOfferingId,
    pub teacher_id: TeacherId,
    pub room_id: RoomId,
    pub day_of_week: u8,
    pub slot_start: u8,
    pub slot_length: u8,
    pub is_lab: bool,
    /// Lab group label ("Gx", "Gy", ...) or empty when no cohort split applies.
    #[serde(default)]
    pub lab_group: String,
}

impl ScheduleBlock {
    /// Last slot covered by this block.
    pub fn slot_end(&self) -> u8 {
        self.slot_start + self.slot_length - 1
    }
}

/// One slot of a placed block. Session is denormalised from the semester
/// offering so global conflict lookups never need a join through it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub id: EntryId,
    pub run_id: RunId,
    pub semester_offering_id: SemesterOfferingId,
    pub session_id: SessionId,
    pub course_offering_id: CourseOfferingId,
    pub teacher_id: TeacherId,
    pub room_id: RoomId,
    pub day_of_week: u8,
    pub slot_number: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_id: Option<BlockId>,
    #[serde(default)]
    pub lab_group: String,
}
