//! Occupancy oracle: global availability of teachers, rooms, and student
//! cohorts across committed runs of a session.
//!
//! The oracle is the seam between the CPU-bound search and the store. The
//! production implementation is [`CommittedSnapshot`], an in-memory index
//! built once per generation from the committed entries of the session; the
//! search then answers every availability question without touching the
//! store, which keeps the backtracking synchronous and deterministic for a
//! given snapshot.

use std::collections::HashSet;

use crate::api::{RoomId, RunId, SemesterOfferingId, TeacherId};
use crate::models::ScheduleEntry;

/// Answers availability questions for a prospective `(day, slots)` window.
///
/// Only committed runs are consulted; drafts never conflict with other
/// drafts, which permits concurrent exploration. Commit is the
/// serialisation point.
pub trait OccupancyOracle {
    /// Whether the teacher is free in every given slot of the day.
    fn teacher_free(&self, teacher: TeacherId, day: u8, slots: &[u8]) -> bool;

    /// Whether the room is free in every given slot of the day. Always true
    /// for the sentinel room.
    fn room_free(&self, room: RoomId, day: u8, slots: &[u8]) -> bool;

    /// Whether the semester offering's cohort is free in every given slot of
    /// the day.
    fn cohort_free(&self, offering: SemesterOfferingId, day: u8, slots: &[u8]) -> bool;
}

/// Index over the committed entries of one session.
#[derive(Debug, Default)]
pub struct CommittedSnapshot {
    teachers: HashSet<(TeacherId, u8, u8)>,
    rooms: HashSet<(RoomId, u8, u8)>,
    cohorts: HashSet<(SemesterOfferingId, u8, u8)>,
}

impl CommittedSnapshot {
    /// An empty snapshot: everything free. Useful for tests and for sessions
    /// with no committed runs yet.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the index from committed entries. `exclude_run` drops one
    /// run's entries from the cohort axis, allowing idempotent regeneration
    /// of a routine that is already committed.
    pub fn from_entries(entries: &[ScheduleEntry], exclude_run: Option<RunId>) -> Self {
        let mut snapshot = Self::default();
        for entry in entries {
            let key = (entry.day_of_week, entry.slot_number);
            snapshot.teachers.insert((entry.teacher_id, key.0, key.1));
            if !entry.room_id.is_sentinel() {
                snapshot.rooms.insert((entry.room_id, key.0, key.1));
            }
            if exclude_run != Some(entry.run_id) {
                snapshot
                    .cohorts
                    .insert((entry.semester_offering_id, key.0, key.1));
            }
        }
        snapshot
    }
}

impl OccupancyOracle for CommittedSnapshot {
    fn teacher_free(&self, teacher: TeacherId, day: u8, slots: &[u8]) -> bool {
        slots
            .iter()
            .all(|&slot| !self.teachers.contains(&(teacher, day, slot)))
    }

    fn room_free(&self, room: RoomId, day: u8, slots: &[u8]) -> bool {
        if room.is_sentinel() {
            return true;
        }
        slots
            .iter()
            .all(|&slot| !self.rooms.contains(&(room, day, slot)))
    }

    fn cohort_free(&self, offering: SemesterOfferingId, day: u8, slots: &[u8]) -> bool {
        slots
            .iter()
            .all(|&slot| !self.cohorts.contains(&(offering, day, slot)))
    }
}
