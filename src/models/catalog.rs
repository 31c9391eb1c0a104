//! Flattened input value objects.
//!
//! The source entities are richly cross-linked (programme, department,
//! subject type, assignment tables); the engine works on flat snapshots
//! carrying only the ids and primitives the algorithm needs. The persistence
//! boundary rehydrates these before a generation starts — the engine never
//! walks an object graph at search time.

use serde::{Deserialize, Serialize};

use crate::api::{
    CourseOfferingId, RoomId, SemesterOfferingId, SessionId, SubjectId, TeacherId,
};

/// Lifecycle status of a semester offering (managed by external CRUD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OfferingStatus {
    Draft,
    Active,
    Archived,
}

/// A semester offering: one department's semester in one academic session,
/// aggregating the course offerings to be timetabled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SemesterOffering {
    pub id: SemesterOfferingId,
    pub programme_id: i64,
    pub department_id: i64,
    pub session_id: SessionId,
    pub semester_number: i32,
    pub status: OfferingStatus,
    /// Cohort size, used to decide lab group splits.
    pub total_students: i32,
    pub course_offerings: Vec<CourseOffering>,
}

/// A room assigned to a course offering, with its capacity flattened in so
/// the lab group split never has to look the room up again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomAssignment {
    pub room_id: RoomId,
    pub capacity: i32,
}

/// One subject offered in a semester offering, flattened to what block
/// derivation needs: subject credit and lab flag, weekly load, and the
/// assigned teacher/room id lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseOffering {
    pub id: CourseOfferingId,
    pub semester_offering_id: SemesterOfferingId,
    pub subject_id: SubjectId,
    pub subject_name: String,
    pub credit: i32,
    pub is_lab: bool,
    /// Derived from the subject type; offerings without a room requirement
    /// schedule against the sentinel room.
    pub requires_room: bool,
    pub weekly_required_slots: i32,
    /// Optional slot-length tokens (e.g. `["2+2"]`). Preserved for clients;
    /// decomposition is governed by the credit table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_pattern: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_room_id: Option<RoomId>,
    #[serde(default)]
    pub notes: String,
    pub teachers: Vec<TeacherId>,
    pub rooms: Vec<RoomAssignment>,
}

impl CourseOffering {
    /// The deterministically selected teacher: the first assignment.
    pub fn first_teacher(&self) -> Option<TeacherId> {
        self.teachers.first().copied()
    }

    /// The deterministically selected room: the first assignment.
    pub fn first_room(&self) -> Option<RoomAssignment> {
        self.rooms.first().copied()
    }
}
