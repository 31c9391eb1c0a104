//! Class block derivation.
//!
//! Expands each course offering of a semester offering into the atomic
//! scheduling units the search places: theory offerings decompose into
//! credit-aware slot-length patterns, labs become a single 3-slot block that
//! is replicated per cohort group when the assigned room cannot hold the
//! whole cohort.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::api::{
    CourseOfferingId, RoomId, SemesterOfferingId, SubjectId, TeacherId, ROOM_SENTINEL,
};
use crate::models::{CourseOffering, SemesterOffering};

/// Length of every lab block, in slots.
pub const LAB_BLOCK_SLOTS: u8 = 3;

/// Finite palette of lab group labels. Groups beyond the palette are dropped
/// and surfaced as a conflict diagnostic.
pub const LAB_GROUP_LABELS: [&str; 6] = ["Gx", "Gy", "Gz", "Ga", "Gb", "Gc"];

/// A single atomic scheduling unit: one consecutive span of 1..=3 slots for
/// one course, one teacher, one room, and (for split labs) one lab group.
/// Exists only for the duration of a generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassBlock {
    pub course_offering_id: CourseOfferingId,
    pub subject_id: SubjectId,
    pub teacher_id: TeacherId,
    pub room_id: RoomId,
    pub duration_slots: u8,
    pub is_lab: bool,
    /// Lab group label, empty when no cohort split applies.
    #[serde(default)]
    pub lab_group: String,
    pub semester_offering_id: SemesterOfferingId,
}

/// Result of block derivation: the blocks to place plus the per-offering
/// structural diagnostics that were recorded instead of aborting.
#[derive(Debug, Default)]
pub struct BlockBuildOutcome {
    pub blocks: Vec<ClassBlock>,
    pub conflicts: Vec<String>,
}

/// Expands every course offering into class blocks.
///
/// Offerings with no teacher assignment, or no room assignment while one is
/// required, are skipped with a diagnostic; the rest of the offering list is
/// still processed.
pub fn build_blocks(offering: &SemesterOffering) -> BlockBuildOutcome {
    let mut outcome = BlockBuildOutcome::default();

    for course in &offering.course_offerings {
        let Some(teacher_id) = course.first_teacher() else {
            warn!(
                course_offering = course.id.value(),
                subject = %course.subject_name,
                "no teachers assigned, skipping offering"
            );
            outcome.conflicts.push(format!(
                "course offering {} ({}): no teachers assigned, skipped",
                course.id, course.subject_name
            ));
            continue;
        };

        let room_id = if course.requires_room {
            match course.first_room() {
                Some(assignment) => assignment.room_id,
                None => {
                    warn!(
                        course_offering = course.id.value(),
                        subject = %course.subject_name,
                        "no rooms assigned to offering that requires one, skipping"
                    );
                    outcome.conflicts.push(format!(
                        "course offering {} ({}): requires a room but none assigned, skipped",
                        course.id, course.subject_name
                    ));
                    continue;
                }
            }
        } else {
            ROOM_SENTINEL
        };

        if course.is_lab {
            let groups = lab_groups(course, offering.total_students, &mut outcome.conflicts);
            debug!(
                course_offering = course.id.value(),
                groups = groups.len(),
                "derived lab blocks"
            );
            for group in groups {
                outcome.blocks.push(ClassBlock {
                    course_offering_id: course.id,
                    subject_id: course.subject_id,
                    teacher_id,
                    room_id,
                    duration_slots: LAB_BLOCK_SLOTS,
                    is_lab: true,
                    lab_group: group,
                    semester_offering_id: course.semester_offering_id,
                });
            }
        } else {
            for slot_length in theory_patterns(course.credit, course.weekly_required_slots) {
                outcome.blocks.push(ClassBlock {
                    course_offering_id: course.id,
                    subject_id: course.subject_id,
                    teacher_id,
                    room_id,
                    duration_slots: slot_length,
                    is_lab: false,
                    lab_group: String::new(),
                    semester_offering_id: course.semester_offering_id,
                });
            }
        }
    }

    outcome
}

/// Slot-length pattern for a theory offering, larger blocks first.
///
/// Credits 2, 3 and 4 follow fixed preferred shapes with single-slot
/// fallbacks when the weekly load is too small; any other credit is
/// decomposed greedily into 2s then 1s.
pub fn theory_patterns(credit: i32, weekly_slots: i32) -> Vec<u8> {
    let weekly_slots = weekly_slots.max(0);
    match credit {
        4 => {
            if weekly_slots >= 4 {
                vec![2, 2]
            } else if weekly_slots == 3 {
                vec![2, 1]
            } else {
                vec![1; weekly_slots as usize]
            }
        }
        3 => {
            if weekly_slots >= 3 {
                vec![2, 1]
            } else {
                vec![1; weekly_slots as usize]
            }
        }
        2 => {
            if weekly_slots >= 2 {
                vec![2]
            } else if weekly_slots == 1 {
                vec![1]
            } else {
                vec![]
            }
        }
        _ => {
            let mut patterns = Vec::new();
            let mut remaining = weekly_slots;
            while remaining > 0 {
                if remaining >= 2 {
                    patterns.push(2);
                    remaining -= 2;
                } else {
                    patterns.push(1);
                    remaining -= 1;
                }
            }
            patterns
        }
    }
}

/// Lab group labels for a lab offering. Returns a single empty label when no
/// cohort split applies.
///
/// A split applies only when the offering requires a room, the room has a
/// positive capacity, the cohort is non-empty, and the capacity is below the
/// cohort size. Group count is `ceil(total / capacity)`, capped by the label
/// palette; dropped groups are recorded as a conflict.
fn lab_groups(course: &CourseOffering, total_students: i32, conflicts: &mut Vec<String>) -> Vec<String> {
    if !course.requires_room || total_students <= 0 {
        return vec![String::new()];
    }
    let Some(room) = course.first_room() else {
        return vec![String::new()];
    };
    if room.capacity <= 0 || room.capacity >= total_students {
        return vec![String::new()];
    }

    let needed = ((total_students + room.capacity - 1) / room.capacity) as usize;
    if needed > LAB_GROUP_LABELS.len() {
        warn!(
            course_offering = course.id.value(),
            needed,
            available = LAB_GROUP_LABELS.len(),
            "lab group palette exhausted, dropping excess groups"
        );
        conflicts.push(format!(
            "course offering {} ({}): needs {} lab groups but only {} labels exist, {} dropped",
            course.id,
            course.subject_name,
            needed,
            LAB_GROUP_LABELS.len(),
            needed - LAB_GROUP_LABELS.len()
        ));
    }

    LAB_GROUP_LABELS
        .iter()
        .take(needed)
        .map(|label| label.to_string())
        .collect()
}
