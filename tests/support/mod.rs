#![allow(dead_code)]

//! Shared fixtures for the integration suites: offering builders, a
//! deterministic service, and run invariant checks.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{TimeZone, Utc};

use routinegen::api::{
    CourseOfferingId, EntryId, RoomId, RunId, SemesterOfferingId, SessionId, SubjectId, TeacherId,
};
use routinegen::db::{LocalRepository, RoutineRepository};
use routinegen::engine::GenerationReport;
use routinegen::models::{
    CourseOffering, OfferingStatus, RoomAssignment, RunStatus, ScheduleEntry, ScheduleRun,
    SemesterOffering,
};
use routinegen::service::{FixedClock, RoutineService};

/// The instant every test run is generated at.
pub fn test_instant() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 9, 1, 8, 30, 0).unwrap()
}

/// A routine service over the given repository with a fixed clock.
pub fn service(repo: &Arc<LocalRepository>) -> RoutineService {
    RoutineService::with_clock(repo.clone(), Arc::new(FixedClock(test_instant())))
}

pub fn offering(
    id: i64,
    session: i64,
    total_students: i32,
    courses: Vec<CourseOffering>,
) -> SemesterOffering {
    SemesterOffering {
        id: SemesterOfferingId::new(id),
        programme_id: 1,
        department_id: 1,
        session_id: SessionId::new(session),
        semester_number: 4,
        status: OfferingStatus::Active,
        total_students,
        course_offerings: courses,
    }
}

pub fn theory_course(
    id: i64,
    offering: i64,
    teacher: i64,
    room: i64,
    credit: i32,
    weekly: i32,
) -> CourseOffering {
    CourseOffering {
        id: CourseOfferingId::new(id),
        semester_offering_id: SemesterOfferingId::new(offering),
        subject_id: SubjectId::new(id * 10),
        subject_name: format!("Theory {}", id),
        credit,
        is_lab: false,
        requires_room: true,
        weekly_required_slots: weekly,
        required_pattern: None,
        preferred_room_id: None,
        notes: String::new(),
        teachers: vec![TeacherId::new(teacher)],
        rooms: vec![RoomAssignment {
            room_id: RoomId::new(room),
            capacity: 200,
        }],
    }
}

pub fn lab_course(id: i64, offering: i64, teacher: i64, room: i64, capacity: i32) -> CourseOffering {
    CourseOffering {
        id: CourseOfferingId::new(id),
        semester_offering_id: SemesterOfferingId::new(offering),
        subject_id: SubjectId::new(id * 10),
        subject_name: format!("Lab {}", id),
        credit: 1,
        is_lab: true,
        requires_room: true,
        weekly_required_slots: 3,
        required_pattern: None,
        preferred_room_id: None,
        notes: String::new(),
        teachers: vec![TeacherId::new(teacher)],
        rooms: vec![RoomAssignment {
            room_id: RoomId::new(room),
            capacity,
        }],
    }
}

/// Parse the run's meta JSON back into its report.
pub fn report_of(run: &ScheduleRun) -> GenerationReport {
    serde_json::from_str(&run.meta).expect("run meta should hold a generation report")
}

/// Seed a committed run occupying the given `(day, slot)` positions for one
/// teacher, bypassing the generator.
pub async fn commit_teacher_slots(
    repo: &LocalRepository,
    session: i64,
    offering_id: i64,
    teacher: i64,
    slots: &[(u8, u8)],
) -> RunId {
    let run = repo
        .create_run(ScheduleRun {
            id: RunId::new(0),
            semester_offering_id: SemesterOfferingId::new(offering_id),
            status: RunStatus::Draft,
            algorithm_version: "v1.0".to_string(),
            generated_at: test_instant(),
            committed_at: None,
            meta: "{}".to_string(),
        })
        .await
        .unwrap();

    let entries = slots
        .iter()
        .map(|&(day, slot)| ScheduleEntry {
            id: EntryId::new(0),
            run_id: run.id,
            semester_offering_id: SemesterOfferingId::new(offering_id),
            session_id: SessionId::new(session),
            course_offering_id: CourseOfferingId::new(offering_id * 100),
            teacher_id: TeacherId::new(teacher),
            room_id: RoomId::new(offering_id * 100),
            day_of_week: day,
            slot_number: slot,
            block_id: None,
            lab_group: String::new(),
        })
        .collect();
    repo.create_entries(entries).await.unwrap();
    repo.commit_run(run.id, test_instant()).await.unwrap();
    run.id
}

/// Structural invariants every generated run must satisfy: entries belong to
/// exactly one block and cover it contiguously, no block straddles lunch,
/// labs anchor correctly, no within-run double booking, and the theory daily
/// cap holds.
pub async fn assert_run_invariants(repo: &LocalRepository, run_id: RunId) {
    let blocks = repo.blocks_for_run(run_id).await.unwrap();
    let entries = repo.entries_for_run(run_id).await.unwrap();

    let block_by_id: HashMap<_, _> = blocks.iter().map(|b| (b.id, b)).collect();

    // Entries lie within their block's span.
    let mut slots_per_block: HashMap<_, Vec<u8>> = HashMap::new();
    for entry in &entries {
        let block_id = entry.block_id.expect("entry without a block");
        let block = block_by_id
            .get(&block_id)
            .unwrap_or_else(|| panic!("entry references unknown block {}", block_id));
        assert_eq!(entry.day_of_week, block.day_of_week);
        assert!(
            (block.slot_start..=block.slot_end()).contains(&entry.slot_number),
            "entry slot {} outside block span {}..={}",
            entry.slot_number,
            block.slot_start,
            block.slot_end()
        );
        slots_per_block.entry(block_id).or_default().push(entry.slot_number);
    }

    // Every block is covered by exactly slot_length contiguous entries.
    for block in &blocks {
        let mut slots = slots_per_block.remove(&block.id).unwrap_or_default();
        slots.sort_unstable();
        slots.dedup();
        assert_eq!(
            slots.len(),
            block.slot_length as usize,
            "block {} entry count mismatch",
            block.id
        );
        assert_eq!(slots.first().copied(), Some(block.slot_start));
        assert_eq!(slots.last().copied(), Some(block.slot_end()));

        // No lunch straddle.
        if block.slot_start <= 4 {
            assert!(block.slot_end() <= 4, "block {} straddles lunch", block.id);
        }

        // Lab anchors.
        if block.is_lab {
            assert_eq!(block.slot_length, 3);
            assert!(matches!(block.slot_start, 2 | 5));
        }
    }

    // No within-run double booking per teacher, room, or cohort group.
    let mut teachers = HashSet::new();
    let mut rooms = HashSet::new();
    let mut cohorts = HashSet::new();
    for entry in &entries {
        assert!(
            teachers.insert((entry.teacher_id, entry.day_of_week, entry.slot_number)),
            "teacher {} double-booked",
            entry.teacher_id
        );
        if !entry.room_id.is_sentinel() {
            assert!(
                rooms.insert((entry.room_id, entry.day_of_week, entry.slot_number)),
                "room {} double-booked",
                entry.room_id
            );
        }
        assert!(
            cohorts.insert((
                entry.semester_offering_id,
                entry.lab_group.clone(),
                entry.day_of_week,
                entry.slot_number
            )),
            "cohort double-booked"
        );
    }

    // Theory daily cap.
    let mut theory_per_course_day: HashMap<_, u8> = HashMap::new();
    for entry in &entries {
        let is_lab = entry
            .block_id
            .and_then(|id| block_by_id.get(&id))
            .map(|b| b.is_lab)
            .unwrap_or(false);
        if !is_lab {
            *theory_per_course_day
                .entry((entry.course_offering_id, entry.day_of_week))
                .or_default() += 1;
        }
    }
    for ((course, day), count) in theory_per_course_day {
        assert!(
            count <= 2,
            "course {} exceeds daily cap on day {} with {} slots",
            course,
            day,
            count
        );
    }
}
