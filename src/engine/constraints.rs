//! Candidate placement validation.
//!
//! A placement `(block, day, start)` is feasible when all of the following
//! hold:
//!
//! 1. the window lies within the day (start >= 1, end <= 7)
//! 2. it does not straddle the lunch gap (a block starting in the morning
//!    must end in the morning)
//! 3. every covered cell of the working grid is free
//! 4. a lab block has length 3 and starts at slot 2 or 5
//! 5. a theory block does not push its course past 2 booked slots on the day
//! 6. teacher, room (unless sentinel) and cohort are free in the committed
//!    schedule of the session

use crate::engine::blocks::{ClassBlock, LAB_BLOCK_SLOTS};
use crate::engine::grid::Grid;
use crate::engine::occupancy::OccupancyOracle;

/// Maximum booked slots per (course offering, day) for theory courses. Labs
/// are exempt: they already consume three consecutive slots.
pub const THEORY_DAILY_SLOT_CAP: u8 = 2;

/// Starting slots at which a lab block may be anchored: straight after the
/// first morning slot, or at the start of the afternoon.
pub const LAB_START_SLOTS: [u8; 2] = [2, 5];

/// Whether `block` can be placed at `(day, start)` given the current grid
/// and the committed-schedule oracle. `blocks` is the generation's full
/// block list, used to resolve grid cell owners for the daily cap.
pub fn can_place(
    block: &ClassBlock,
    blocks: &[ClassBlock],
    grid: &Grid,
    oracle: &dyn OccupancyOracle,
    day: u8,
    start: u8,
) -> bool {
    // Range, lunch straddle, and local grid freedom.
    if !grid.fits_locally(day, start, block.duration_slots) {
        return false;
    }

    // Labs anchor to fixed starting slots.
    if block.is_lab && (block.duration_slots != LAB_BLOCK_SLOTS || !LAB_START_SLOTS.contains(&start))
    {
        return false;
    }

    // Theory daily cap per course.
    if !block.is_lab {
        let booked_for_course: u8 = grid
            .booked_on_day(day)
            .filter_map(|(_, owner)| owner)
            .filter(|&idx| blocks[idx].course_offering_id == block.course_offering_id)
            .count() as u8;
        if booked_for_course + block.duration_slots > THEORY_DAILY_SLOT_CAP {
            return false;
        }
    }

    // Global availability against committed runs of the session.
    let slots: Vec<u8> = (start..start + block.duration_slots).collect();
    oracle.teacher_free(block.teacher_id, day, &slots)
        && oracle.room_free(block.room_id, day, &slots)
        && oracle.cohort_free(block.semester_offering_id, day, &slots)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{
        CourseOfferingId, RoomId, SemesterOfferingId, SubjectId, TeacherId, ROOM_SENTINEL,
    };
    use crate::engine::occupancy::CommittedSnapshot;

    fn theory(course: i64, duration: u8) -> ClassBlock {
        ClassBlock {
            course_offering_id: CourseOfferingId::new(course),
            subject_id: SubjectId::new(course),
            teacher_id: TeacherId::new(1),
            room_id: RoomId::new(1),
            duration_slots: duration,
            is_lab: false,
            lab_group: String::new(),
            semester_offering_id: SemesterOfferingId::new(1),
        }
    }

    fn lab(course: i64) -> ClassBlock {
        ClassBlock {
            is_lab: true,
            duration_slots: 3,
            ..theory(course, 3)
        }
    }

    #[test]
    fn test_range_and_lunch() {
        let blocks = vec![theory(1, 2)];
        let grid = Grid::new();
        let oracle = CommittedSnapshot::empty();

        assert!(can_place(&blocks[0], &blocks, &grid, &oracle, 1, 3));
        // 4..5 straddles lunch.
        assert!(!can_place(&blocks[0], &blocks, &grid, &oracle, 1, 4));
        // 7..8 runs off the day.
        assert!(!can_place(&blocks[0], &blocks, &grid, &oracle, 1, 7));
    }

    #[test]
    fn test_lab_anchor_slots() {
        let blocks = vec![lab(1)];
        let grid = Grid::new();
        let oracle = CommittedSnapshot::empty();

        assert!(can_place(&blocks[0], &blocks, &grid, &oracle, 1, 2));
        assert!(can_place(&blocks[0], &blocks, &grid, &oracle, 1, 5));
        assert!(!can_place(&blocks[0], &blocks, &grid, &oracle, 1, 1));
        assert!(!can_place(&blocks[0], &blocks, &grid, &oracle, 1, 3));
    }

    #[test]
    fn test_local_booking_blocks_placement() {
        let blocks = vec![theory(1, 2)];
        let mut grid = Grid::new();
        grid.mark_external(2, 2);
        let oracle = CommittedSnapshot::empty();

        assert!(!can_place(&blocks[0], &blocks, &grid, &oracle, 2, 1));
        assert!(!can_place(&blocks[0], &blocks, &grid, &oracle, 2, 2));
        assert!(can_place(&blocks[0], &blocks, &grid, &oracle, 2, 3));
    }

    #[test]
    fn test_theory_daily_cap() {
        // Course 1 already holds a 2-slot block on Monday.
        let blocks = vec![theory(1, 2), theory(1, 1), theory(2, 2)];
        let mut grid = Grid::new();
        grid.place(0, 1, 1, 2);
        let oracle = CommittedSnapshot::empty();

        // Another slot for course 1 on Monday would exceed the cap.
        assert!(!can_place(&blocks[1], &blocks, &grid, &oracle, 1, 3));
        // Fine on another day.
        assert!(can_place(&blocks[1], &blocks, &grid, &oracle, 2, 3));
        // A different course is unaffected by course 1's bookings.
        assert!(can_place(&blocks[2], &blocks, &grid, &oracle, 1, 3));
    }

    #[test]
    fn test_external_bookings_do_not_count_towards_cap() {
        let blocks = vec![theory(1, 2)];
        let mut grid = Grid::new();
        grid.mark_external(1, 6);
        let oracle = CommittedSnapshot::empty();

        assert!(can_place(&blocks[0], &blocks, &grid, &oracle, 1, 1));
    }

    #[test]
    fn test_lab_ignores_daily_cap() {
        let blocks = vec![lab(1)];
        let grid = Grid::new();
        let oracle = CommittedSnapshot::empty();
        // 3 > 2, but labs are exempt from the theory cap.
        assert!(can_place(&blocks[0], &blocks, &grid, &oracle, 1, 2));
    }

    #[test]
    fn test_oracle_gates_placement() {
        use crate::models::ScheduleEntry;
        let committed = vec![ScheduleEntry {
            id: crate::api::EntryId::new(1),
            run_id: crate::api::RunId::new(1),
            semester_offering_id: SemesterOfferingId::new(99),
            session_id: crate::api::SessionId::new(1),
            course_offering_id: CourseOfferingId::new(50),
            teacher_id: TeacherId::new(1),
            room_id: RoomId::new(1),
            day_of_week: 3,
            slot_number: 2,
            block_id: None,
            lab_group: String::new(),
        }];
        let oracle = CommittedSnapshot::from_entries(&committed, None);
        let blocks = vec![theory(1, 2)];
        let grid = Grid::new();

        // Teacher 1 is busy on Wed slot 2.
        assert!(!can_place(&blocks[0], &blocks, &grid, &oracle, 3, 1));
        assert!(!can_place(&blocks[0], &blocks, &grid, &oracle, 3, 2));
        assert!(can_place(&blocks[0], &blocks, &grid, &oracle, 3, 3));

        // A sentinel-room block with a different teacher only trips the
        // cohort check if the offering matches.
        let mut other = theory(2, 2);
        other.teacher_id = TeacherId::new(2);
        other.room_id = ROOM_SENTINEL;
        let blocks = vec![other];
        assert!(can_place(&blocks[0], &blocks, &grid, &oracle, 3, 1));
        let mut same_cohort = blocks[0].clone();
        same_cohort.semester_offering_id = SemesterOfferingId::new(99);
        let blocks = vec![same_cohort];
        assert!(!can_place(&blocks[0], &blocks, &grid, &oracle, 3, 2));
    }
}
