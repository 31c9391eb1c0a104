//! Ordered backtracking search with scored placement selection.
//!
//! Blocks are sorted most-constrained-first (labs, then longer blocks, then
//! by teacher to keep one teacher's load clustered), and each block tries
//! its feasible `(day, start)` candidates in decreasing score order. The
//! sort and the tie-break (enumeration order of `(day, start)`) are both
//! stable, so the same input and the same committed-entry snapshot always
//! produce the same routine.

use std::cmp::Reverse;

use tracing::debug;

use crate::api::{SuggestedSlot, DAYS_PER_WEEK, FRIDAY, SLOTS_PER_DAY};
use crate::engine::blocks::ClassBlock;
use crate::engine::constraints::{can_place, LAB_START_SLOTS};
use crate::engine::grid::Grid;
use crate::engine::occupancy::OccupancyOracle;
use crate::engine::report::{GenerationReport, PlacementSuggestion};

/// A chosen position for one block of the generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    /// Index into the sorted block list.
    pub block_idx: usize,
    pub day: u8,
    pub start: u8,
}

/// Search result: the report destined for the run's meta plus the concrete
/// placements to materialise. `blocks` is returned in its search order so
/// `Placement::block_idx` stays meaningful.
#[derive(Debug)]
pub struct SolveOutcome {
    pub report: GenerationReport,
    pub placements: Vec<Placement>,
    pub blocks: Vec<ClassBlock>,
}

/// Sorts blocks by constraint strength: labs first, longer blocks first,
/// then ascending teacher id. Stable and deterministic.
pub fn sort_blocks(blocks: &mut [ClassBlock]) {
    blocks.sort_by_key(|b| (Reverse(b.is_lab), Reverse(b.duration_slots), b.teacher_id));
}

/// Valid starting slots for a block of this kind.
pub fn candidate_starts(block: &ClassBlock) -> &'static [u8] {
    if block.is_lab && block.duration_slots == 3 {
        &LAB_START_SLOTS
    } else if block.duration_slots == 2 {
        // 2-slot blocks must not span lunch.
        &[1, 2, 3, 5, 6]
    } else {
        &[1, 2, 3, 4, 5, 6, 7]
    }
}

/// Scores a feasible placement; higher wins. The terms favour spreading the
/// week, afternoon labs, mornings for theory, and keeping late Friday free.
pub fn score_placement(block: &ClassBlock, day: u8, start: u8, grid: &Grid) -> i32 {
    let mut score = 100;

    score -= grid.booked_slots_on_day(day) as i32 * 5;

    if block.is_lab && start >= 5 {
        score += 20;
    }

    if !block.is_lab {
        if start <= 3 {
            score += 15;
        } else if start == 5 || start == 6 {
            score += 10;
        }
    }

    if start >= SLOTS_PER_DAY {
        score -= 10;
    }

    if day == FRIDAY {
        score -= 5;
    }

    score
}

/// Places the given blocks on the grid and reports the outcome.
///
/// The grid may already carry external bookings from committed entries of
/// the session. Unplaced blocks get placement suggestions enumerating every
/// window that fits the final grid alone.
pub fn solve(
    mut blocks: Vec<ClassBlock>,
    grid: &mut Grid,
    oracle: &dyn OccupancyOracle,
) -> SolveOutcome {
    sort_blocks(&mut blocks);

    let mut placements = Vec::with_capacity(blocks.len());
    let placed = backtrack(&blocks, 0, grid, oracle, &mut placements);

    debug!(placed, total = blocks.len(), "search finished");

    let mut report = GenerationReport {
        total_blocks: blocks.len(),
        placed_blocks: placed,
        ..Default::default()
    };

    for block in &blocks[placed..] {
        report.suggestions.push(PlacementSuggestion {
            block: block.clone(),
            suggested_slots: suggest_slots(block, grid),
            conflict_reasons: vec!["No available slot found".to_string()],
        });
        report.unplaced_blocks.push(block.clone());
    }

    SolveOutcome {
        report,
        placements,
        blocks,
    }
}

/// Depth-first placement of `blocks[index..]`. Returns the highest index
/// reached: `blocks.len()` when everything fits, otherwise the index of the
/// first block left unplaced. A deeper partial result is always preferred
/// over retrying the current block's alternatives, so the first feasible
/// best-scored choice at each level is kept.
fn backtrack(
    blocks: &[ClassBlock],
    index: usize,
    grid: &mut Grid,
    oracle: &dyn OccupancyOracle,
    placements: &mut Vec<Placement>,
) -> usize {
    if index >= blocks.len() {
        return index;
    }

    let block = &blocks[index];

    let mut candidates: Vec<(i32, u8, u8)> = Vec::new();
    for day in 1..=DAYS_PER_WEEK {
        for &start in candidate_starts(block) {
            if can_place(block, blocks, grid, oracle, day, start) {
                candidates.push((score_placement(block, day, start, grid), day, start));
            }
        }
    }
    // Stable: equal scores keep (day, start) enumeration order.
    candidates.sort_by(|a, b| b.0.cmp(&a.0));

    for (_, day, start) in candidates {
        grid.place(index, day, start, block.duration_slots);
        placements.push(Placement {
            block_idx: index,
            day,
            start,
        });

        let reached = backtrack(blocks, index + 1, grid, oracle, placements);
        if reached > index {
            return reached;
        }

        placements.pop();
        grid.remove(day, start, block.duration_slots);
    }

    index
}

/// Every `(day, start)` window that would fit the block against the grid
/// alone, ignoring teacher/room/cohort conflicts.
fn suggest_slots(block: &ClassBlock, grid: &Grid) -> Vec<SuggestedSlot> {
    let mut slots = Vec::new();
    for day in 1..=DAYS_PER_WEEK {
        for start in 1..=SLOTS_PER_DAY {
            if grid.fits_locally(day, start, block.duration_slots) {
                slots.push(SuggestedSlot {
                    day_of_week: day,
                    slot_start: start,
                    slot_length: block.duration_slots,
                });
            }
        }
    }
    slots
}
