//! The working weekly grid.
//!
//! A fixed 5×7 matrix of value-typed cells, created empty per generation and
//! pre-marked with committed entries of the same session. Cells booked by
//! pre-loaded entries carry no owner: an external booking that still
//! conflicts. Cells booked by the search own the index of the placing block,
//! so constraint checks can resolve which course a booking belongs to
//! without aliasing the block objects themselves.

use crate::api::{DAYS_PER_WEEK, MORNING_LAST_SLOT, SLOTS_PER_DAY};

/// One cell of the working grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cell {
    booked: bool,
    /// Index into the generation's block list, `None` for external bookings.
    owner: Option<usize>,
}

/// The 5-day × 7-slot working grid. Days and slots are 1-based everywhere;
/// the matrix indices are private.
#[derive(Debug, Clone)]
pub struct Grid {
    cells: [[Cell; SLOTS_PER_DAY as usize]; DAYS_PER_WEEK as usize],
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    /// An empty grid; every cell free.
    pub fn new() -> Self {
        Self {
            cells: [[Cell::default(); SLOTS_PER_DAY as usize]; DAYS_PER_WEEK as usize],
        }
    }

    fn cell(&self, day: u8, slot: u8) -> &Cell {
        &self.cells[day as usize - 1][slot as usize - 1]
    }

    fn cell_mut(&mut self, day: u8, slot: u8) -> &mut Cell {
        &mut self.cells[day as usize - 1][slot as usize - 1]
    }

    pub fn is_booked(&self, day: u8, slot: u8) -> bool {
        self.cell(day, slot).booked
    }

    /// The block index owning a cell, `None` when free or externally booked.
    pub fn owner(&self, day: u8, slot: u8) -> Option<usize> {
        self.cell(day, slot).owner
    }

    /// Marks a cell booked without an owner. Used for committed entries
    /// loaded before the search starts.
    pub fn mark_external(&mut self, day: u8, slot: u8) {
        if (1..=DAYS_PER_WEEK).contains(&day) && (1..=SLOTS_PER_DAY).contains(&slot) {
            *self.cell_mut(day, slot) = Cell {
                booked: true,
                owner: None,
            };
        }
    }

    /// Books the `length` slots starting at `start` for the block at
    /// `block_idx`. The caller has already validated the window.
    pub fn place(&mut self, block_idx: usize, day: u8, start: u8, length: u8) {
        for slot in start..start + length {
            *self.cell_mut(day, slot) = Cell {
                booked: true,
                owner: Some(block_idx),
            };
        }
    }

    /// Undoes a previous [`place`](Self::place) call.
    pub fn remove(&mut self, day: u8, start: u8, length: u8) {
        for slot in start..start + length {
            *self.cell_mut(day, slot) = Cell::default();
        }
    }

    /// Whether a window of `length` slots starting at `start` lies within the
    /// day, does not straddle the lunch gap, and is entirely free.
    pub fn fits_locally(&self, day: u8, start: u8, length: u8) -> bool {
        if start < 1 {
            return false;
        }
        let end = start + length - 1;
        if end > SLOTS_PER_DAY {
            return false;
        }
        // Morning blocks must end in the morning.
        if start <= MORNING_LAST_SLOT && end > MORNING_LAST_SLOT {
            return false;
        }
        (start..=end).all(|slot| !self.is_booked(day, slot))
    }

    /// Number of booked slots on a day, external bookings included. Feeds
    /// the "spread the week" scoring term.
    pub fn booked_slots_on_day(&self, day: u8) -> u8 {
        (1..=SLOTS_PER_DAY)
            .filter(|&slot| self.is_booked(day, slot))
            .count() as u8
    }

    /// Iterates booked cells of a day as `(slot, owner)` pairs.
    pub fn booked_on_day(&self, day: u8) -> impl Iterator<Item = (u8, Option<usize>)> + '_ {
        (1..=SLOTS_PER_DAY).filter_map(move |slot| {
            let cell = self.cell(day, slot);
            cell.booked.then_some((slot, cell.owner))
        })
    }
}
