//! Routine generation engine.
//!
//! The engine turns a semester offering into a conflict-free weekly routine
//! on a fixed 5-day × 7-slot grid. It is organised leaves-first:
//!
//! - [`grid`]: the working grid mutated in place during the search
//! - [`blocks`]: expands course offerings into class blocks (credit
//!   patterns, lab group splits)
//! - [`occupancy`]: teacher / room / cohort availability against committed
//!   entries of the session
//! - [`constraints`]: validates one candidate placement
//! - [`search`]: ordered backtracking with scored placement selection
//! - [`report`]: the generation report persisted into the run's meta
//!
//! Everything here is synchronous and CPU-bound; the committed-entry
//! snapshot is loaded once per generation, so the search never touches the
//! store.

pub mod blocks;
pub mod constraints;
pub mod grid;
pub mod occupancy;
pub mod report;
pub mod search;

pub use blocks::{build_blocks, BlockBuildOutcome, ClassBlock};
pub use grid::Grid;
pub use occupancy::{CommittedSnapshot, OccupancyOracle};
pub use report::{GenerationReport, PlacementSuggestion};
pub use search::{solve, Placement, SolveOutcome};
