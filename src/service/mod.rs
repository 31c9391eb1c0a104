//! Service layer: run lifecycle orchestration around the engine.

pub mod clock;
pub mod routine;

pub use clock::{Clock, FixedClock, SystemClock};
pub use routine::{RoutineError, RoutineResult, RoutineService};
