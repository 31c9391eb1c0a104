//! Persistence layer.
//!
//! The engine talks to storage through the [`repository::RoutineRepository`]
//! trait so tests and local development can run without a database. The
//! in-memory [`local::LocalRepository`] is the default backend; an
//! SQL-backed implementation can be added behind a feature flag without
//! touching the engine.

pub mod factory;
#[cfg(feature = "local-repo")]
pub mod local;
pub mod repository;

pub use factory::{RepositoryFactory, RepositoryType};
#[cfg(feature = "local-repo")]
pub use local::LocalRepository;
pub use repository::{RepositoryError, RepositoryResult, RoutineRepository};
