//! # Routine Generation Engine
//!
//! Generates weekly class routines for a university department's semester
//! offering: given the courses to teach (teachers, rooms, weekly loads,
//! lab/theory flags) and the already-committed schedules of the academic
//! session, it produces a conflict-free assignment of class blocks to a
//! fixed 5-day × 7-slot weekly grid.
//!
//! ## Architecture
//!
//! The crate is organised into layers:
//!
//! - [`api`]: id newtypes and the shared grid vocabulary
//! - [`models`]: flattened input snapshots and persisted schedule records
//! - [`engine`]: block derivation, constraint checking, and the scored
//!   backtracking search (pure, synchronous, store-free)
//! - [`service`]: run lifecycle orchestration (generate / commit / cancel /
//!   delete) including commit-time re-validation
//! - [`db`]: repository trait plus the in-memory backend
//! - [`http`]: axum REST API (feature = `http-server`)
//!
//! ## Determinism
//!
//! Block ordering, candidate enumeration, and score tie-breaking are all
//! stable, so the same offering snapshot and the same committed entries
//! always produce the same routine.

pub mod api;

pub mod db;
pub mod engine;
pub mod models;
pub mod service;

pub mod http;
