//! HTTP server module.
//!
//! Exposes the routine generation service as a REST API via axum. The
//! handlers stay thin: request parsing and response shaping here, business
//! logic in the service layer, persistence behind the repository trait.

#[cfg(feature = "http-server")]
pub mod dto;

#[cfg(feature = "http-server")]
pub mod error;

#[cfg(feature = "http-server")]
pub mod handlers;

#[cfg(feature = "http-server")]
pub mod router;

#[cfg(feature = "http-server")]
pub mod state;

#[cfg(feature = "http-server")]
pub use router::create_router;

#[cfg(feature = "http-server")]
pub use state::AppState;
