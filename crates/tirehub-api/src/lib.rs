//! # tirehub-api
//!
//! HTTP API layer for TireHub built on Axum.
//!
//! Provides the REST endpoints, middleware (authorization, request logging,
//! CORS), extractors, DTOs, and the wiring that turns configuration plus
//! repositories into a ready [`AppState`].

pub mod app;
pub mod dto;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{Repositories, build_state, serve};
pub use router::build_router;
pub use state::AppState;
