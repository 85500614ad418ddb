//! HTTP server - thin axum handlers delegating to domain actions.

pub mod app;
pub mod routes;

pub use app::{build_app, AppState};
