//! Plagiarism checker HTTP API server (Axum).
//!
//! Accepts uploads, checks them against themselves, the upload corpus and the
//! web, and serves back the stored files and their reports.

pub mod error;
pub mod routes;
pub mod state;

use axum::{extract::DefaultBodyLimit, Router};
use state::AppState;

/// Build the application router with a custom state.
pub fn app_with_state(state: AppState) -> Router {
    let body_limit = state.max_upload_bytes;
    Router::new()
        .merge(routes::health_routes())
        .merge(routes::file_routes())
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
