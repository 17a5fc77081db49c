//! HTTP route entry point for `/api/...`.
//!
//! Route groups:
//! - `/health` → Health check endpoint (public)
//! - `/auth` → Login, logout and the current session (public)
//! - `/tickets` → Ticket submission, lookup and staff management; each
//!   handler declares the role it needs through an extractor

use crate::routes::{auth::auth_routes, health::health_routes, tickets::ticket_routes};
use crate::state::AppState;
use axum::Router;

pub mod auth;
pub mod common;
pub mod health;
pub mod tickets;

/// Builds the complete application router for all HTTP endpoints.
///
/// The returned router already carries `app_state`, so it can be nested
/// straight under `/api` and served.
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .nest("/auth", auth_routes())
        .nest("/tickets", ticket_routes())
        .with_state(app_state)
}
