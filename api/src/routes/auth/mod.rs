//! # auth Routes Module
//!
//! Routes for the `/auth` endpoint group.
//!
//! ## Structure
//! - `post.rs`: POST handlers (login, logout)
//! - `get.rs`: GET handlers (current session)

pub mod get;
pub mod post;

use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

use get::get_session;
use post::{login, logout};

/// Builds the `/auth` route group.
///
/// - `POST /auth/login` → `login`
/// - `POST /auth/logout` → `logout`
/// - `GET /auth/session` → `get_session`
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/session", get(get_session))
}
