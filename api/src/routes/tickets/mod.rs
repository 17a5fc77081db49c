//! # tickets Routes Module
//!
//! Routes for the `/tickets` endpoint group.
//!
//! ## Structure
//! - `get.rs`: listing, lookup, stats, export, attachment download, issue budget
//! - `post.rs`: ticket submission (multipart)
//! - `put.rs`: saving a solution, assigning a ticket
//! - `delete.rs`: deleting a ticket
//!
//! ## Access
//! - Student only: `POST /tickets`
//! - Staff only: listing, stats, export, solution, assign, delete
//! - Anyone: lookup, attachment download, issue budget

pub mod delete;
pub mod get;
pub mod post;
pub mod put;

use crate::state::AppState;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, put},
};
use services::attachment::MAX_UPLOAD_BYTES;

use delete::delete_ticket;
use get::{
    download_attachment, export_tickets, get_issue_budget, get_stats, list_tickets,
    lookup_tickets,
};
use post::submit_ticket;
use put::{assign_ticket, save_solution};

/// Room for the text fields and multipart framing on top of the largest
/// accepted file.
const SUBMIT_BODY_LIMIT: usize = MAX_UPLOAD_BYTES as usize + 64 * 1024;

/// Builds the `/tickets` route group.
///
/// - `GET /tickets` → `list_tickets`
/// - `POST /tickets` → `submit_ticket`
/// - `GET /tickets/lookup` → `lookup_tickets`
/// - `GET /tickets/stats` → `get_stats`
/// - `GET /tickets/export` → `export_tickets`
/// - `GET /tickets/issue-budget` → `get_issue_budget`
/// - `DELETE /tickets/{ticket_id}` → `delete_ticket`
/// - `PUT /tickets/{ticket_id}/solution` → `save_solution`
/// - `PUT /tickets/{ticket_id}/assign` → `assign_ticket`
/// - `GET /tickets/{ticket_id}/attachment` → `download_attachment`
pub fn ticket_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(list_tickets)
                .post(submit_ticket)
                .layer(DefaultBodyLimit::max(SUBMIT_BODY_LIMIT)),
        )
        .route("/lookup", get(lookup_tickets))
        .route("/stats", get(get_stats))
        .route("/export", get(export_tickets))
        .route("/issue-budget", get(get_issue_budget))
        .route("/{ticket_id}", delete(delete_ticket))
        .route("/{ticket_id}/solution", put(save_solution))
        .route("/{ticket_id}/assign", put(assign_ticket))
        .route("/{ticket_id}/attachment", get(download_attachment))
}
