use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use db::models::ticket::Ticket;
use serde::Deserialize;

use crate::auth::StaffUser;
use crate::response::{ApiResponse, error_response};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SolutionRequest {
    #[serde(default)]
    pub solution: String,
}

/// PUT /tickets/{ticket_id}/solution
///
/// Save the staff answer to a ticket. A solution with any non-whitespace
/// text marks the ticket `Solved`; an empty one puts it back to `Pending`.
///
/// ### Request Body
/// ```json
/// { "solution": "Reinstall the driver" }
/// ```
///
/// ### Responses
/// - `200 OK` with the updated ticket
/// - `401 Unauthorized` / `403 Forbidden` (not logged in as staff)
/// - `404 Not Found` (no such ticket)
pub async fn save_solution(
    State(app_state): State<AppState>,
    _staff: StaffUser,
    Path(ticket_id): Path<i64>,
    Json(req): Json<SolutionRequest>,
) -> Response {
    let mut helpdesk = app_state.helpdesk().lock().await;
    match helpdesk.save_solution(ticket_id, &req.solution) {
        Ok(ticket) => {
            let message = if ticket.is_solved() {
                "Solution saved, ticket marked as solved"
            } else {
                "Solution cleared, ticket is pending"
            };
            (
                StatusCode::OK,
                Json(ApiResponse::<Ticket>::success(ticket, message)),
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

/// PUT /tickets/{ticket_id}/assign
///
/// Assign a ticket to the logged-in staff member.
///
/// ### Responses
/// - `200 OK` with the updated ticket (`assignedTo` set to the staff username)
/// - `404 Not Found` (no such ticket)
pub async fn assign_ticket(
    State(app_state): State<AppState>,
    _staff: StaffUser,
    Path(ticket_id): Path<i64>,
) -> Response {
    let mut helpdesk = app_state.helpdesk().lock().await;
    match helpdesk.assign_to_me(ticket_id) {
        Ok(ticket) => (
            StatusCode::OK,
            Json(ApiResponse::<Ticket>::success(ticket, "Ticket assigned")),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
