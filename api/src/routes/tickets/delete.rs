use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::auth::StaffUser;
use crate::response::{ApiResponse, error_response};
use crate::state::AppState;

/// DELETE /tickets/{ticket_id}
///
/// Permanently remove a ticket.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": null,
///   "message": "Ticket deleted successfully"
/// }
/// ```
///
/// - `401 Unauthorized` / `403 Forbidden` (not logged in as staff)
/// - `404 Not Found` (no such ticket)
pub async fn delete_ticket(
    State(app_state): State<AppState>,
    _staff: StaffUser,
    Path(ticket_id): Path<i64>,
) -> Response {
    let mut helpdesk = app_state.helpdesk().lock().await;
    match helpdesk.delete(ticket_id) {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse::<()>::success((), "Ticket deleted successfully")),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
