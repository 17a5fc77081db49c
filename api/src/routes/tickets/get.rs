use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use db::filters::TicketFilter;
use db::models::ticket::{Category, Ticket, TicketStatus};
use serde::Deserialize;
use services::validation::{IssueBudget, issue_budget};

use crate::auth::StaffUser;
use crate::response::{ApiResponse, error_response};
use crate::routes::common::{content_disposition, parse_filter_value};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TicketListQuery {
    pub search: Option<String>,
    pub status: Option<String>,
    pub category: Option<String>,
}

/// GET /tickets
///
/// List tickets for staff, newest first, narrowed by optional filters.
///
/// ### Query Parameters
/// - `search` (optional): Case-insensitive text matched against name, email and issue
/// - `status` (optional): `Pending` or `Solved`; blank or `all` for every status
/// - `category` (optional): `Hardware`, `Software`, `Network`, `Account` or `Other`;
///   blank or `all` for every category
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": [
///     {
///       "id": 1741944600000,
///       "name": "Alice",
///       "email": "a@x.com",
///       "category": "Software",
///       "priority": "Low",
///       "issue": "app crashes",
///       "solution": "",
///       "status": "Pending",
///       "date": "2025-03-14T09:30:00Z",
///       "assignedTo": "",
///       "attachment": null
///     }
///   ],
///   "message": "Tickets retrieved successfully"
/// }
/// ```
///
/// - `400 Bad Request` (unknown status or category)
/// - `401 Unauthorized` / `403 Forbidden` (not logged in as staff)
pub async fn list_tickets(
    State(app_state): State<AppState>,
    _staff: StaffUser,
    Query(query): Query<TicketListQuery>,
) -> Response {
    let status = match parse_filter_value::<TicketStatus>(query.status.as_deref(), "status") {
        Ok(status) => status,
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error(message)),
            )
                .into_response();
        }
    };
    let category = match parse_filter_value::<Category>(query.category.as_deref(), "category") {
        Ok(category) => category,
        Err(message) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::<()>::error(message)),
            )
                .into_response();
        }
    };

    let filter = TicketFilter {
        status,
        category,
        ..TicketFilter::new().with_search(query.search.unwrap_or_default().trim())
    };

    let helpdesk = app_state.helpdesk().lock().await;
    match helpdesk.list(&filter) {
        Ok(tickets) => (
            StatusCode::OK,
            Json(ApiResponse::<Vec<Ticket>>::success(
                tickets,
                "Tickets retrieved successfully",
            )),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// GET /tickets/lookup
///
/// Find the tickets a submitter filed, by exact name and email. Open to
/// everyone. The answer is delayed by the configured lookup delay.
///
/// ### Query Parameters
/// - `name` (required)
/// - `email` (required, must look like an email address)
///
/// ### Responses
///
/// - `200 OK` with the matching tickets, newest first. An empty list is not an error:
/// ```json
/// {
///   "success": true,
///   "data": [],
///   "message": "No tickets found for this name and email"
/// }
/// ```
///
/// - `400 Bad Request` (missing name or email, or malformed email)
pub async fn lookup_tickets(
    State(app_state): State<AppState>,
    Query(query): Query<LookupQuery>,
) -> Response {
    tokio::time::sleep(app_state.lookup_delay()).await;

    let helpdesk = app_state.helpdesk().lock().await;
    match helpdesk.lookup(&query.name, &query.email) {
        Ok(tickets) => {
            let message = if tickets.is_empty() {
                "No tickets found for this name and email".to_string()
            } else {
                format!("Found {} ticket(s)", tickets.len())
            };
            (
                StatusCode::OK,
                Json(ApiResponse::<Vec<Ticket>>::success(tickets, message)),
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}

/// GET /tickets/stats
///
/// Ticket counts for the staff dashboard.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": { "total": 3, "pending": 2, "solved": 1 },
///   "message": "Stats retrieved successfully"
/// }
/// ```
pub async fn get_stats(State(app_state): State<AppState>, _staff: StaffUser) -> Response {
    let helpdesk = app_state.helpdesk().lock().await;
    match helpdesk.stats() {
        Ok(stats) => (
            StatusCode::OK,
            Json(ApiResponse::success(stats, "Stats retrieved successfully")),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /tickets/export
///
/// Download every ticket as a pretty-printed JSON array, as a file named
/// `helpdesk_tickets_YYYY-MM-DD.json`. The body is the raw array, not the
/// usual response envelope.
///
/// ### Responses
/// - `200 OK` with `Content-Disposition: attachment`
/// - `401 Unauthorized` / `403 Forbidden` (not logged in as staff)
pub async fn export_tickets(State(app_state): State<AppState>, _staff: StaffUser) -> Response {
    let helpdesk = app_state.helpdesk().lock().await;
    let export = match helpdesk.export() {
        Ok(export) => export,
        Err(e) => return error_response(e),
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        content_disposition(&export.file_name),
    );

    (StatusCode::OK, headers, export.contents).into_response()
}

/// GET /tickets/{ticket_id}/attachment
///
/// Download the file embedded in a ticket, under its original name and
/// MIME type.
///
/// ### Path Parameters
/// - `ticket_id` (i64)
///
/// ### Responses
/// - `200 OK` with the raw file bytes
/// - `404 Not Found` (no such ticket, or the ticket has no attachment)
/// - `500 Internal Server Error` (stored data cannot be decoded)
pub async fn download_attachment(
    State(app_state): State<AppState>,
    Path(ticket_id): Path<i64>,
) -> Response {
    let helpdesk = app_state.helpdesk().lock().await;
    let (attachment, bytes) = match helpdesk.attachment(ticket_id) {
        Ok(found) => found,
        Err(e) => return error_response(e),
    };

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_str(&attachment.mime_type)
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        content_disposition(&attachment.name),
    );

    (StatusCode::OK, headers, bytes).into_response()
}

#[derive(Debug, Deserialize)]
pub struct IssueBudgetQuery {
    #[serde(default)]
    pub length: usize,
}

/// GET /tickets/issue-budget
///
/// How many characters are left for an issue description of `length`
/// characters, and how close that is to the limit (`normal` from 100 left,
/// `warning` from 50, `critical` below that).
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": { "remaining": 80, "level": "warning" },
///   "message": "80 characters remaining"
/// }
/// ```
pub async fn get_issue_budget(Query(query): Query<IssueBudgetQuery>) -> impl IntoResponse {
    let budget = issue_budget(query.length);
    let message = format!("{} characters remaining", budget.remaining);
    (
        StatusCode::OK,
        Json(ApiResponse::<IssueBudget>::success(budget, message)),
    )
}
