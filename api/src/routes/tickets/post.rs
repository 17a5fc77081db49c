use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use services::attachment::{AttachmentError, Upload};
use services::service::AppError;
use services::ticket_service::{CreateTicket, SubmitOutcome};

use crate::auth::StudentUser;
use crate::response::{ApiResponse, error_response};
use crate::state::AppState;

/// POST /tickets
///
/// Submit a new ticket as the logged-in student.
///
/// ### Request Body (multipart/form-data)
/// - `name`, `email`, `category`, `issue` (required)
/// - `priority` (optional): `Low`, `Medium` or `High`; defaults to `Medium`
/// - `confirm_duplicate` (optional): `true` to submit despite a similar
///   ticket from the last 24 hours
/// - `file` (optional): PDF, JPG, PNG, DOC, DOCX or TXT, at most 5 MB. Files
///   over 2 MB are accepted but not kept; the response says so in `warning`.
///
/// ### Responses
///
/// - `201 Created`
/// ```json
/// {
///   "success": true,
///   "data": {
///     "ticket": { "id": 1741944600000, "status": "Pending", "...": "..." },
///     "attachment_stored": true,
///     "warning": null
///   },
///   "message": "Ticket submitted successfully"
/// }
/// ```
///
/// - `400 Bad Request` (missing fields, malformed email, issue over 500
///   characters, unknown category or priority, disallowed or oversized file)
/// - `401 Unauthorized` / `403 Forbidden` (not logged in as the student)
/// - `409 Conflict` (similar ticket in the last 24 hours and not confirmed)
pub async fn submit_ticket(
    State(app_state): State<AppState>,
    _student: StudentUser,
    mut multipart: Multipart,
) -> Response {
    let mut req = CreateTicket::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<()>::error(format!("Invalid form data: {e}"))),
                )
                    .into_response();
            }
        };

        let field_name = field.name().unwrap_or_default().to_owned();
        if field_name == "file" {
            let file_name = field.file_name().unwrap_or_default().to_owned();
            let mime_type = field.content_type().unwrap_or_default().to_owned();
            let bytes = match field.bytes().await {
                Ok(bytes) => bytes,
                Err(e) => {
                    return error_response(AppError::Attachment(AttachmentError::ReadFailed(
                        e.to_string(),
                    )));
                }
            };
            // Browsers send an empty, unnamed part when no file was chosen.
            if !file_name.is_empty() {
                req.upload = Some(Upload {
                    file_name,
                    mime_type,
                    bytes: bytes.to_vec(),
                });
            }
            continue;
        }

        let value = match field.text().await {
            Ok(value) => value,
            Err(e) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ApiResponse::<()>::error(format!("Invalid form data: {e}"))),
                )
                    .into_response();
            }
        };
        match field_name.as_str() {
            "name" => req.fields.name = value,
            "email" => req.fields.email = value,
            "category" => req.fields.category = value,
            "priority" => req.fields.priority = value,
            "issue" => req.fields.issue = value,
            "confirm_duplicate" => {
                req.confirm_duplicate = matches!(value.trim(), "true" | "1" | "on" | "yes")
            }
            _ => {}
        }
    }

    let mut helpdesk = app_state.helpdesk().lock().await;
    match helpdesk.submit(req) {
        Ok(outcome) => {
            let message = if outcome.warning.is_some() {
                "Ticket submitted without its attachment"
            } else {
                "Ticket submitted successfully"
            };
            (
                StatusCode::CREATED,
                Json(ApiResponse::<SubmitOutcome>::success(outcome, message)),
            )
                .into_response()
        }
        Err(e) => error_response(e),
    }
}
