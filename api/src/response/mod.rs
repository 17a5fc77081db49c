use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use services::attachment::AttachmentError;
use services::service::AppError;

/// Standardized API response wrapper for all outgoing JSON responses.
///
/// Every JSON endpoint answers with the same envelope:
/// ```json
/// {
///   "success": true,
///   "data": { ... },
///   "message": "Some message"
/// }
/// ```
///
/// - `T` is the type of the `data` payload.
/// - `success` is a boolean indicating operation status.
/// - `message` provides a human-readable context string.
///
/// ## Example (error):
/// ```json
/// {
///   "success": false,
///   "data": null,
///   "message": "Ticket 42 not found"
/// }
/// ```
#[derive(Serialize)]
pub struct ApiResponse<T>
where
    T: Serialize,
{
    pub success: bool,
    pub data: T,
    pub message: String,
}

impl<T> ApiResponse<T>
where
    T: Serialize,
{
    /// Constructs a success response with the given data and message.
    pub fn success(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            message: message.into(),
        }
    }

    /// Constructs an error response with a message and default `data`.
    pub fn error(message: impl Into<String>) -> Self
    where
        T: Default,
    {
        Self {
            success: false,
            data: T::default(),
            message: message.into(),
        }
    }
}

/// HTTP status for each helpdesk failure.
///
/// | Error                                    | Status |
/// |------------------------------------------|--------|
/// | validation, bad attachment selection     | 400    |
/// | invalid credentials, not logged in       | 401    |
/// | wrong role                               | 403    |
/// | unknown ticket or attachment             | 404    |
/// | unconfirmed duplicate, already logged in | 409    |
/// | corrupt attachment, storage failure      | 500    |
pub fn status_for(err: &AppError) -> StatusCode {
    match err {
        AppError::Validation(_) => StatusCode::BAD_REQUEST,
        AppError::Attachment(AttachmentError::Corrupt) => StatusCode::INTERNAL_SERVER_ERROR,
        AppError::Attachment(_) => StatusCode::BAD_REQUEST,
        AppError::InvalidCredentials | AppError::Unauthenticated => StatusCode::UNAUTHORIZED,
        AppError::Forbidden(_) => StatusCode::FORBIDDEN,
        AppError::TicketNotFound(_) | AppError::AttachmentNotFound => StatusCode::NOT_FOUND,
        AppError::DuplicateTicket | AppError::AlreadyAuthenticated => StatusCode::CONFLICT,
        AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Renders `err` as an error envelope with the matching status code.
///
/// Storage failures are logged and reported with a generic message.
pub fn error_response(err: AppError) -> Response {
    let status = status_for(&err);
    let message = match &err {
        AppError::Store(e) => {
            tracing::error!(error = %e, "Storage failure");
            "Failed to save data".to_string()
        }
        other => other.to_string(),
    };
    (status, Json(ApiResponse::<()>::error(message))).into_response()
}
