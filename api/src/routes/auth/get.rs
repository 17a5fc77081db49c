use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};

use crate::response::ApiResponse;
use crate::state::AppState;

/// GET /auth/session
///
/// Who is logged in right now.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": { "role": "staff", "username": "admin456" },
///   "message": "Session retrieved"
/// }
/// ```
/// `data` is `{ "role": "anonymous" }` when nobody is logged in.
pub async fn get_session(State(app_state): State<AppState>) -> impl IntoResponse {
    let helpdesk = app_state.helpdesk().lock().await;
    (
        StatusCode::OK,
        Json(ApiResponse::success(
            helpdesk.session().clone(),
            "Session retrieved",
        )),
    )
}
