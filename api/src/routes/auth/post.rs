use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::format_validation_errors;
use serde::Deserialize;
use services::session::SessionState;
use validator::Validate;

use crate::response::{ApiResponse, error_response};
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// POST /auth/login
///
/// Log in as the student or the staff account. Surrounding whitespace in
/// either field is ignored. Only one session exists at a time, so a second
/// login fails until the current one logs out.
///
/// ### Request Body
/// ```json
/// {
///   "username": "user123",
///   "password": "changeMe123!"
/// }
/// ```
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": { "role": "student", "username": "user123" },
///   "message": "Login successful"
/// }
/// ```
///
/// - `400 Bad Request` (empty username or password)
/// - `401 Unauthorized` (wrong username or password; the message does not say which)
/// ```json
/// {
///   "success": false,
///   "data": null,
///   "message": "Invalid credentials"
/// }
/// ```
///
/// - `409 Conflict` (someone is already logged in)
pub async fn login(State(app_state): State<AppState>, Json(req): Json<LoginRequest>) -> Response {
    if let Err(validation_errors) = req.validate() {
        let error_message = format_validation_errors(&validation_errors);
        return (
            StatusCode::BAD_REQUEST,
            Json(ApiResponse::<()>::error(error_message)),
        )
            .into_response();
    }

    let mut helpdesk = app_state.helpdesk().lock().await;
    match helpdesk.login(&req.username, &req.password) {
        Ok(_) => (
            StatusCode::OK,
            Json(ApiResponse::<SessionState>::success(
                helpdesk.session().clone(),
                "Login successful",
            )),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /auth/logout
///
/// End the current session. Logging out while nobody is logged in is not an
/// error.
///
/// ### Responses
///
/// - `200 OK`
/// ```json
/// {
///   "success": true,
///   "data": { "role": "anonymous" },
///   "message": "Logged out"
/// }
/// ```
pub async fn logout(State(app_state): State<AppState>) -> impl IntoResponse {
    let mut helpdesk = app_state.helpdesk().lock().await;
    helpdesk.logout();
    (
        StatusCode::OK,
        Json(ApiResponse::success(helpdesk.session().clone(), "Logged out")),
    )
}
