use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use services::session::{Role, SessionState};

use crate::response::ApiResponse;
use crate::state::AppState;

/// A request made while the student account is logged in.
///
/// Holds the logged-in username.
///
/// # Errors
/// - `401 Unauthorized` when nobody is logged in.
/// - `403 Forbidden` when staff is logged in.
///
/// # Example
/// ```ignore
/// async fn submit(StudentUser(username): StudentUser) -> impl IntoResponse {
///     // only reachable by the student account
/// }
/// ```
#[derive(Debug, Clone)]
pub struct StudentUser(pub String);

/// A request made while the staff account is logged in.
///
/// Same rejections as [`StudentUser`], with the roles swapped.
#[derive(Debug, Clone)]
pub struct StaffUser(pub String);

impl FromRequestParts<AppState> for StudentUser {
    type Rejection = Response;

    async fn from_request_parts(_parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        require_role(state, Role::Student).await.map(StudentUser)
    }
}

impl FromRequestParts<AppState> for StaffUser {
    type Rejection = Response;

    async fn from_request_parts(_parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        require_role(state, Role::Staff).await.map(StaffUser)
    }
}

async fn require_role(state: &AppState, role: Role) -> Result<String, Response> {
    let helpdesk = state.helpdesk().lock().await;
    match helpdesk.session() {
        SessionState::Anonymous => Err((
            StatusCode::UNAUTHORIZED,
            Json(ApiResponse::<()>::error("Authentication required")),
        )
            .into_response()),
        session if session.role() == Some(role) => {
            Ok(session.username().unwrap_or_default().to_owned())
        }
        _ => Err((
            StatusCode::FORBIDDEN,
            Json(ApiResponse::<()>::error(format!("{role} access required"))),
        )
            .into_response()),
    }
}
