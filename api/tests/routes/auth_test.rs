use crate::helpers::app::{STAFF, STUDENT};
use crate::helpers::{json_body, json_request, login, make_test_app};
use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn student_login_sets_session() {
    let app = make_test_app();

    let response = app
        .send(json_request(
            "POST",
            "/api/auth/login",
            json!({ "username": STUDENT.0, "password": STUDENT.1 }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = json_body(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["role"], "student");
    assert_eq!(json["data"]["username"], "user123");

    let session = json_body(app.get("/api/auth/session").await).await;
    assert_eq!(session["data"]["role"], "student");
}

#[tokio::test]
async fn credentials_are_trimmed() {
    let app = make_test_app();
    assert_eq!(login(&app, " admin456 ", " securePass789!").await, StatusCode::OK);

    let session = json_body(app.get("/api/auth/session").await).await;
    assert_eq!(session["data"]["role"], "staff");
    assert_eq!(session["data"]["username"], "admin456");
}

#[tokio::test]
async fn wrong_password_and_unknown_user_look_the_same() {
    let app = make_test_app();

    let wrong_password = app
        .send(json_request(
            "POST",
            "/api/auth/login",
            json!({ "username": STAFF.0, "password": "nope" }),
        ))
        .await;
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    let a = json_body(wrong_password).await;

    let unknown_user = app
        .send(json_request(
            "POST",
            "/api/auth/login",
            json!({ "username": "nobody", "password": STAFF.1 }),
        ))
        .await;
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    let b = json_body(unknown_user).await;

    assert_eq!(a["message"], "Invalid credentials");
    assert_eq!(a["message"], b["message"]);

    let session = json_body(app.get("/api/auth/session").await).await;
    assert_eq!(session["data"]["role"], "anonymous");
}

#[tokio::test]
async fn empty_fields_are_rejected_before_checking() {
    let app = make_test_app();
    let response = app
        .send(json_request(
            "POST",
            "/api/auth/login",
            json!({ "username": "", "password": "" }),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert_eq!(json["success"], false);
    assert!(json["message"].as_str().unwrap().contains("Username is required"));
}

#[tokio::test]
async fn second_login_requires_logout() {
    let app = make_test_app();
    assert_eq!(login(&app, STUDENT.0, STUDENT.1).await, StatusCode::OK);
    assert_eq!(login(&app, STAFF.0, STAFF.1).await, StatusCode::CONFLICT);

    app.logout().await;
    assert_eq!(login(&app, STAFF.0, STAFF.1).await, StatusCode::OK);
}

#[tokio::test]
async fn logout_returns_to_anonymous() {
    let app = make_test_app();
    app.as_staff().await;
    app.logout().await;

    let session = json_body(app.get("/api/auth/session").await).await;
    assert_eq!(session["data"]["role"], "anonymous");
    assert!(session["data"]["username"].is_null());

    // staff-only routes are closed again
    assert_eq!(
        app.get("/api/tickets/stats").await.status(),
        StatusCode::UNAUTHORIZED
    );
}
