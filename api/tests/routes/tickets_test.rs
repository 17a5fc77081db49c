use crate::helpers::{
    TestApp, json_body, json_request, make_test_app, make_test_app_with_store, multipart_request,
};
use api::routes::routes;
use api::state::AppState;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use chrono::Duration;
use db::store::FileStore;
use serde_json::{Value, json};
use serial_test::serial;
use tower::ServiceExt;
use util::config::AppConfig;
use util::test_helpers::setup_test_store_root;

const ALICE: [(&str, &str); 5] = [
    ("name", "Alice"),
    ("email", "a@x.com"),
    ("category", "Software"),
    ("priority", "Low"),
    ("issue", "app crashes"),
];

async fn submit(app: &TestApp, fields: &[(&str, &str)]) -> (StatusCode, Value) {
    let response = app.send(multipart_request(fields, None)).await;
    let status = response.status();
    (status, json_body(response).await)
}

async fn put(app: &TestApp, uri: &str, payload: Value) -> (StatusCode, Value) {
    let response = app.send(json_request("PUT", uri, payload)).await;
    let status = response.status();
    (status, json_body(response).await)
}

async fn delete(app: &TestApp, uri: &str) -> StatusCode {
    let req = Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.send(req).await.status()
}

#[tokio::test]
async fn submit_requires_the_student_role() {
    let app = make_test_app();
    let (status, json) = submit(&app, &ALICE).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(json["message"], "Authentication required");

    app.as_staff().await;
    let (status, json) = submit(&app, &ALICE).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(json["message"], "Student access required");
}

#[tokio::test]
async fn submit_creates_pending_ticket() {
    let app = make_test_app();
    app.as_student().await;

    let (status, json) = submit(&app, &ALICE).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["success"], true);

    let ticket = &json["data"]["ticket"];
    assert_eq!(ticket["name"], "Alice");
    assert_eq!(ticket["category"], "Software");
    assert_eq!(ticket["priority"], "Low");
    assert_eq!(ticket["status"], "Pending");
    assert_eq!(ticket["solution"], "");
    assert_eq!(ticket["assignedTo"], "");
    assert_eq!(ticket["id"], app.clock_millis());
    assert_eq!(json["data"]["attachment_stored"], false);
    assert!(json["data"]["warning"].is_null());
}

#[tokio::test]
async fn submit_reports_validation_errors() {
    let app = make_test_app();
    app.as_student().await;

    let mut bad_email: [(&str, &str); 5] = ALICE;
    bad_email[1] = ("email", "not-an-email");
    let (status, json) = submit(&app, &bad_email).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["message"], "Please enter a valid email address");

    let (status, json) = submit(&app, &[("name", "Alice")]).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        json["message"],
        "Please fill all required fields: email, category, issue"
    );

    let long_issue = "x".repeat(501);
    let mut too_long: [(&str, &str); 5] = ALICE;
    too_long[4] = ("issue", long_issue.as_str());
    let (status, _) = submit(&app, &too_long).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // nothing was stored
    app.as_staff().await;
    let stats = json_body(app.get("/api/tickets/stats").await).await;
    assert_eq!(stats["data"]["total"], 0);
}

#[tokio::test]
async fn duplicate_needs_confirmation() {
    let app = make_test_app();
    app.as_student().await;
    assert_eq!(submit(&app, &ALICE).await.0, StatusCode::CREATED);

    app.clock.advance(Duration::hours(1));
    let (status, json) = submit(&app, &ALICE).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["success"], false);

    let mut confirmed = ALICE.to_vec();
    confirmed.push(("confirm_duplicate", "true"));
    let (status, _) = submit(&app, &confirmed).await;
    assert_eq!(status, StatusCode::CREATED);

    app.clock.advance(Duration::hours(25));
    assert_eq!(submit(&app, &ALICE).await.0, StatusCode::CREATED);
}

#[tokio::test]
async fn small_attachment_is_embedded_and_downloadable() {
    let app = make_test_app();
    app.as_student().await;

    let response = app
        .send(multipart_request(
            &ALICE,
            Some(("notes.txt", "text/plain", b"printer is on fire".as_slice())),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = json_body(response).await;
    assert_eq!(json["data"]["attachment_stored"], true);
    assert_eq!(json["data"]["ticket"]["attachment"]["name"], "notes.txt");
    assert_eq!(json["data"]["ticket"]["attachment"]["size"], 18);
    let id = json["data"]["ticket"]["id"].as_i64().unwrap();

    // downloads are open to everyone
    app.logout().await;
    let response = app.get(&format!("/api/tickets/{id}/attachment")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "text/plain");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"notes.txt\"; filename*=UTF-8''notes.txt"
    );
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&body[..], b"printer is on fire".as_slice());
}

#[tokio::test]
async fn empty_unnamed_file_part_means_no_attachment() {
    let app = make_test_app();
    app.as_student().await;

    let response = app
        .send(multipart_request(
            &ALICE,
            Some(("", "application/octet-stream", b"".as_slice())),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = json_body(response).await;
    assert_eq!(json["data"]["attachment_stored"], false);
    assert!(json["data"]["ticket"]["attachment"].is_null());
    assert!(json["data"]["warning"].is_null());
}

#[tokio::test]
async fn non_ascii_attachment_name_survives_download() {
    let app = make_test_app();
    app.as_student().await;

    let response = app
        .send(multipart_request(
            &ALICE,
            Some(("résumé.pdf", "application/pdf", b"%PDF-1.4".as_slice())),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = json_body(response).await;
    let id = json["data"]["ticket"]["id"].as_i64().unwrap();

    let response = app.get(&format!("/api/tickets/{id}/attachment")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"r_sum_.pdf\"; filename*=UTF-8''r%C3%A9sum%C3%A9.pdf"
    );
}

#[tokio::test]
async fn oversized_attachment_is_dropped_with_warning() {
    let app = make_test_app();
    app.as_student().await;

    let big = vec![b'a'; 2 * 1024 * 1024 + 1];
    let response = app
        .send(multipart_request(
            &ALICE,
            Some(("scan.pdf", "application/pdf", big.as_slice())),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = json_body(response).await;
    assert_eq!(json["data"]["attachment_stored"], false);
    assert!(json["data"]["ticket"]["attachment"].is_null());
    assert!(
        json["data"]["warning"]
            .as_str()
            .unwrap()
            .contains("File too large")
    );

    let id = json["data"]["ticket"]["id"].as_i64().unwrap();
    let response = app.get(&format!("/api/tickets/{id}/attachment")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn disallowed_file_type_rejects_the_ticket() {
    let app = make_test_app();
    app.as_student().await;

    let response = app
        .send(multipart_request(
            &ALICE,
            Some(("setup.exe", "application/octet-stream", b"MZ".as_slice())),
        ))
        .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = json_body(response).await;
    assert!(json["message"].as_str().unwrap().contains(".exe"));
}

#[tokio::test]
async fn lookup_finds_own_tickets_only() {
    let app = make_test_app();
    app.as_student().await;
    submit(&app, &ALICE).await;

    let mut bob = ALICE;
    bob[0] = ("name", "Bob");
    bob[1] = ("email", "b@y.org");
    app.clock.advance(Duration::seconds(1));
    submit(&app, &bob).await;
    app.logout().await;

    let json = json_body(
        app.get("/api/tickets/lookup?name=Alice&email=a@x.com")
            .await,
    )
    .await;
    let found = json["data"].as_array().unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["name"], "Alice");

    // case matters
    let json = json_body(
        app.get("/api/tickets/lookup?name=alice&email=a@x.com")
            .await,
    )
    .await;
    assert!(json["data"].as_array().unwrap().is_empty());
    assert_eq!(json["message"], "No tickets found for this name and email");

    let response = app.get("/api/tickets/lookup?name=Alice").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn staff_listing_filters_and_rejects_unknown_values() {
    let app = make_test_app();
    app.as_student().await;
    submit(&app, &ALICE).await;
    let mut network = ALICE;
    network[2] = ("category", "Network");
    network[4] = ("issue", "wifi drops");
    app.clock.advance(Duration::seconds(1));
    submit(&app, &network).await;

    // students cannot list
    assert_eq!(app.get("/api/tickets").await.status(), StatusCode::FORBIDDEN);

    app.as_staff().await;
    let all = json_body(app.get("/api/tickets").await).await;
    let all = all["data"].as_array().unwrap();
    assert_eq!(all.len(), 2);
    assert_eq!(all[0]["issue"], "wifi drops");

    let json = json_body(app.get("/api/tickets?category=Network&status=all").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let json = json_body(app.get("/api/tickets?search=CRASH").await).await;
    assert_eq!(json["data"][0]["issue"], "app crashes");

    let response = app.get("/api/tickets?status=Closed").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["message"], "Unknown status: Closed");
}

#[tokio::test]
async fn staff_resolves_assigns_and_deletes() {
    let app = make_test_app();
    app.as_student().await;
    let (_, json) = submit(&app, &ALICE).await;
    let id = json["data"]["ticket"]["id"].as_i64().unwrap();

    app.as_staff().await;
    let (status, json) = put(
        &app,
        &format!("/api/tickets/{id}/solution"),
        json!({ "solution": "Reinstall the app" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["status"], "Solved");
    assert_eq!(json["data"]["solution"], "Reinstall the app");

    let (_, json) = put(
        &app,
        &format!("/api/tickets/{id}/solution"),
        json!({ "solution": "   " }),
    )
    .await;
    assert_eq!(json["data"]["status"], "Pending");

    let (status, json) = put(&app, &format!("/api/tickets/{id}/assign"), json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["data"]["assignedTo"], "admin456");

    let stats = json_body(app.get("/api/tickets/stats").await).await;
    assert_eq!(stats["data"], json!({ "total": 1, "pending": 1, "solved": 0 }));

    assert_eq!(delete(&app, &format!("/api/tickets/{id}")).await, StatusCode::OK);
    assert_eq!(
        delete(&app, &format!("/api/tickets/{id}")).await,
        StatusCode::NOT_FOUND
    );
    let (status, _) = put(
        &app,
        &format!("/api/tickets/{id}/solution"),
        json!({ "solution": "late" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn export_downloads_every_ticket() {
    let app = make_test_app();
    app.as_student().await;
    submit(&app, &ALICE).await;

    app.as_staff().await;
    let response = app.get("/api/tickets/export").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/json");
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"helpdesk_tickets_2025-03-14.json\"; filename*=UTF-8''helpdesk_tickets_2025-03-14.json"
    );

    let exported = json_body(response).await;
    let tickets = exported.as_array().unwrap();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0]["email"], "a@x.com");
}

#[tokio::test]
async fn issue_budget_reports_level() {
    let app = make_test_app();
    let json = json_body(app.get("/api/tickets/issue-budget?length=420").await).await;
    assert_eq!(json["data"]["remaining"], 80);
    assert_eq!(json["data"]["level"], "warning");

    let json = json_body(app.get("/api/tickets/issue-budget").await).await;
    assert_eq!(json["data"]["level"], "normal");
}

#[tokio::test]
async fn tickets_survive_a_restart() {
    let tmp = tempfile::tempdir().unwrap();

    let app = make_test_app_with_store(FileStore::open(tmp.path()).unwrap());
    app.as_student().await;
    submit(&app, &ALICE).await;

    let app = make_test_app_with_store(FileStore::open(tmp.path()).unwrap());
    // a fresh process starts logged out
    let session = json_body(app.get("/api/auth/session").await).await;
    assert_eq!(session["data"]["role"], "anonymous");

    app.as_staff().await;
    let json = json_body(app.get("/api/tickets").await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
#[serial]
async fn state_from_config_uses_configured_store() {
    let _tmp = setup_test_store_root();
    AppConfig::set_lookup_delay_ms(0);

    let app_state = AppState::from_config().unwrap();
    assert!(app_state.lookup_delay().is_zero());
    let router = Router::new().nest("/api", routes(app_state));

    let response = router
        .oneshot(
            Request::builder()
                .uri("/api/tickets/lookup?name=Alice&email=a@x.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    AppConfig::reset();
}
