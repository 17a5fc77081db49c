use api::routes::routes;
use api::state::AppState;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header::CONTENT_TYPE},
    response::Response,
};
use chrono::{TimeZone, Utc};
use db::store::{MemoryStore, Store};
use serde_json::{Value, json};
use services::service::{Clock, ManualClock};
use services::session::StaticCredentials;
use services::ticket_service::HelpdeskService;
use std::time::Duration;
use tower::ServiceExt;

pub const STUDENT: (&str, &str) = ("user123", "changeMe123!");
pub const STAFF: (&str, &str) = ("admin456", "securePass789!");

const BOUNDARY: &str = "helpdesk-test-boundary";

pub struct TestApp {
    router: Router,
    pub clock: ManualClock,
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> Response {
        self.router.clone().oneshot(req).await.unwrap()
    }

    /// Current test clock reading in milliseconds, the id a new ticket gets.
    pub fn clock_millis(&self) -> i64 {
        self.clock.now().timestamp_millis()
    }

    pub async fn get(&self, uri: &str) -> Response {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    pub async fn logout(&self) {
        let req = Request::builder()
            .method("POST")
            .uri("/api/auth/logout")
            .body(Body::empty())
            .unwrap();
        assert_eq!(self.send(req).await.status(), StatusCode::OK);
    }

    pub async fn as_student(&self) {
        self.logout().await;
        assert_eq!(login(self, STUDENT.0, STUDENT.1).await, StatusCode::OK);
    }

    pub async fn as_staff(&self) {
        self.logout().await;
        assert_eq!(login(self, STAFF.0, STAFF.1).await, StatusCode::OK);
    }
}

/// App over an empty in-memory store, no lookup delay, clock frozen at
/// 2025-03-14 09:30 UTC.
pub fn make_test_app() -> TestApp {
    make_test_app_with_store(MemoryStore::new())
}

pub fn make_test_app_with_store(store: impl Store + 'static) -> TestApp {
    let clock = ManualClock::new(Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0).unwrap());
    let credentials = StaticCredentials {
        student: (STUDENT.0.into(), STUDENT.1.into()),
        staff: (STAFF.0.into(), STAFF.1.into()),
    };
    let helpdesk = HelpdeskService::new(store, credentials, clock.clone());
    let app_state = AppState::new(helpdesk, Duration::ZERO);

    TestApp {
        router: Router::new().nest("/api", routes(app_state)),
        clock,
    }
}

pub async fn json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

pub fn json_request(method: &str, uri: &str, payload: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&payload).unwrap()))
        .unwrap()
}

pub async fn login(app: &TestApp, username: &str, password: &str) -> StatusCode {
    let req = json_request(
        "POST",
        "/api/auth/login",
        json!({ "username": username, "password": password }),
    );
    app.send(req).await.status()
}

/// `POST /api/tickets` with the given text fields and an optional
/// `(file name, mime type, bytes)` file part.
pub fn multipart_request(fields: &[(&str, &str)], file: Option<(&str, &str, &[u8])>) -> Request<Body> {
    let mut body = Vec::new();
    for (name, value) in fields {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
            )
            .as_bytes(),
        );
    }
    if let Some((file_name, mime, bytes)) = file {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{file_name}\"\r\nContent-Type: {mime}\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/api/tickets")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}
