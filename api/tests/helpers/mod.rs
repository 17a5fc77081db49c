pub mod app;

pub use app::{
    TestApp, json_body, json_request, login, make_test_app, make_test_app_with_store,
    multipart_request,
};
