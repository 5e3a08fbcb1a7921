// SPDX-License-Identifier: MIT

use axum::body::Body;
use axum::http::{header, Request, Response};
use serde_json::Value;
use std::sync::Arc;
use stridelog::config::Config;
use stridelog::routes::create_router;
use stridelog::store::Store;
use stridelog::AppState;

/// Header carrying the opaque user identity (set upstream in prod).
pub const USER_ID_HEADER: &str = "x-user-id";

/// Create a test app with an empty in-memory store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let state = Arc::new(AppState {
        config: Config::test_default(),
        store: Store::new(),
    });

    (create_router(state.clone()), state)
}

/// Build a GET request as `user_id`.
#[allow(dead_code)]
pub fn get_as(user_id: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(USER_ID_HEADER, user_id)
        .body(Body::empty())
        .unwrap()
}

/// Build a JSON POST request as `user_id`.
#[allow(dead_code)]
pub fn post_json_as(user_id: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(USER_ID_HEADER, user_id)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body was not valid JSON")
}
