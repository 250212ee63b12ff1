// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use kinetix_tracker::config::Config;
use kinetix_tracker::db::{KeyValueStore, MemoryStore};
use kinetix_tracker::routes::create_router;
use kinetix_tracker::services::{GeminiCoach, SessionRecorder, Tracker};
use kinetix_tracker::AppState;
use std::sync::Arc;

/// Create a test app backed by the given store.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app_with_store(store: Arc<dyn KeyValueStore>) -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let coach = GeminiCoach::new(
        config.gemini_base_url.clone(),
        config.gemini_model.clone(),
        None,
    );

    let state = Arc::new(AppState {
        config,
        tracker: Tracker::load(store),
        recorder: SessionRecorder::new(),
        coach,
    });

    (create_router(state.clone()), state)
}

/// Create a test app with an empty in-memory store.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with_store(Arc::new(MemoryStore::new()))
}

#[allow(dead_code)]
pub fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[allow(dead_code)]
pub fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not JSON")
}
