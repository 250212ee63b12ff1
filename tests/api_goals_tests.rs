// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Goals view: listing, creation and removal.

use axum::http::StatusCode;
use kinetix_tracker::db::{keys, KeyValueStore, MemoryStore};
use kinetix_tracker::models::Goal;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

mod common;
use common::{body_json, delete, get, post_json};

#[tokio::test]
async fn test_seeded_goals_on_first_run() {
    let (app, _state) = common::create_test_app();

    let response = app.oneshot(get("/api/goals")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let goals = body["goals"].as_array().unwrap();
    assert_eq!(goals.len(), 2);
    assert_eq!(goals[0]["title"], "Daily Steps");
    assert_eq!(goals[0]["targetValue"], 10000.0);
    assert_eq!(goals[0]["deadline"], "Daily");
    assert_eq!(goals[0]["progress"], 0.0);
    assert_eq!(goals[0]["complete"], false);
    assert_eq!(goals[1]["unit"], "kcal");
}

#[tokio::test]
async fn test_goal_view_reports_completion() {
    let mut goals = Goal::seeded_defaults();
    goals[0].current_value = 12_500.0;
    goals[1].current_value = 250.0;

    let store = Arc::new(MemoryStore::new());
    store
        .set(keys::GOALS, &serde_json::to_string(&goals).unwrap())
        .unwrap();
    let (app, _state) = common::create_test_app_with_store(store);

    let body = body_json(app.oneshot(get("/api/goals")).await.unwrap()).await;
    assert_eq!(body["goals"][0]["progress"], 100.0);
    assert_eq!(body["goals"][0]["complete"], true);
    assert_eq!(body["goals"][1]["progress"], 50.0);
    assert_eq!(body["goals"][1]["complete"], false);
}

#[tokio::test]
async fn test_create_goal_derives_unit() {
    let (app, state) = common::create_test_app();

    let response = app
        .oneshot(post_json(
            "/api/goals",
            json!({ "title": "Ride to work", "targetValue": 25, "category": "distance" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let created = &body["goals"][2];
    assert_eq!(created["title"], "Ride to work");
    assert_eq!(created["unit"], "km");
    assert_eq!(created["deadline"], "Custom");
    assert_eq!(created["currentValue"], 0.0);
    assert_eq!(state.tracker.goals().await.len(), 3);
}

#[tokio::test]
async fn test_incomplete_goal_is_silently_ignored() {
    let (app, state) = common::create_test_app();

    for body in [
        json!({ "title": "", "targetValue": 100, "category": "steps" }),
        json!({ "title": "No target", "category": "steps" }),
        json!({ "title": "Zero", "targetValue": 0, "category": "calories" }),
    ] {
        let response = app
            .clone()
            .oneshot(post_json("/api/goals", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let listed = body_json(response).await;
        assert_eq!(listed["goals"].as_array().unwrap().len(), 2);
    }

    assert_eq!(state.tracker.goals().await.len(), 2);
}

#[tokio::test]
async fn test_remove_goal() {
    let (app, state) = common::create_test_app();

    let response = app.clone().oneshot(delete("/api/goals/1")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["goals"].as_array().unwrap().len(), 1);
    assert_eq!(body["goals"][0]["id"], "2");

    // Unknown ids are a no-op
    let response = app.oneshot(delete("/api/goals/unknown")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(state.tracker.goals().await.len(), 1);
}

#[tokio::test]
async fn test_duration_goal_never_advances() {
    let (app, state) = common::create_test_app();

    app.clone()
        .oneshot(post_json(
            "/api/goals",
            json!({ "title": "Move more", "targetValue": 30, "category": "duration" }),
        ))
        .await
        .unwrap();

    app.clone()
        .oneshot(post_json("/api/session/start", json!({ "type": "walking" })))
        .await
        .unwrap();
    app.oneshot(post_json("/api/session/stop", json!({})))
        .await
        .unwrap();

    let goals = state.tracker.goals().await;
    let duration_goal = goals.iter().find(|g| g.title == "Move more").unwrap();
    assert_eq!(duration_goal.current_value, 0.0);
}
