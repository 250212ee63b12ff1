// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Tracker routes: start, feed and stop the live session.

use crate::error::Result;
use crate::models::{Activity, ActivityType, GeoPoint};
use crate::routes::api::GoalsResponse;
use crate::services::{SensorError, SessionSnapshot};
use crate::time_utils::now_millis;
use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/session", get(get_session))
        .route("/api/session/start", post(start_session))
        .route("/api/session/location", post(report_location))
        .route("/api/session/stop", post(stop_session))
}

async fn get_session(State(state): State<Arc<AppState>>) -> Json<SessionSnapshot> {
    Json(state.recorder.snapshot().await)
}

#[derive(Deserialize)]
struct StartRequest {
    #[serde(rename = "type")]
    activity_type: ActivityType,
}

async fn start_session(
    State(state): State<Arc<AppState>>,
    Json(request): Json<StartRequest>,
) -> Result<Json<SessionSnapshot>> {
    let snapshot = state.recorder.start(request.activity_type).await?;
    Ok(Json(snapshot))
}

/// A position fix or a report that the sensor failed.
#[derive(Deserialize)]
#[serde(untagged)]
enum LocationReport {
    Fix { lat: f64, lng: f64 },
    Failure { error: String },
}

async fn report_location(
    State(state): State<Arc<AppState>>,
    Json(report): Json<LocationReport>,
) -> Result<StatusCode> {
    let sample = match report {
        LocationReport::Fix { lat, lng } => Ok(GeoPoint::new(lat, lng)),
        LocationReport::Failure { error } => Err(SensorError::Unavailable(error)),
    };
    state.recorder.push_location(sample).await?;
    Ok(StatusCode::ACCEPTED)
}

/// Finished session plus the goals it advanced.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct StopResponse {
    pub activity: Activity,
    #[serde(flatten)]
    pub goals: GoalsResponse,
}

async fn stop_session(State(state): State<Arc<AppState>>) -> Result<Json<StopResponse>> {
    let activity = state.recorder.stop(now_millis()).await?;
    let goals = state.tracker.record_activity(activity.clone()).await;

    Ok(Json(StopResponse {
        activity,
        goals: goals.into(),
    }))
}
