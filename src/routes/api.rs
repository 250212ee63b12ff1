// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for the dashboard, history, goals and coaching views.

use crate::error::{AppError, Result};
use crate::models::{Activity, Goal, NewGoal, UserStats};
use crate::services::CoachInsight;
use crate::time_utils::now_millis;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/dashboard", get(get_dashboard))
        .route("/api/activities", get(get_activities))
        .route("/api/goals", get(get_goals).post(create_goal))
        .route("/api/goals/{id}", delete(delete_goal))
        .route("/api/coach", post(get_coaching))
}

// ─── Dashboard ───────────────────────────────────────────────

/// Today's totals and the weekly step chart.
async fn get_dashboard(State(state): State<Arc<AppState>>) -> Json<UserStats> {
    Json(state.tracker.stats(now_millis()).await)
}

// ─── History ─────────────────────────────────────────────────

#[derive(Deserialize)]
struct ActivitiesQuery {
    /// Maximum number of activities returned
    #[serde(default = "default_limit")]
    limit: usize,
}

fn default_limit() -> usize {
    50
}

const MAX_LIMIT: usize = 500;

/// History row: the stored activity plus its whole-minute duration.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivityView {
    #[serde(flatten)]
    pub activity: Activity,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub duration_minutes: i64,
}

impl From<Activity> for ActivityView {
    fn from(activity: Activity) -> Self {
        Self {
            duration_minutes: activity.duration_secs() / 60,
            activity,
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ActivitiesResponse {
    /// Most recent first
    pub activities: Vec<ActivityView>,
    /// Number of recorded activities, before `limit`
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total: usize,
}

/// Recorded activities, newest first.
async fn get_activities(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ActivitiesQuery>,
) -> Result<Json<ActivitiesResponse>> {
    if params.limit == 0 {
        return Err(AppError::BadRequest(
            "limit must be greater than 0".to_string(),
        ));
    }
    let limit = params.limit.min(MAX_LIMIT);

    let mut activities = state.tracker.activities().await;
    let total = activities.len();
    activities.truncate(limit);

    tracing::debug!(limit, total, "Fetching activities");
    Ok(Json(ActivitiesResponse {
        activities: activities.into_iter().map(ActivityView::from).collect(),
        total,
    }))
}

// ─── Goals ───────────────────────────────────────────────────

/// Goal with its display progress.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GoalView {
    #[serde(flatten)]
    pub goal: Goal,
    /// Percent complete, clamped to 0..=100
    pub progress: f64,
    pub complete: bool,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct GoalsResponse {
    pub goals: Vec<GoalView>,
}

impl From<Vec<Goal>> for GoalsResponse {
    fn from(goals: Vec<Goal>) -> Self {
        Self {
            goals: goals
                .into_iter()
                .map(|goal| GoalView {
                    progress: goal.progress_percent(),
                    complete: goal.is_complete(),
                    goal,
                })
                .collect(),
        }
    }
}

async fn get_goals(State(state): State<Arc<AppState>>) -> Json<GoalsResponse> {
    Json(state.tracker.goals().await.into())
}

/// Create a goal. An incomplete form leaves the list as it was.
async fn create_goal(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewGoal>,
) -> Json<GoalsResponse> {
    Json(state.tracker.add_goal(request).await.into())
}

async fn delete_goal(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<GoalsResponse> {
    Json(state.tracker.remove_goal(&id).await.into())
}

// ─── Coaching ────────────────────────────────────────────────

/// Ask the coaching model about recent activity and goals.
async fn get_coaching(State(state): State<Arc<AppState>>) -> Result<Json<CoachInsight>> {
    let data = state.tracker.data().await;
    let insight = state
        .coach
        .get_insights(&data.activities, &data.goals)
        .await?;

    tracing::info!(status = ?insight.status, "Coaching insight generated");
    Ok(Json(insight))
}
