// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application state: the activity log and the goal list.
//!
//! [`AppData`] is a plain value; its mutation methods return a new value.
//! [`Tracker`] owns the current value and writes the changed list to the
//! store after each mutation.

use crate::db::{keys, KeyValueStore};
use crate::id::new_id;
use crate::models::{Activity, Goal, NewGoal, UserStats};
use crate::services::goals::update_goals;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Activities (most recent first) and goals.
#[derive(Debug, Clone, PartialEq)]
pub struct AppData {
    pub activities: Vec<Activity>,
    pub goals: Vec<Goal>,
}

impl Default for AppData {
    /// First-run state: no activities and the seeded goals.
    fn default() -> Self {
        Self {
            activities: Vec::new(),
            goals: Goal::seeded_defaults(),
        }
    }
}

impl AppData {
    /// Read both lists from `store`, falling back to first-run defaults
    /// for anything missing or unreadable.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let defaults = Self::default();
        Self {
            activities: load_list(store, keys::ACTIVITIES).unwrap_or(defaults.activities),
            goals: load_list(store, keys::GOALS).unwrap_or(defaults.goals),
        }
    }

    /// Prepend `activity` and advance matching goals.
    pub fn with_activity(&self, activity: Activity) -> Self {
        let goals = update_goals(&self.goals, &activity);
        let mut activities = Vec::with_capacity(self.activities.len() + 1);
        activities.push(activity);
        activities.extend(self.activities.iter().cloned());
        Self { activities, goals }
    }

    /// Append a goal.
    pub fn with_goal(&self, goal: Goal) -> Self {
        let mut goals = self.goals.clone();
        goals.push(goal);
        Self {
            activities: self.activities.clone(),
            goals,
        }
    }

    /// Drop the goal with `id`; unknown ids leave the list unchanged.
    pub fn without_goal(&self, id: &str) -> Self {
        Self {
            activities: self.activities.clone(),
            goals: self.goals.iter().filter(|g| g.id != id).cloned().collect(),
        }
    }
}

fn load_list<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Option<Vec<T>> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(key, error = %e, "Failed to read stored list, using defaults");
            return None;
        }
    };

    match serde_json::from_str(&raw) {
        Ok(list) => Some(list),
        Err(e) => {
            tracing::warn!(key, error = %e, "Stored list is not valid JSON, using defaults");
            None
        }
    }
}

/// Owner of the live application state.
pub struct Tracker {
    store: Arc<dyn KeyValueStore>,
    data: RwLock<AppData>,
}

impl Tracker {
    /// Load state from `store` once.
    pub fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let data = AppData::load(store.as_ref());
        tracing::info!(
            activities = data.activities.len(),
            goals = data.goals.len(),
            "Loaded application state"
        );
        Self {
            store,
            data: RwLock::new(data),
        }
    }

    /// Snapshot of the current state.
    pub async fn data(&self) -> AppData {
        self.data.read().await.clone()
    }

    pub async fn activities(&self) -> Vec<Activity> {
        self.data.read().await.activities.clone()
    }

    pub async fn goals(&self) -> Vec<Goal> {
        self.data.read().await.goals.clone()
    }

    /// Dashboard aggregates at `now_ms`, in the server's local time zone.
    pub async fn stats(&self, now_ms: i64) -> UserStats {
        UserStats::compute_local(&self.data.read().await.activities, now_ms)
    }

    /// Record a finished activity; returns the updated goals.
    pub async fn record_activity(&self, activity: Activity) -> Vec<Goal> {
        let mut data = self.data.write().await;
        let activity_id = activity.id.clone();
        *data = data.with_activity(activity);

        self.persist(keys::ACTIVITIES, &data.activities).await;
        self.persist(keys::GOALS, &data.goals).await;

        tracing::info!(activity_id = %activity_id, total = data.activities.len(), "Activity recorded");
        data.goals.clone()
    }

    /// Add a goal from a creation request. Incomplete requests change nothing.
    pub async fn add_goal(&self, request: NewGoal) -> Vec<Goal> {
        let mut data = self.data.write().await;
        if let Some(goal) = request.into_goal(new_id()) {
            tracing::info!(goal_id = %goal.id, category = ?goal.category, "Goal added");
            *data = data.with_goal(goal);
            self.persist(keys::GOALS, &data.goals).await;
        }
        data.goals.clone()
    }

    /// Remove the goal with `id`; returns the remaining goals.
    pub async fn remove_goal(&self, id: &str) -> Vec<Goal> {
        let mut data = self.data.write().await;
        let before = data.goals.len();
        *data = data.without_goal(id);
        if data.goals.len() != before {
            tracing::info!(goal_id = id, "Goal removed");
            self.persist(keys::GOALS, &data.goals).await;
        }
        data.goals.clone()
    }

    /// Write one list. Failures are logged; the in-memory state is kept.
    ///
    /// Callers hold the write lock across this, so writes land in order.
    async fn persist<T: Serialize>(&self, key: &'static str, list: &[T]) {
        let json = match serde_json::to_string(list) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(key, error = %e, "Failed to serialize list");
                return;
            }
        };

        let store = Arc::clone(&self.store);
        match tokio::task::spawn_blocking(move || store.set(key, &json)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!(key, error = %e, "Failed to persist list"),
            Err(e) => tracing::error!(key, error = %e, "Persist task failed"),
        }
    }
}
