// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Goal model: user-defined targets with accumulated progress.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

/// Metric a goal tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum GoalCategory {
    Steps,
    Calories,
    Distance,
    Duration,
}

impl GoalCategory {
    /// Display unit for goals of this category.
    pub fn unit(&self) -> &'static str {
        match self {
            GoalCategory::Steps => "steps",
            GoalCategory::Calories => "kcal",
            GoalCategory::Distance => "km",
            GoalCategory::Duration => "min",
        }
    }
}

/// A progress tracker toward a target value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Goal {
    pub id: String,
    pub title: String,
    pub target_value: f64,
    /// Running sum of contributed activity metrics. Not clamped.
    pub current_value: f64,
    pub unit: String,
    pub category: GoalCategory,
    /// Free-text label ("Daily" or "Custom"), never enforced
    pub deadline: String,
}

impl Goal {
    /// Progress toward the target as a percentage, clamped to `[0, 100]`.
    pub fn progress_percent(&self) -> f64 {
        if self.target_value <= 0.0 {
            return 0.0;
        }
        (self.current_value / self.target_value * 100.0).clamp(0.0, 100.0)
    }

    pub fn is_complete(&self) -> bool {
        self.target_value > 0.0 && self.current_value >= self.target_value
    }

    /// Goals installed on first run when nothing is stored yet.
    pub fn seeded_defaults() -> Vec<Goal> {
        vec![
            Goal {
                id: "1".to_string(),
                title: "Daily Steps".to_string(),
                target_value: 10000.0,
                current_value: 0.0,
                unit: GoalCategory::Steps.unit().to_string(),
                category: GoalCategory::Steps,
                deadline: "Daily".to_string(),
            },
            Goal {
                id: "2".to_string(),
                title: "Calorie Burn".to_string(),
                target_value: 500.0,
                current_value: 0.0,
                unit: GoalCategory::Calories.unit().to_string(),
                category: GoalCategory::Calories,
                deadline: "Daily".to_string(),
            },
        ]
    }
}

/// Goal creation request.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct NewGoal {
    #[serde(default)]
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    #[validate(range(exclusive_min = 0.0))]
    pub target_value: f64,
    #[serde(default = "default_category")]
    pub category: GoalCategory,
}

fn default_category() -> GoalCategory {
    GoalCategory::Steps
}

impl NewGoal {
    /// Build a goal from this request, or `None` if the request is incomplete.
    ///
    /// A missing title or a non-positive target is not an error: the request
    /// is dropped and the goal list stays as it was.
    pub fn into_goal(self, id: String) -> Option<Goal> {
        if let Err(errors) = self.validate() {
            tracing::debug!(errors = %errors, "Ignoring incomplete goal request");
            return None;
        }

        Some(Goal {
            id,
            title: self.title,
            target_value: self.target_value,
            current_value: 0.0,
            unit: self.category.unit().to_string(),
            category: self.category,
            deadline: "Custom".to_string(),
        })
    }
}
