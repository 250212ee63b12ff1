// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod activity;
pub mod goal;
pub mod stats;

pub use activity::{Activity, ActivityType, GeoPoint};
pub use goal::{Goal, GoalCategory, NewGoal};
pub use stats::{DailySteps, UserStats};
