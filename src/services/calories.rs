// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calorie estimate from a fixed MET table.

use crate::models::ActivityType;

/// Reference body weight (kg) used for every estimate.
pub const REFERENCE_WEIGHT_KG: f64 = 70.0;

/// Metabolic equivalent for an activity type.
pub fn met(activity_type: ActivityType) -> f64 {
    match activity_type {
        ActivityType::Running => 10.0,
        ActivityType::Walking => 3.5,
        ActivityType::Cycling | ActivityType::Other => 5.0,
    }
}

/// Estimated kcal burned over `elapsed_secs` of the given activity.
///
/// Linear in time; negative input yields negative output.
pub fn estimate_calories(activity_type: ActivityType, elapsed_secs: f64) -> f64 {
    let kcal_per_minute = REFERENCE_WEIGHT_KG * met(activity_type) * 3.5 / 200.0;
    kcal_per_minute * (elapsed_secs / 60.0)
}
