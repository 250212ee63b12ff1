// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod calories;
pub mod coach;
pub mod geo;
pub mod goals;
pub mod session;
pub mod tracker;

pub use coach::{CoachError, CoachInsight, GeminiCoach};
pub use session::{SensorError, SessionError, SessionRecorder, SessionSnapshot};
pub use tracker::{AppData, Tracker};
