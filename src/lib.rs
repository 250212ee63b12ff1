// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Kinetix: personal workout tracking.
//!
//! This crate provides the backend API for recording workout sessions,
//! tracking goal progress and summarizing recent activity.

pub mod config;
pub mod db;
pub mod error;
pub mod id;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::{GeminiCoach, SessionRecorder, Tracker};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub tracker: Tracker,
    pub recorder: SessionRecorder,
    pub coach: GeminiCoach,
}
