// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Kinetix Tracker API Server
//!
//! Records workout sessions, tracks goal progress and serves the dashboard,
//! history and coaching views.

use kinetix_tracker::{
    config::Config,
    db::FileStore,
    services::{GeminiCoach, SessionRecorder, Tracker},
    AppState,
};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging()?;

    let config = Config::from_env()?;
    tracing::info!(port = config.port, "Starting Kinetix Tracker API");

    // Both lists are read once here and written back on every change
    let store = Arc::new(FileStore::open(&config.data_dir)?);
    let tracker = Tracker::load(store);

    let coach = GeminiCoach::new(
        config.gemini_base_url.clone(),
        config.gemini_model.clone(),
        config.gemini_api_key.clone(),
    );
    if coach.is_configured() {
        tracing::info!(model = %config.gemini_model, "Coaching enabled");
    } else {
        tracing::warn!("GEMINI_API_KEY not set, coaching disabled");
    }

    let state = Arc::new(AppState {
        config: config.clone(),
        tracker,
        recorder: SessionRecorder::new(),
        coach,
    });

    let app = kinetix_tracker::routes::create_router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> Result<(), Box<dyn std::error::Error>> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("kinetix_tracker=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
