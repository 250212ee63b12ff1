// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Live workout session recording.
//!
//! A session is either idle or tracking. While tracking, a single background
//! task owns the counters and serializes three inputs:
//! - a 1 s ticker advancing elapsed time
//! - a 1 s step simulator adding `floor(rate / 60)` steps
//! - location samples pushed through a channel
//!
//! Stopping cancels and joins that task before the counters are read, and
//! drops the location sender, so nothing can update a finished session.

use crate::id::new_id;
use crate::models::{Activity, ActivityType, GeoPoint};
use crate::services::calories::estimate_calories;
use crate::services::geo::point_distance;
use serde::Serialize;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Period of the elapsed-time ticker and the step simulator.
pub const TICK: Duration = Duration::from_secs(1);

/// Buffered location samples per session before new ones are dropped.
const LOCATION_BUFFER: usize = 64;

/// Simulated cadence in steps per minute.
///
/// Cycling has no cadence of its own and shares the fallback rate.
pub fn steps_per_minute(activity_type: ActivityType) -> u64 {
    match activity_type {
        ActivityType::Running => 160,
        ActivityType::Walking => 100,
        _ => 20,
    }
}

/// Steps added on every simulator tick.
pub fn steps_per_tick(activity_type: ActivityType) -> u64 {
    steps_per_minute(activity_type) / 60
}

/// Format seconds as `HH:MM:SS`.
pub fn format_elapsed(secs: u64) -> String {
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs % 3600) / 60, secs % 60)
}

/// Location sensor failures. These never end a session.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SensorError {
    #[error("Location sensor unavailable: {0}")]
    Unavailable(String),
}

/// One report from the location source.
pub type LocationSample = std::result::Result<GeoPoint, SensorError>;

/// Invalid session state transitions.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("A session is already being tracked")]
    AlreadyTracking,

    #[error("No session is being tracked")]
    NotTracking,
}

/// Accumulated values for one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionCounters {
    pub elapsed_secs: u64,
    pub steps: u64,
    /// Meters
    pub distance: f64,
    last_fix: Option<GeoPoint>,
}

impl SessionCounters {
    pub fn tick(&mut self) {
        self.elapsed_secs += 1;
    }

    pub fn add_steps(&mut self, activity_type: ActivityType) {
        self.steps += steps_per_tick(activity_type);
    }

    /// Add the leg from the previous fix to `fix`. Returns the meters added.
    ///
    /// The first fix of a session only sets the reference point.
    pub fn record_fix(&mut self, fix: GeoPoint) -> f64 {
        let added = self
            .last_fix
            .map(|prev| point_distance(&prev, &fix))
            .unwrap_or(0.0);
        self.distance += added;
        self.last_fix = Some(fix);
        added
    }

    /// Build the finished activity, ending at `now_ms`.
    pub fn finalize(&self, id: String, activity_type: ActivityType, now_ms: i64) -> Activity {
        let elapsed_ms = i64::try_from(self.elapsed_secs)
            .unwrap_or(i64::MAX)
            .saturating_mul(1000);
        Activity {
            id,
            activity_type,
            start_time: now_ms.saturating_sub(elapsed_ms),
            end_time: now_ms,
            steps: self.steps,
            distance: self.distance,
            calories: estimate_calories(activity_type, self.elapsed_secs as f64),
            path: Vec::new(),
        }
    }
}

/// Live view of the recorder for the tracker screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionSnapshot {
    pub tracking: bool,
    #[serde(rename = "type")]
    pub activity_type: Option<ActivityType>,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub elapsed_secs: u64,
    /// `HH:MM:SS`
    pub elapsed: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub steps: u64,
    /// Meters
    pub distance: f64,
}

impl SessionSnapshot {
    fn idle() -> Self {
        Self::from_counters(None, &SessionCounters::default())
    }

    fn from_counters(activity_type: Option<ActivityType>, counters: &SessionCounters) -> Self {
        Self {
            tracking: activity_type.is_some(),
            activity_type,
            elapsed_secs: counters.elapsed_secs,
            elapsed: format_elapsed(counters.elapsed_secs),
            steps: counters.steps,
            distance: counters.distance,
        }
    }
}

struct ActiveSession {
    activity_type: ActivityType,
    locations: mpsc::Sender<LocationSample>,
    cancel: oneshot::Sender<()>,
    task: JoinHandle<SessionCounters>,
    counters: watch::Receiver<SessionCounters>,
}

/// Owns the idle/tracking lifecycle of the current session.
#[derive(Default)]
pub struct SessionRecorder {
    active: Mutex<Option<ActiveSession>>,
}

impl SessionRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start tracking a new session with zeroed counters.
    pub async fn start(
        &self,
        activity_type: ActivityType,
    ) -> std::result::Result<SessionSnapshot, SessionError> {
        let mut active = self.active.lock().await;
        if active.is_some() {
            return Err(SessionError::AlreadyTracking);
        }

        let (location_tx, location_rx) = mpsc::channel(LOCATION_BUFFER);
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let (counters_tx, counters_rx) = watch::channel(SessionCounters::default());

        let task = tokio::spawn(run_session(
            activity_type,
            location_rx,
            cancel_rx,
            counters_tx,
        ));

        tracing::info!(activity_type = %activity_type, "Session started");

        *active = Some(ActiveSession {
            activity_type,
            locations: location_tx,
            cancel: cancel_tx,
            task,
            counters: counters_rx,
        });

        Ok(SessionSnapshot::from_counters(
            Some(activity_type),
            &SessionCounters::default(),
        ))
    }

    /// Stop the running session and return its finished activity.
    pub async fn stop(&self, now_ms: i64) -> std::result::Result<Activity, SessionError> {
        let mut active = self.active.lock().await;
        let session = active.take().ok_or(SessionError::NotTracking)?;

        let ActiveSession {
            activity_type,
            locations,
            cancel,
            task,
            counters,
        } = session;

        drop(locations);
        let _ = cancel.send(());

        let counters = match task.await {
            Ok(final_counters) => final_counters,
            Err(e) => {
                tracing::error!(error = %e, "Session task failed, using last published counters");
                counters.borrow().clone()
            }
        };

        let activity = counters.finalize(new_id(), activity_type, now_ms);
        tracing::info!(
            activity_id = %activity.id,
            activity_type = %activity_type,
            elapsed_secs = counters.elapsed_secs,
            steps = activity.steps,
            distance = activity.distance,
            "Session stopped"
        );
        Ok(activity)
    }

    /// Forward a location sample to the running session.
    ///
    /// Samples arriving while idle are rejected and dropped.
    pub async fn push_location(
        &self,
        sample: LocationSample,
    ) -> std::result::Result<(), SessionError> {
        let active = self.active.lock().await;
        let session = active.as_ref().ok_or(SessionError::NotTracking)?;

        match session.locations.try_send(sample) {
            Ok(()) => Ok(()),
            Err(mpsc::error::TrySendError::Full(_)) => {
                tracing::warn!("Location buffer full, dropping sample");
                Ok(())
            }
            Err(mpsc::error::TrySendError::Closed(_)) => Err(SessionError::NotTracking),
        }
    }

    /// Current state of the recorder.
    pub async fn snapshot(&self) -> SessionSnapshot {
        let active = self.active.lock().await;
        match active.as_ref() {
            Some(session) => SessionSnapshot::from_counters(
                Some(session.activity_type),
                &session.counters.borrow(),
            ),
            None => SessionSnapshot::idle(),
        }
    }

    pub async fn is_tracking(&self) -> bool {
        self.active.lock().await.is_some()
    }
}

/// Session task: sole writer of the counters until cancelled.
async fn run_session(
    activity_type: ActivityType,
    mut locations: mpsc::Receiver<LocationSample>,
    mut cancel: oneshot::Receiver<()>,
    published: watch::Sender<SessionCounters>,
) -> SessionCounters {
    let first_tick = Instant::now() + TICK;
    let mut ticker = interval_at(first_tick, TICK);
    let mut step_sim = interval_at(first_tick, TICK);
    let mut counters = SessionCounters::default();
    let mut locations_open = true;

    loop {
        tokio::select! {
            biased;
            _ = &mut cancel => break,
            _ = ticker.tick() => counters.tick(),
            _ = step_sim.tick() => counters.add_steps(activity_type),
            sample = locations.recv(), if locations_open => match sample {
                Some(sample) => apply_sample(&mut counters, sample),
                None => locations_open = false,
            },
        }
        published.send_replace(counters.clone());
    }

    // Samples accepted before the stop still count. The sender is gone, so
    // this ends once the buffer is empty.
    while let Ok(sample) = locations.try_recv() {
        apply_sample(&mut counters, sample);
    }
    published.send_replace(counters.clone());

    counters
}

fn apply_sample(counters: &mut SessionCounters, sample: LocationSample) {
    match sample {
        Ok(fix) => {
            let added = counters.record_fix(fix);
            tracing::trace!(lat = fix.lat, lng = fix.lng, added, "Location fix");
        }
        Err(e) => {
            tracing::warn!(error = %e, "Location sample failed, distance not updated");
        }
    }
}
