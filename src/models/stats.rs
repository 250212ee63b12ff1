//! Dashboard aggregates computed from the activity list.
//!
//! The list is small and held in memory, so the aggregates are recomputed
//! on every dashboard request rather than maintained incrementally.

use chrono::{Days, TimeZone};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::Activity;
use crate::time_utils::{local_midnight_ms, midnight_of_date};

/// Number of days covered by the weekly series (today included).
pub const WEEKLY_DAYS: u64 = 7;

/// Today's totals plus the trailing week of daily step counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserStats {
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub today_steps: u64,
    pub today_calories: f64,
    /// Kilometers
    pub today_distance: f64,
    /// Oldest first, last entry is today
    pub weekly_progress: Vec<DailySteps>,
}

/// Step total for one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct DailySteps {
    /// Local midnight of the day (ms since epoch)
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub timestamp: i64,
    /// Short weekday label ("Mon", "Tue", ...)
    pub day: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub steps: u64,
}

impl UserStats {
    /// Aggregate `activities` relative to `now_ms`, bucketing days in `tz`.
    ///
    /// An activity belongs to the calendar day its `start_time` falls on,
    /// even if it runs past midnight.
    pub fn compute<Tz: TimeZone>(activities: &[Activity], now_ms: i64, tz: &Tz) -> Self {
        let today = local_midnight_ms(now_ms, tz);

        let mut today_steps = 0u64;
        let mut today_calories = 0.0;
        let mut today_distance_m = 0.0;

        // Each activity's start day, computed once.
        let start_days: Vec<Option<i64>> = activities
            .iter()
            .map(|a| local_midnight_ms(a.start_time, tz))
            .collect();

        for (activity, start_day) in activities.iter().zip(&start_days) {
            if start_day.is_some() && *start_day == today {
                today_steps += activity.steps;
                today_calories += activity.calories;
                today_distance_m += activity.distance;
            }
        }

        let weekly_progress = match chrono::DateTime::from_timestamp_millis(now_ms) {
            Some(now) => {
                let today_date = now.with_timezone(tz).date_naive();
                (0..WEEKLY_DAYS)
                    .rev()
                    .filter_map(|offset| today_date.checked_sub_days(Days::new(offset)))
                    .filter_map(|date| {
                        let timestamp = midnight_of_date(date, tz)?;
                        let steps: u64 = activities
                            .iter()
                            .zip(&start_days)
                            .filter(|(_, day)| **day == Some(timestamp))
                            .map(|(a, _)| a.steps)
                            .sum();
                        Some(DailySteps {
                            timestamp,
                            day: date.format("%a").to_string(),
                            steps,
                        })
                    })
                    .collect()
            }
            None => Vec::new(),
        };

        Self {
            today_steps,
            today_calories,
            today_distance: today_distance_m / 1000.0,
            weekly_progress,
        }
    }

    /// Aggregate using the server's local time zone.
    pub fn compute_local(activities: &[Activity], now_ms: i64) -> Self {
        Self::compute(activities, now_ms, &chrono::Local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ActivityType;
    use chrono::{FixedOffset, Utc};

    // 2024-01-15T00:00:00Z, a Monday
    const MONDAY_MIDNIGHT: i64 = 1_705_276_800_000;
    const HOUR_MS: i64 = 3_600_000;
    const DAY_MS: i64 = 24 * HOUR_MS;

    fn make_activity(start: i64, steps: u64, calories: f64, distance: f64) -> Activity {
        Activity {
            id: format!("a{}", start),
            activity_type: ActivityType::Walking,
            start_time: start,
            end_time: start + 30 * 60 * 1000,
            steps,
            distance,
            calories,
            path: vec![],
        }
    }

    #[test]
    fn test_empty_list_is_all_zero() {
        let stats = UserStats::compute(&[], MONDAY_MIDNIGHT + 10 * HOUR_MS, &Utc);

        assert_eq!(stats.today_steps, 0);
        assert_eq!(stats.today_calories, 0.0);
        assert_eq!(stats.today_distance, 0.0);
        assert_eq!(stats.weekly_progress.len(), 7);
        assert!(stats.weekly_progress.iter().all(|d| d.steps == 0));
    }

    #[test]
    fn test_activity_at_midnight_counts_for_today() {
        let activities = vec![make_activity(MONDAY_MIDNIGHT, 5000, 200.0, 3000.0)];
        let stats = UserStats::compute(&activities, MONDAY_MIDNIGHT + 15 * HOUR_MS, &Utc);

        assert_eq!(stats.today_steps, 5000);
        assert_eq!(stats.today_calories, 200.0);
        assert_eq!(stats.today_distance, 3.0);

        let hits: Vec<_> = stats
            .weekly_progress
            .iter()
            .filter(|d| d.steps == 5000)
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].timestamp, MONDAY_MIDNIGHT);
        assert_eq!(stats.weekly_progress.last().unwrap().timestamp, MONDAY_MIDNIGHT);
    }

    #[test]
    fn test_weekly_series_order_and_labels() {
        let stats = UserStats::compute(&[], MONDAY_MIDNIGHT + HOUR_MS, &Utc);
        let labels: Vec<&str> = stats.weekly_progress.iter().map(|d| d.day.as_str()).collect();

        assert_eq!(labels, vec!["Tue", "Wed", "Thu", "Fri", "Sat", "Sun", "Mon"]);
        assert_eq!(stats.weekly_progress[0].timestamp, MONDAY_MIDNIGHT - 6 * DAY_MS);
        assert!(stats
            .weekly_progress
            .windows(2)
            .all(|w| w[1].timestamp - w[0].timestamp == DAY_MS));
    }

    #[test]
    fn test_yesterday_and_older_activities() {
        let activities = vec![
            make_activity(MONDAY_MIDNIGHT - 2 * HOUR_MS, 1200, 50.0, 800.0), // Sunday 22:00
            make_activity(MONDAY_MIDNIGHT - 3 * DAY_MS, 700, 30.0, 400.0),   // Friday
            make_activity(MONDAY_MIDNIGHT - 10 * DAY_MS, 9999, 1.0, 1.0),    // outside the week
        ];
        let stats = UserStats::compute(&activities, MONDAY_MIDNIGHT + HOUR_MS, &Utc);

        assert_eq!(stats.today_steps, 0);
        assert_eq!(stats.weekly_progress[5].steps, 1200); // Sunday
        assert_eq!(stats.weekly_progress[3].steps, 700); // Friday
        let total: u64 = stats.weekly_progress.iter().map(|d| d.steps).sum();
        assert_eq!(total, 1900);
    }

    #[test]
    fn test_session_spanning_midnight_belongs_to_start_day() {
        let mut late = make_activity(MONDAY_MIDNIGHT - 30 * 60 * 1000, 3000, 100.0, 0.0);
        late.end_time = MONDAY_MIDNIGHT + 30 * 60 * 1000;

        let stats = UserStats::compute(&[late], MONDAY_MIDNIGHT + HOUR_MS, &Utc);

        assert_eq!(stats.today_steps, 0);
        assert_eq!(stats.weekly_progress[5].steps, 3000);
        assert_eq!(stats.weekly_progress[6].steps, 0);
    }

    #[test]
    fn test_days_follow_the_given_time_zone() {
        // 2024-01-15T02:00Z is still Sunday evening in UTC-8.
        let pacific = FixedOffset::west_opt(8 * 3600).unwrap();
        let activities = vec![make_activity(MONDAY_MIDNIGHT + 2 * HOUR_MS, 4000, 0.0, 0.0)];

        let now = MONDAY_MIDNIGHT + 3 * HOUR_MS;
        let utc_stats = UserStats::compute(&activities, now, &Utc);
        let pacific_stats = UserStats::compute(&activities, now, &pacific);

        assert_eq!(utc_stats.today_steps, 4000);
        assert_eq!(pacific_stats.today_steps, 4000);
        assert_eq!(pacific_stats.weekly_progress[6].day, "Sun");
        assert_eq!(
            pacific_stats.weekly_progress[6].timestamp,
            MONDAY_MIDNIGHT - DAY_MS + 8 * HOUR_MS
        );
    }
}
