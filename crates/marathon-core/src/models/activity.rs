// ABOUTME: Strava activity models and the normalized activity summary
// ABOUTME: Raw records keep provider optionals; summaries carry converted units
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

use crate::constants::providers::strava::RUN_TYPES;

/// Activity as returned by `GET /athlete/activities`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StravaActivity {
    /// Strava activity id
    pub id: u64,
    /// Activity title
    pub name: String,
    /// Legacy activity type (e.g. `Run`)
    #[serde(rename = "type", default)]
    pub activity_type: String,
    /// Detailed sport type (e.g. `TrailRun`)
    #[serde(default)]
    pub sport_type: Option<String>,
    /// Local start time, `YYYY-MM-DDTHH:MM:SSZ`
    pub start_date_local: String,
    /// Distance in meters
    #[serde(default)]
    pub distance: f64,
    /// Moving time in seconds
    #[serde(default)]
    pub moving_time: u64,
    /// Elapsed time in seconds
    #[serde(default)]
    pub elapsed_time: u64,
    /// Elevation gain in meters
    #[serde(default)]
    pub total_elevation_gain: f64,
    /// Average heart rate in BPM
    #[serde(default)]
    pub average_heartrate: Option<f64>,
    /// Maximum heart rate in BPM
    #[serde(default)]
    pub max_heartrate: Option<f64>,
    /// Average cadence
    #[serde(default)]
    pub average_cadence: Option<f64>,
    /// Relative effort / suffer score
    #[serde(default)]
    pub suffer_score: Option<f64>,
}

impl StravaActivity {
    /// Whether `type` or `sport_type` denotes a running activity
    #[must_use]
    pub fn is_run(&self) -> bool {
        RUN_TYPES.contains(&self.activity_type.as_str())
            || self
                .sport_type
                .as_deref()
                .is_some_and(|sport| RUN_TYPES.contains(&sport))
    }

    /// Calendar day of the local start time (`YYYY-MM-DD`)
    #[must_use]
    pub fn local_day(&self) -> &str {
        self.start_date_local
            .split_once('T')
            .map_or(self.start_date_local.as_str(), |(day, _)| day)
    }

    /// `sport_type` when present and non-empty, otherwise `type`
    #[must_use]
    pub fn display_type(&self) -> &str {
        self.sport_type
            .as_deref()
            .filter(|sport| !sport.is_empty())
            .unwrap_or(&self.activity_type)
    }
}

/// Totals block of `GET /athletes/{id}/stats`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunTotals {
    /// Number of runs
    pub count: u32,
    /// Distance in meters
    pub distance: f64,
    /// Moving time in seconds
    pub moving_time: u64,
    /// Elapsed time in seconds
    pub elapsed_time: u64,
    /// Elevation gain in meters
    pub elevation_gain: f64,
}

/// Athlete running statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StravaStats {
    /// Last four weeks
    pub recent_run_totals: RunTotals,
    /// Year to date
    pub ytd_run_totals: RunTotals,
    /// All time
    pub all_run_totals: RunTotals,
}

/// Normalized activity row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivitySummary {
    /// Strava activity id
    pub id: u64,
    /// Local calendar day
    pub date: String,
    /// Sport type
    #[serde(rename = "type")]
    pub activity_type: String,
    /// Activity title
    pub name: String,
    /// Distance in miles
    pub distance: f64,
    /// Moving time in minutes
    pub duration: f64,
    /// Minutes per mile, `0` for zero-distance activities
    pub pace: f64,
    /// Elevation gain in feet
    pub elevation_gain: f64,
    /// Average heart rate in BPM, `0` when not recorded
    pub average_heart_rate: f64,
    /// Suffer score, `0` when not recorded
    pub suffer_score: f64,
}
