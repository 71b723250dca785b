// ABOUTME: Oura daily sleep and readiness models and their normalized summaries
// ABOUTME: Every optional provider field stays an Option until normalization
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use serde::{Deserialize, Serialize};

/// Envelope of the Oura v2 usercollection endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OuraCollection<T> {
    /// Records in the requested date range
    pub data: Vec<T>,
    /// Pagination token, absent on the last page
    #[serde(default)]
    pub next_token: Option<String>,
}

/// Daily sleep record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OuraSleep {
    /// Oura record id
    pub id: String,
    /// Calendar day (`YYYY-MM-DD`)
    pub day: String,
    /// Sleep score
    #[serde(default)]
    pub score: Option<f64>,
    /// Record timestamp
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Time in bed in seconds
    #[serde(default)]
    pub duration: Option<f64>,
    /// Total sleep in seconds
    #[serde(default)]
    pub total_sleep_duration: Option<f64>,
    /// Awake time in seconds
    #[serde(default)]
    pub awake_time: Option<f64>,
    /// Light sleep in seconds
    #[serde(default)]
    pub light_sleep_duration: Option<f64>,
    /// Deep sleep in seconds
    #[serde(default)]
    pub deep_sleep_duration: Option<f64>,
    /// REM sleep in seconds
    #[serde(default)]
    pub rem_sleep_duration: Option<f64>,
    /// Sleep efficiency percentage
    #[serde(default)]
    pub efficiency: Option<f64>,
    /// Average heart rate in BPM
    #[serde(default)]
    pub average_heart_rate: Option<f64>,
    /// Lowest heart rate in BPM
    #[serde(default)]
    pub lowest_heart_rate: Option<f64>,
    /// Average HRV in ms
    #[serde(default)]
    pub average_hrv: Option<f64>,
}

/// Readiness sub-score contributors
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadinessContributors {
    /// Activity balance
    #[serde(default)]
    pub activity_balance: Option<f64>,
    /// Body temperature
    #[serde(default)]
    pub body_temperature: Option<f64>,
    /// HRV balance
    #[serde(default)]
    pub hrv_balance: Option<f64>,
    /// Previous day activity
    #[serde(default)]
    pub previous_day_activity: Option<f64>,
    /// Previous night
    #[serde(default)]
    pub previous_night: Option<f64>,
    /// Recovery index
    #[serde(default)]
    pub recovery_index: Option<f64>,
    /// Resting heart rate
    #[serde(default)]
    pub resting_heart_rate: Option<f64>,
    /// Sleep balance
    #[serde(default)]
    pub sleep_balance: Option<f64>,
}

/// Daily readiness record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OuraReadiness {
    /// Oura record id
    pub id: String,
    /// Calendar day (`YYYY-MM-DD`)
    pub day: String,
    /// Readiness score
    #[serde(default)]
    pub score: Option<f64>,
    /// Record timestamp
    #[serde(default)]
    pub timestamp: Option<String>,
    /// Body temperature deviation in degrees Celsius
    #[serde(default)]
    pub temperature_deviation: Option<f64>,
    /// Body temperature trend deviation
    #[serde(default)]
    pub temperature_trend_deviation: Option<f64>,
    /// Sub-score contributors
    #[serde(default)]
    pub contributors: Option<ReadinessContributors>,
}

/// Heart rate sample
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OuraHeartRate {
    /// Beats per minute
    pub bpm: u32,
    /// Measurement context (`awake`, `rest`, `sleep`, `workout`, ...)
    pub source: String,
    /// Sample time, RFC 3339
    pub timestamp: String,
}

/// Normalized sleep row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepSummary {
    /// Oura record id
    pub id: String,
    /// Calendar day
    pub date: String,
    /// Total sleep in hours
    pub duration: f64,
    /// Deep sleep in hours
    pub deep_sleep: f64,
    /// Light sleep in hours
    pub light_sleep: f64,
    /// REM sleep in hours
    pub rem_sleep: f64,
    /// Efficiency percentage
    pub efficiency: f64,
    /// Sleep score
    pub sleep_score: f64,
    /// Average HRV in ms
    pub average_hrv: f64,
}

/// Normalized readiness row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadinessSummary {
    /// Oura record id
    pub id: String,
    /// Calendar day
    pub date: String,
    /// Readiness score
    pub readiness_score: f64,
    /// HRV balance contributor
    pub hrv_balance: f64,
    /// Sleep balance contributor
    pub sleep_balance: f64,
    /// Activity balance contributor
    pub activity_balance: f64,
    /// Resting heart rate contributor
    pub resting_heart_rate: f64,
    /// Temperature deviation
    pub temperature_deviation: f64,
}
