// ABOUTME: Benchmark fixtures generating Strava and Oura records over a date range
// ABOUTME: Deterministic data so successive benchmark runs are comparable
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Benchmark fixtures for provider records.

use chrono::{Days, NaiveDate};
use marathon_dashboard::models::{OuraReadiness, OuraSleep, StravaActivity};
use serde_json::json;

/// Predefined history lengths for benchmark scenarios
#[derive(Debug, Clone, Copy)]
pub enum HistoryLength {
    /// One week
    Week,
    /// Roughly a training block
    Quarter,
    /// A full year
    Year,
}

impl HistoryLength {
    #[must_use]
    pub const fn days(self) -> u32 {
        match self {
            Self::Week => 7,
            Self::Quarter => 90,
            Self::Year => 365,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Week => "7d",
            Self::Quarter => "90d",
            Self::Year => "365d",
        }
    }
}

/// Last day of every generated history
#[must_use]
pub fn end_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, 31).unwrap_or_default()
}

fn day_label(days_back: u32) -> String {
    end_date()
        .checked_sub_days(Days::new(u64::from(days_back)))
        .unwrap_or_default()
        .format("%Y-%m-%d")
        .to_string()
}

/// Two sessions a day across twice `days` (window plus preceding window),
/// every fourth one a ride
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn generate_activities(days: u32) -> Vec<StravaActivity> {
    (0..days * 2)
        .flat_map(|back| {
            let date = day_label(back);
            (0..2_u32).map(move |slot| {
                let id = u64::from(back * 2 + slot);
                let activity_type = if id % 4 == 0 { "Ride" } else { "Run" };
                json!({
                    "id": id,
                    "name": format!("Session {id}"),
                    "type": activity_type,
                    "sport_type": activity_type,
                    "start_date_local": format!("{date}T0{slot}:30:00Z"),
                    "distance": 8_000.0 + (id % 7) as f64 * 1_000.0,
                    "moving_time": 2_400 + (id % 5) * 300,
                    "elapsed_time": 2_700 + (id % 5) * 300,
                    "total_elevation_gain": (id % 11) as f64 * 12.0,
                    "average_heartrate": 140.0 + (id % 20) as f64,
                    "suffer_score": (id % 90) as f64,
                })
            })
        })
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect()
}

/// One sleep record per day
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn generate_sleep(days: u32) -> Vec<OuraSleep> {
    (0..days)
        .filter_map(|back| {
            serde_json::from_value(json!({
                "id": format!("sleep-{back}"),
                "day": day_label(back),
                "score": 70.0 + f64::from(back % 25),
                "total_sleep_duration": 24_000.0 + f64::from(back % 9) * 600.0,
                "deep_sleep_duration": 5_400.0,
                "light_sleep_duration": 14_400.0,
                "rem_sleep_duration": 5_400.0,
                "efficiency": 88.0,
                "average_hrv": 52.0,
            }))
            .ok()
        })
        .collect()
}

/// One readiness record per day
#[must_use]
pub fn generate_readiness(days: u32) -> Vec<OuraReadiness> {
    (0..days)
        .filter_map(|back| {
            serde_json::from_value(json!({
                "id": format!("readiness-{back}"),
                "day": day_label(back),
                "score": 60.0 + f64::from(back % 30),
                "temperature_deviation": 0.1,
                "contributors": {
                    "hrv_balance": 80.0,
                    "resting_heart_rate": 90.0,
                },
            }))
            .ok()
        })
        .collect()
}
