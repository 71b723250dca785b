// ABOUTME: Record-to-summary normalization with unit conversion
// ABOUTME: The single place where missing provider fields fall back to zero
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use marathon_core::constants::units::{
    FEET_PER_METER, MILES_PER_METER, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};
use marathon_core::models::{
    ActivitySummary, OuraReadiness, OuraSleep, ReadinessSummary, SleepSummary, StravaActivity,
};

/// Meters to miles
#[must_use]
pub fn meters_to_miles(meters: f64) -> f64 {
    meters * MILES_PER_METER
}

/// Meters to feet
#[must_use]
pub fn meters_to_feet(meters: f64) -> f64 {
    meters * FEET_PER_METER
}

/// Seconds to minutes
#[must_use]
pub fn seconds_to_minutes(seconds: f64) -> f64 {
    seconds / SECONDS_PER_MINUTE
}

/// Seconds to hours
#[must_use]
pub fn seconds_to_hours(seconds: f64) -> f64 {
    seconds / SECONDS_PER_HOUR
}

/// Minutes per mile; `0` when no distance was covered
#[must_use]
pub fn pace_minutes_per_mile(distance_meters: f64, moving_seconds: f64) -> f64 {
    if distance_meters.abs() < f64::EPSILON {
        return 0.0;
    }
    seconds_to_minutes(moving_seconds) / meters_to_miles(distance_meters)
}

/// Normalize a Strava activity
#[must_use]
pub fn summarize_activity(activity: &StravaActivity) -> ActivitySummary {
    let moving_seconds = activity.moving_time as f64;
    ActivitySummary {
        id: activity.id,
        date: activity.local_day().to_owned(),
        activity_type: activity.display_type().to_owned(),
        name: activity.name.clone(),
        distance: meters_to_miles(activity.distance),
        duration: seconds_to_minutes(moving_seconds),
        pace: pace_minutes_per_mile(activity.distance, moving_seconds),
        elevation_gain: meters_to_feet(activity.total_elevation_gain),
        average_heart_rate: activity.average_heartrate.unwrap_or(0.0),
        suffer_score: activity.suffer_score.unwrap_or(0.0),
    }
}

/// Normalize an Oura daily sleep record
#[must_use]
pub fn summarize_sleep(sleep: &OuraSleep) -> SleepSummary {
    let hours = |seconds: Option<f64>| seconds_to_hours(seconds.unwrap_or(0.0));
    SleepSummary {
        id: sleep.id.clone(),
        date: sleep.day.clone(),
        duration: hours(sleep.total_sleep_duration),
        deep_sleep: hours(sleep.deep_sleep_duration),
        light_sleep: hours(sleep.light_sleep_duration),
        rem_sleep: hours(sleep.rem_sleep_duration),
        efficiency: sleep.efficiency.unwrap_or(0.0),
        sleep_score: sleep.score.unwrap_or(0.0),
        average_hrv: sleep.average_hrv.unwrap_or(0.0),
    }
}

/// Normalize an Oura daily readiness record
#[must_use]
pub fn summarize_readiness(readiness: &OuraReadiness) -> ReadinessSummary {
    let contributors = readiness.contributors.clone().unwrap_or_default();
    ReadinessSummary {
        id: readiness.id.clone(),
        date: readiness.day.clone(),
        readiness_score: readiness.score.unwrap_or(0.0),
        hrv_balance: contributors.hrv_balance.unwrap_or(0.0),
        sleep_balance: contributors.sleep_balance.unwrap_or(0.0),
        activity_balance: contributors.activity_balance.unwrap_or(0.0),
        resting_heart_rate: contributors.resting_heart_rate.unwrap_or(0.0),
        temperature_deviation: readiness.temperature_deviation.unwrap_or(0.0),
    }
}
