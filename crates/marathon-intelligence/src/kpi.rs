// ABOUTME: Headline indicator derivation from normalized summaries
// ABOUTME: Weekly mileage rate and change, recovery means, readiness trend and load
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use marathon_core::constants::trend::{RECENT_WINDOW, THRESHOLD};
use marathon_core::constants::units::DAYS_PER_WEEK;
use marathon_core::models::{
    ActivitySummary, KpiSet, ReadinessSummary, ReadinessTrend, SleepSummary,
};

/// Arithmetic mean, `0` for an empty input
#[must_use]
pub fn mean(values: impl IntoIterator<Item = f64>) -> f64 {
    let (sum, count) = values
        .into_iter()
        .fold((0.0, 0_usize), |(sum, count), value| (sum + value, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

/// Window total expressed as a weekly rate regardless of window length
#[must_use]
pub fn weekly_rate(total_miles: f64, lookback_days: u32) -> f64 {
    total_miles / (f64::from(lookback_days) / DAYS_PER_WEEK)
}

/// Percentage change between two weekly rates; `0` when there is no baseline
#[must_use]
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        (current - previous) / previous * 100.0
    } else {
        0.0
    }
}

/// Compare the last three readiness scores against all earlier ones
///
/// Entries are ordered chronologically by date before partitioning, so callers
/// may pass them in any order.
#[must_use]
pub fn readiness_trend(readiness: &[ReadinessSummary]) -> ReadinessTrend {
    let mut chronological: Vec<&ReadinessSummary> = readiness.iter().collect();
    chronological.sort_by(|a, b| a.date.cmp(&b.date));

    let split = chronological.len().saturating_sub(RECENT_WINDOW);
    let (earlier, recent) = chronological.split_at(split);
    let earlier_mean = mean(earlier.iter().map(|r| r.readiness_score));
    let recent_mean = mean(recent.iter().map(|r| r.readiness_score));

    if recent_mean > earlier_mean + THRESHOLD {
        ReadinessTrend::Up
    } else if recent_mean < earlier_mean - THRESHOLD {
        ReadinessTrend::Down
    } else {
        ReadinessTrend::Stable
    }
}

/// Derive the KPI set for one window
///
/// `activities` holds only the runs inside the window; `previous_total_miles`
/// is the distance run in the same-length window before it.
#[must_use]
pub fn compute_kpis(
    activities: &[ActivitySummary],
    previous_total_miles: f64,
    sleep: &[SleepSummary],
    readiness: &[ReadinessSummary],
    lookback_days: u32,
) -> KpiSet {
    let total_miles: f64 = activities.iter().map(|a| a.distance).sum();
    let weekly_mileage = weekly_rate(total_miles, lookback_days);
    let previous_weekly_mileage = weekly_rate(previous_total_miles, lookback_days);

    KpiSet {
        weekly_mileage,
        weekly_mileage_change: percent_change(weekly_mileage, previous_weekly_mileage),
        average_readiness_score: mean(readiness.iter().map(|r| r.readiness_score)),
        readiness_trend: readiness_trend(readiness),
        average_sleep_duration: mean(sleep.iter().map(|s| s.duration)),
        average_sleep_score: mean(sleep.iter().map(|s| s.sleep_score)),
        total_training_sessions: activities.len(),
        cumulative_elevation_gain: activities.iter().map(|a| a.elevation_gain).sum(),
        training_load: activities.iter().map(|a| a.suffer_score).sum(),
    }
}
