// ABOUTME: Report assembly from raw Strava and Oura records
// ABOUTME: Filters runs, assigns them to the current or preceding window, sorts outputs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use marathon_core::models::{
    ActivitySummary, OuraReadiness, OuraSleep, Report, ReportWindow, StravaActivity,
};
use tracing::debug;

use crate::kpi::compute_kpis;
use crate::normalize::{summarize_activity, summarize_readiness, summarize_sleep};
use crate::time_series::build_time_series;

/// Produce the report for `window`
///
/// `activities` may span both the window and the same-length window preceding
/// it: runs inside the window drive summaries, KPIs and the series, runs in the
/// preceding window only drive the mileage change. Non-running activities and
/// anything dated elsewhere are ignored. Any of the slices may be empty.
#[must_use]
pub fn aggregate(
    activities: &[StravaActivity],
    sleep: &[OuraSleep],
    readiness: &[OuraReadiness],
    window: &ReportWindow,
) -> Report {
    let start = window.start_date().format("%Y-%m-%d").to_string();
    let end = window.end_date().format("%Y-%m-%d").to_string();
    let previous_start = window.previous_start().format("%Y-%m-%d").to_string();

    let mut current: Vec<ActivitySummary> = Vec::new();
    let mut previous_total_miles = 0.0;
    for summary in activities
        .iter()
        .filter(|activity| activity.is_run())
        .map(summarize_activity)
    {
        let day = summary.date.as_str();
        if day >= start.as_str() && day <= end.as_str() {
            current.push(summary);
        } else if day >= previous_start.as_str() && day < start.as_str() {
            previous_total_miles += summary.distance;
        }
    }

    let mut sleep_data: Vec<_> = sleep.iter().map(summarize_sleep).collect();
    let mut readiness_data: Vec<_> = readiness.iter().map(summarize_readiness).collect();

    let kpis = compute_kpis(
        &current,
        previous_total_miles,
        &sleep_data,
        &readiness_data,
        window.lookback_days(),
    );
    let time_series = build_time_series(window, &current, &sleep_data, &readiness_data);

    // Tables read most recent first; the series stays chronological
    current.sort_by(|a, b| b.date.cmp(&a.date));
    sleep_data.sort_by(|a, b| b.date.cmp(&a.date));
    readiness_data.sort_by(|a, b| b.date.cmp(&a.date));

    debug!(
        runs = current.len(),
        sleep = sleep_data.len(),
        readiness = readiness_data.len(),
        days = time_series.len(),
        "Aggregated dashboard report"
    );

    Report {
        date_range: window.date_range(),
        kpis,
        time_series,
        activities: current,
        sleep_data,
        readiness_data,
    }
}
