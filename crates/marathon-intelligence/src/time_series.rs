// ABOUTME: Daily time series construction over the reporting window
// ABOUTME: One point per calendar day; mileage accumulates, recovery values overwrite
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::collections::BTreeMap;

use marathon_core::models::{
    ActivitySummary, ReadinessSummary, ReportWindow, SleepSummary, TimeSeriesPoint,
};

/// Build the gap-free series for `window`
///
/// Records dated outside the window are ignored. When a day has more than one
/// sleep or readiness record, the later one in iteration order wins.
#[must_use]
pub fn build_time_series(
    window: &ReportWindow,
    activities: &[ActivitySummary],
    sleep: &[SleepSummary],
    readiness: &[ReadinessSummary],
) -> Vec<TimeSeriesPoint> {
    let mut days: BTreeMap<String, TimeSeriesPoint> = window
        .days()
        .map(|day| {
            let date = day.format("%Y-%m-%d").to_string();
            let point = TimeSeriesPoint {
                date: date.clone(),
                mileage: 0.0,
                readiness_score: None,
                sleep_duration: None,
                sleep_score: None,
            };
            (date, point)
        })
        .collect();

    for activity in activities {
        if let Some(point) = days.get_mut(&activity.date) {
            point.mileage += activity.distance;
        }
    }

    for entry in readiness {
        if let Some(point) = days.get_mut(&entry.date) {
            point.readiness_score = Some(entry.readiness_score);
        }
    }

    for entry in sleep {
        if let Some(point) = days.get_mut(&entry.date) {
            point.sleep_duration = Some(entry.duration);
            point.sleep_score = Some(entry.sleep_score);
        }
    }

    // BTreeMap iteration is ascending by date string
    days.into_values().collect()
}
