// ABOUTME: Domain models for provider records, normalized summaries and reports
// ABOUTME: Re-exports Strava, Oura and report types used across the workspace
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! Raw records mirror the upstream JSON shapes and keep every optional provider
//! field as an `Option`. Summaries are the normalized, unit-converted projection
//! produced by the aggregation engine; the zero fallback for missing fields is
//! applied only there.

mod activity;
mod recovery;
mod report;

pub use activity::{ActivitySummary, RunTotals, StravaActivity, StravaStats};
pub use recovery::{
    OuraCollection, OuraHeartRate, OuraReadiness, OuraSleep, ReadinessContributors, ReadinessSummary,
    SleepSummary,
};
pub use report::{DateRange, KpiSet, ReadinessTrend, Report, ReportWindow, TimeSeriesPoint};
