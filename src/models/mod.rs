// ABOUTME: Data models re-exported from marathon-core
// ABOUTME: Provider records, normalized summaries and report types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Data Models
//!
//! - `StravaActivity`, `StravaStats`: Strava records as received
//! - `OuraSleep`, `OuraReadiness`: Oura daily records as received
//! - `ActivitySummary`, `SleepSummary`, `ReadinessSummary`: normalized rows
//! - `ReportWindow`, `Report`, `KpiSet`, `TimeSeriesPoint`: aggregation input and output

pub use marathon_core::models::*;
