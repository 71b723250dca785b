// ABOUTME: Report window, KPI set, time series point and the report itself
// ABOUTME: ReportWindow validates date ordering so aggregation stays total
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use super::{ActivitySummary, ReadinessSummary, SleepSummary};
use crate::errors::{AppError, AppResult};

/// Validated reporting window
///
/// Construction rejects `start_date > end_date`, a zero lookback and dates whose
/// preceding comparison window would fall outside the calendar range, so every
/// value of this type is a well-formed input for aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportWindow {
    start_date: NaiveDate,
    end_date: NaiveDate,
    lookback_days: u32,
    previous_start: NaiveDate,
}

impl ReportWindow {
    /// Window with explicit bounds
    ///
    /// # Errors
    ///
    /// Returns an invalid input error when `start_date` is after `end_date`,
    /// `lookback_days` is zero, or the preceding window is not representable
    pub fn new(start_date: NaiveDate, end_date: NaiveDate, lookback_days: u32) -> AppResult<Self> {
        if lookback_days == 0 {
            return Err(AppError::invalid_input("lookback must be a positive number of days"));
        }
        if start_date > end_date {
            return Err(AppError::invalid_input(format!(
                "start date {start_date} is after end date {end_date}"
            )));
        }
        let previous_start = start_date
            .checked_sub_days(Days::new(u64::from(lookback_days)))
            .ok_or_else(|| AppError::invalid_input("lookback reaches before the supported date range"))?;

        Ok(Self {
            start_date,
            end_date,
            lookback_days,
            previous_start,
        })
    }

    /// The `lookback_days` calendar days ending on `end_date` inclusive
    ///
    /// # Errors
    ///
    /// Returns an invalid input error when `lookback_days` is zero or the window
    /// is not representable
    pub fn ending_on(end_date: NaiveDate, lookback_days: u32) -> AppResult<Self> {
        if lookback_days == 0 {
            return Err(AppError::invalid_input("lookback must be a positive number of days"));
        }
        let start_date = end_date
            .checked_sub_days(Days::new(u64::from(lookback_days) - 1))
            .ok_or_else(|| AppError::invalid_input("lookback reaches before the supported date range"))?;
        Self::new(start_date, end_date, lookback_days)
    }

    /// First day of the window
    #[must_use]
    pub const fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    /// Last day of the window
    #[must_use]
    pub const fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    /// Lookback length in days
    #[must_use]
    pub const fn lookback_days(&self) -> u32 {
        self.lookback_days
    }

    /// First day of the same-length window immediately preceding this one
    #[must_use]
    pub const fn previous_start(&self) -> NaiveDate {
        self.previous_start
    }

    /// Every calendar day of the window in ascending order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end_date;
        self.start_date.iter_days().take_while(move |day| *day <= end)
    }

    /// Number of calendar days in the window, inclusive
    #[must_use]
    pub fn day_count(&self) -> usize {
        usize::try_from((self.end_date - self.start_date).num_days() + 1).unwrap_or(0)
    }

    /// Reported date range
    #[must_use]
    pub const fn date_range(&self) -> DateRange {
        DateRange {
            start_date: self.start_date,
            end_date: self.end_date,
            lookback_days: self.lookback_days,
        }
    }
}

/// Date range echoed back in the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// First day
    pub start_date: NaiveDate,
    /// Last day
    pub end_date: NaiveDate,
    /// Lookback length in days
    pub lookback_days: u32,
}

/// Direction of recent readiness scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadinessTrend {
    /// Recent mean above the earlier mean by more than the threshold
    Up,
    /// Recent mean below the earlier mean by more than the threshold
    Down,
    /// Within the threshold
    Stable,
}

/// Headline indicators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSet {
    /// Window mileage normalized to a weekly rate
    pub weekly_mileage: f64,
    /// Percentage change against the preceding window
    pub weekly_mileage_change: f64,
    /// Mean readiness score
    pub average_readiness_score: f64,
    /// Readiness direction
    pub readiness_trend: ReadinessTrend,
    /// Mean sleep duration in hours
    pub average_sleep_duration: f64,
    /// Mean sleep score
    pub average_sleep_score: f64,
    /// Number of runs in the window
    pub total_training_sessions: usize,
    /// Elevation gain in feet
    pub cumulative_elevation_gain: f64,
    /// Sum of suffer scores
    pub training_load: f64,
}

/// One day of the chronological series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeriesPoint {
    /// Calendar day
    pub date: String,
    /// Miles run that day
    pub mileage: f64,
    /// Readiness score, `null` without a record
    pub readiness_score: Option<f64>,
    /// Sleep hours, `null` without a record
    pub sleep_duration: Option<f64>,
    /// Sleep score, `null` without a record
    pub sleep_score: Option<f64>,
}

/// Unified dashboard report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Reporting window
    pub date_range: DateRange,
    /// Headline indicators
    pub kpis: KpiSet,
    /// One point per day, ascending
    pub time_series: Vec<TimeSeriesPoint>,
    /// Runs, most recent first
    pub activities: Vec<ActivitySummary>,
    /// Sleep rows, most recent first
    pub sleep_data: Vec<SleepSummary>,
    /// Readiness rows, most recent first
    pub readiness_data: Vec<ReadinessSummary>,
}
