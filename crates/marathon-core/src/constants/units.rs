// ABOUTME: Unit conversion factors for activity and sleep normalization
// ABOUTME: Fixed constants shared by the aggregation engine and its tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Miles per meter
pub const MILES_PER_METER: f64 = 0.000_621_371;

/// Feet per meter
pub const FEET_PER_METER: f64 = 3.280_84;

/// Seconds per minute
pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Seconds per hour
pub const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Days per week, used to turn a window total into a weekly rate
pub const DAYS_PER_WEEK: f64 = 7.0;
