// ABOUTME: Cache-related constants for TTL and sweep intervals
// ABOUTME: Defaults for the in-memory memoizing cache and its namespaces
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Default entry TTL in seconds when `set` is called without one
pub const DEFAULT_TTL_SECS: u64 = 3_600; // 1 hour

/// Default interval between background sweeps of expired entries
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 600; // 10 minutes

/// Athlete stats TTL (30 minutes)
pub const TTL_ATHLETE_STATS_SECS: u64 = 1_800;

/// Namespace for Strava activity lists
pub const NAMESPACE_ACTIVITIES: &str = "strava:activities";

/// Namespace for Strava athlete stats
pub const NAMESPACE_ATHLETE_STATS: &str = "strava:stats";

/// Namespace for Oura daily sleep
pub const NAMESPACE_SLEEP: &str = "oura:sleep";

/// Namespace for Oura daily readiness
pub const NAMESPACE_READINESS: &str = "oura:readiness";

/// Namespace for Oura heart rate samples
pub const NAMESPACE_HEART_RATE: &str = "oura:heartrate";
