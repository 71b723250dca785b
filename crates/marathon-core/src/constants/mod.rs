// ABOUTME: Application constants organized by domain
// ABOUTME: Unit conversions, cache defaults and upstream provider endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

/// Cache TTL and sweep defaults
pub mod cache;

/// Upstream provider endpoints and limits
pub mod providers;

/// Unit conversion factors used during normalization
pub mod units;

/// Readiness trend analysis constants
pub mod trend {
    /// Number of most recent readiness entries compared against the earlier ones
    pub const RECENT_WINDOW: usize = 3;

    /// Mean score difference that counts as a change of direction
    pub const THRESHOLD: f64 = 2.0;
}
