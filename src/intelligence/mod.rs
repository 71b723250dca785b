// ABOUTME: Aggregation engine re-exported from marathon-intelligence
// ABOUTME: Normalization, KPI computation and daily time series construction
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use marathon_intelligence::*;
