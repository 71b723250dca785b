// ABOUTME: Constants re-exported from marathon-core
// ABOUTME: Unit conversions, cache namespaces and provider endpoints
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

pub use marathon_core::constants::*;
