// ABOUTME: Domain service layer for business logic extracted from route handlers
// ABOUTME: Protocol-agnostic orchestration of providers, cache and aggregation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Domain service layer
//!
//! Route handlers stay thin: they parse parameters and hand over to a service,
//! which owns the provider calls and the pure aggregation step.

/// Dashboard report orchestration
pub mod dashboard;

pub use dashboard::{
    DashboardCredentials, DashboardOutcome, DashboardService, DataSource, SourceFailure,
};
