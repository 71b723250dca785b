// ABOUTME: Core types and constants for the marathon training dashboard
// ABOUTME: Foundation crate with error handling, unit constants and provider/report models
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Marathon Core
//!
//! Foundation crate shared by the aggregation engine and the dashboard server.
//! It changes infrequently, which keeps incremental builds of the workspace fast.
//!
//! ## Modules
//!
//! - **errors**: `AppError`, `ErrorCode` and the provider error taxonomy
//! - **constants**: unit conversion factors, cache defaults and provider endpoints
//! - **models**: raw provider records, normalized summaries and the report

/// Unified error handling system with standard error codes and HTTP responses
pub mod errors;

/// Application constants organized by domain
pub mod constants;

/// Provider records, normalized summaries and report types
pub mod models;
