// ABOUTME: Aggregation engine for the marathon training dashboard
// ABOUTME: Normalizes provider records and derives KPIs and the daily time series
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Marathon Intelligence
//!
//! Pure functions from already-fetched provider records to a [`Report`].
//! Nothing in this crate performs I/O or can fail: a source that could not be
//! fetched arrives as an empty slice and simply contributes nothing.
//!
//! [`Report`]: marathon_core::models::Report

/// Report assembly entry point
pub mod aggregation;

/// Headline indicator derivation
pub mod kpi;

/// Record-to-summary normalization and unit conversion
pub mod normalize;

/// Daily series construction
pub mod time_series;

pub use aggregation::aggregate;
