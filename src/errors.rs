// ABOUTME: Error types re-exported from marathon-core
// ABOUTME: AppError envelope, error codes and upstream provider failures
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Unified Error Handling
//!
//! `AppError` carries an `ErrorCode` that fixes the HTTP status; handlers
//! return it directly and axum renders the JSON envelope. `ProviderError`
//! describes a failed upstream call and converts into `AppError`.

pub use marathon_core::errors::*;
