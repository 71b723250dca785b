// ABOUTME: HTTP middleware for the dashboard API
// ABOUTME: Cross-origin configuration for the browser dashboard
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

/// CORS configuration
pub mod cors;

pub use cors::setup_cors;
