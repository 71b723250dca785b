// ABOUTME: Main library entry point for the marathon training dashboard API
// ABOUTME: Joins Strava training data with Oura recovery data into one report
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Marathon Dashboard
//!
//! Backend for a marathon training dashboard. For a chosen end date and
//! lookback it pulls running activities from Strava and daily sleep and
//! readiness from the Oura Ring, then reduces them to KPIs, a gap-free daily
//! time series and per-record summary tables.
//!
//! ## Architecture
//!
//! - **`oauth2_client`**: keeps provider access tokens valid, refreshing them
//!   once per expired bundle
//! - **`cache`**: memoizes provider responses per request shape with a TTL
//! - **`providers`**: Strava and Oura clients, cache-aside
//! - **`intelligence`**: the pure aggregation engine
//! - **`services`**: concurrent fetch, per-source fallback and aggregation
//! - **`routes`**: thin axum handlers
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use marathon_dashboard::config::ServerConfig;
//! use marathon_dashboard::routes::{router, AppState};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     let state = Arc::new(AppState::from_config(&config).await?);
//!     let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.http_port)).await?;
//!     axum::serve(listener, router(state)).await?;
//!     Ok(())
//! }
//! ```

/// Memoizing cache for provider responses
pub mod cache;

/// Environment-driven configuration
pub mod config;

/// Application constants
pub mod constants;

/// Error types and HTTP error envelope
pub mod errors;

/// Aggregation engine
pub mod intelligence;

/// Structured logging setup
pub mod logging;

/// HTTP middleware
pub mod middleware;

/// Provider records and report models
pub mod models;

/// OAuth 2.0 credential lifecycle
pub mod oauth2_client;

/// Strava and Oura data sources
pub mod providers;

/// HTTP routes and shared state
pub mod routes;

/// Dashboard orchestration services
pub mod services;

/// Shared utilities
pub mod utils;
