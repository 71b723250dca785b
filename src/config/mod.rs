// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Environment-driven settings for the HTTP server, cache and upstream providers
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module
//!
//! All settings come from environment variables. See [`environment::ServerConfig::from_env`] for the full list.

/// Environment and server configuration
pub mod environment;

pub use environment::{CacheSettings, Environment, ProviderSettings, ServerConfig};
