// ABOUTME: OAuth 2.0 credential lifecycle for the Strava and Oura APIs
// ABOUTME: Token bundles, the refresh-token exchange client and the single-flight manager
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! # OAuth 2.0 Client Module
//!
//! The dashboard acts as an OAuth 2.0 client of both upstream providers. Tokens
//! are obtained out of band; this module only keeps them valid:
//! - `TokenBundle` carries an access token, refresh token and absolute expiry
//! - `OAuth2Client` performs the `grant_type=refresh_token` exchange
//! - `CredentialManager` returns a token valid at the moment of use and
//!   single-flights concurrent refreshes of the same credential

/// Refresh-token exchange client
pub mod client;
/// Credential lifecycle manager
pub mod credentials;

pub use client::{OAuth2Client, OAuth2Config, TokenBundle, TokenRefresher};
pub use credentials::CredentialManager;
