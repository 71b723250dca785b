// ABOUTME: CORS middleware configuration for the dashboard HTTP API
// ABOUTME: Admits the configured frontend origin with credentials
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

use crate::config::environment::DEFAULT_FRONTEND_URL;
use http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tracing::warn;

/// Configure CORS for the dashboard frontend
///
/// `frontend_url` may hold a comma-separated list of origins. Credentials are
/// allowed, so a wildcard is never emitted: an unparseable list falls back to
/// the default development origin.
///
/// ```bash
/// export FRONTEND_URL="https://dashboard.example.com"
/// ```
#[must_use]
pub fn setup_cors(frontend_url: &str) -> CorsLayer {
    let origins: Vec<HeaderValue> = frontend_url
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty() && *origin != "*")
        .filter_map(|origin| HeaderValue::from_str(origin.trim_end_matches('/')).ok())
        .collect();

    let allow_origin = if origins.is_empty() {
        warn!(frontend_url, "No usable CORS origin configured, using the development default");
        AllowOrigin::exact(HeaderValue::from_static(DEFAULT_FRONTEND_URL))
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_credentials(true)
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::AUTHORIZATION])
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
}
