// ABOUTME: HTTP client construction with per-purpose timeout configuration
// ABOUTME: Separate clients for short OAuth token exchanges and slower paginated API reads

use reqwest::{Client, ClientBuilder};
use std::time::Duration;

/// User agent sent to the upstream providers
const USER_AGENT: &str = concat!("marathon-dashboard/", env!("CARGO_PKG_VERSION"));

/// Create a new HTTP client with custom timeout settings
///
/// Falls back to a default client if the builder fails
#[must_use]
pub fn create_client_with_timeout(timeout_secs: u64, connect_timeout_secs: u64) -> Client {
    ClientBuilder::new()
        .user_agent(USER_AGENT)
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(connect_timeout_secs))
        .build()
        .unwrap_or_else(|_| Client::new())
}

/// Client for token endpoint exchanges, which should be fast
#[must_use]
pub fn oauth_client() -> Client {
    create_client_with_timeout(15, 5)
}

/// Client for provider API reads; an activity history can span many pages
#[must_use]
pub fn api_client() -> Client {
    create_client_with_timeout(60, 10)
}
