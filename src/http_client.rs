//! HTTP client construction with sensible defaults.

use crate::error::Result;
use std::time::Duration;

/// Default timeout for completion API requests (5 minutes).
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Create an HTTP client with a custom timeout.
pub fn create_client_with_timeout(timeout: Duration) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("ncert-tutor/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}
