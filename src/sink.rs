//! Shared-link service: stores a study pack and hands back a link to it.

use crate::config::SinkSettings;
use crate::error::Result;
use crate::http_client::create_client_with_timeout;
use crate::message::StudyPack;
use async_trait::async_trait;
use reqwest::StatusCode;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// A service that publishes a study pack and returns a reference to it.
#[async_trait]
pub trait SharedLinkSink: Send + Sync {
    /// Publish `pack`. `None` means the service is unavailable; callers fall
    /// back to sending the answers inline.
    async fn publish(&self, pack: &StudyPack) -> Option<String>;
}

/// HTTP shared-link service. One POST per pack, no retry.
pub struct HttpSharedLinkSink {
    http: reqwest::Client,
    url: String,
}

impl HttpSharedLinkSink {
    pub fn new(url: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: create_client_with_timeout(timeout)?,
            url: url.to_string(),
        })
    }

    pub fn from_settings(settings: &SinkSettings) -> Result<Self> {
        Self::new(&settings.url, Duration::from_secs(settings.timeout_secs))
    }
}

#[async_trait]
impl SharedLinkSink for HttpSharedLinkSink {
    #[instrument(skip(self, pack), fields(url = %self.url))]
    async fn publish(&self, pack: &StudyPack) -> Option<String> {
        let response = match self.http.post(&self.url).json(pack).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Shared-link service unreachable: {}", e);
                return None;
            }
        };

        if response.status() != StatusCode::OK {
            warn!("Shared-link service returned {}", response.status());
            return None;
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to read shared-link response: {}", e);
                return None;
            }
        };

        let link = extract_link(&body);
        match &link {
            Some(link) => debug!("Published study pack at {}", link),
            None => warn!("Shared-link service returned no usable link"),
        }
        link
    }
}

/// Disabled sink: always reports the service as unavailable.
pub struct NoSink;

#[async_trait]
impl SharedLinkSink for NoSink {
    async fn publish(&self, _pack: &StudyPack) -> Option<String> {
        None
    }
}

/// Pull a link out of a shared-link response body.
///
/// Accepts a JSON string, a JSON object with a `link` or `url` field, or plain text.
pub fn extract_link(body: &str) -> Option<String> {
    let link = match serde_json::from_str::<serde_json::Value>(body) {
        Ok(serde_json::Value::String(link)) => link,
        Ok(serde_json::Value::Object(map)) => ["link", "url"]
            .iter()
            .find_map(|key| map.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string)?,
        Ok(_) => return None,
        Err(_) => body.to_string(),
    };

    let link = link.trim();
    if link.is_empty() {
        None
    } else {
        Some(link.to_string())
    }
}
