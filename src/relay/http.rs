//! HTTP relay: posts envelopes to an agent endpoint.

use super::{Envelope, Relay};
use crate::error::{Result, TutorError};
use crate::http_client::create_client_with_timeout;
use crate::message::TutorResponse;
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument};

pub struct HttpRelay {
    http: reqwest::Client,
    endpoint: String,
}

impl HttpRelay {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: create_client_with_timeout(timeout)?,
            endpoint: endpoint.to_string(),
        })
    }
}

#[async_trait]
impl Relay for HttpRelay {
    #[instrument(skip(self, message), fields(endpoint = %self.endpoint))]
    async fn deliver(&self, recipient: &str, message: &TutorResponse) -> Result<()> {
        let envelope = Envelope::new(recipient, message);

        let response = self
            .http
            .post(&self.endpoint)
            .json(&envelope)
            .send()
            .await
            .map_err(|e| TutorError::Relay(format!("Failed to reach {}: {}", self.endpoint, e)))?;

        if !response.status().is_success() {
            return Err(TutorError::Relay(format!(
                "{} rejected envelope {} with {}",
                self.endpoint,
                envelope.id,
                response.status()
            )));
        }

        debug!("Delivered envelope {} to {}", envelope.id, recipient);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "http"
    }
}
