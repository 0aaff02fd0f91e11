//! Delivery of outbound messages to other agents.

mod http;
mod stdout;

pub use http::HttpRelay;
pub use stdout::StdoutRelay;

use crate::config::RelaySettings;
use crate::error::Result;
use crate::message::{TutorRequest, TutorResponse};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use uuid::Uuid;

/// Schema name carried in every envelope.
pub const RESPONSE_SCHEMA: &str = "Response";

/// Trait for outbound message transports.
#[async_trait]
pub trait Relay: Send + Sync {
    /// Deliver `message` to `recipient`.
    async fn deliver(&self, recipient: &str, message: &TutorResponse) -> Result<()>;

    /// Short transport name for logs.
    fn name(&self) -> &'static str;
}

/// Wire envelope for an outbound message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    pub id: Uuid,
    pub recipient: String,
    pub schema: String,
    pub sent_at: DateTime<Utc>,
    pub payload: TutorResponse,
}

impl Envelope {
    pub fn new(recipient: &str, payload: &TutorResponse) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient: recipient.to_string(),
            schema: RESPONSE_SCHEMA.to_string(),
            sent_at: Utc::now(),
            payload: payload.clone(),
        }
    }
}

/// Who receives the response to a request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum RelayTarget {
    /// Reply to the request's sender.
    #[default]
    Sender,
    /// Send every response to one fixed agent.
    Fixed(String),
}

impl RelayTarget {
    pub fn from_settings(settings: &RelaySettings) -> Self {
        match &settings.recipient {
            Some(recipient) => RelayTarget::Fixed(recipient.clone()),
            None => RelayTarget::Sender,
        }
    }

    pub fn resolve<'a>(&'a self, request: &'a TutorRequest) -> &'a str {
        match self {
            RelayTarget::Sender => &request.sender,
            RelayTarget::Fixed(recipient) => recipient,
        }
    }
}

/// Build the relay described by `settings`: HTTP when an endpoint is set, stdout otherwise.
pub fn create_relay(settings: &RelaySettings) -> Result<Arc<dyn Relay>> {
    Ok(match &settings.endpoint {
        Some(endpoint) => Arc::new(HttpRelay::new(
            endpoint,
            Duration::from_secs(settings.timeout_secs),
        )?),
        None => Arc::new(StdoutRelay),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_request, spawn_stub};
    use axum::{http::StatusCode, routing::post, Router};

    #[test]
    fn test_target_defaults_to_sender() {
        let target = RelayTarget::from_settings(&RelaySettings::default());
        assert_eq!(target, RelayTarget::Sender);
        assert_eq!(target.resolve(&sample_request("agentA")), "agentA");
    }

    #[test]
    fn test_fixed_target_ignores_sender() {
        let settings = RelaySettings {
            recipient: Some("agent1qfixed".to_string()),
            ..Default::default()
        };
        let target = RelayTarget::from_settings(&settings);
        assert_eq!(target.resolve(&sample_request("agentA")), "agent1qfixed");
    }

    #[test]
    fn test_envelope_wire_format() {
        let payload = TutorResponse {
            text: "hello".to_string(),
            sender: "agentA".to_string(),
        };
        let envelope = Envelope::new("agentB", &payload);
        let value = serde_json::to_value(&envelope).unwrap();

        assert_eq!(value["recipient"], "agentB");
        assert_eq!(value["schema"], "Response");
        assert_eq!(value["payload"]["text"], "hello");
        assert_eq!(value["payload"]["sender"], "agentA");
        assert!(value["id"].is_string());
    }

    #[test]
    fn test_create_relay_defaults_to_stdout() {
        let relay = create_relay(&RelaySettings::default()).unwrap();
        assert_eq!(relay.name(), "stdout");
    }

    #[tokio::test]
    async fn test_create_relay_uses_configured_endpoint() {
        let app = Router::new().route("/inbox", post(|| async { StatusCode::OK }));
        let base = spawn_stub(app).await;

        let settings = RelaySettings {
            endpoint: Some(format!("{}/inbox", base)),
            ..Default::default()
        };
        let relay = create_relay(&settings).unwrap();
        assert_eq!(relay.name(), "http");

        let message = TutorResponse {
            text: "hello".to_string(),
            sender: "agentA".to_string(),
        };
        relay.deliver("agentB", &message).await.unwrap();
    }
}
