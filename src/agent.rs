//! Request handling for the tutor agent.
//!
//! Drives one request through the whole path: prompt, completion,
//! validation, routing and relay.

use crate::completion::{CompletionClient, OpenAICompletion};
use crate::config::{Prompts, Settings};
use crate::error::Result;
use crate::message::{Outcome, TutorRequest, TutorResponse};
use crate::prompt::PromptBuilder;
use crate::relay::{create_relay, Relay, RelayTarget};
use crate::router::OutputRouter;
use crate::sink::{HttpSharedLinkSink, NoSink, SharedLinkSink};
use crate::validate::{excerpt, validate};
use std::sync::Arc;
use tracing::{debug, error, info, instrument};

/// The tutor agent. Holds no per-request state; one instance serves every request.
pub struct TutorAgent {
    name: String,
    prompt_builder: PromptBuilder,
    completion: Arc<dyn CompletionClient>,
    router: OutputRouter,
    relay: Arc<dyn Relay>,
    target: RelayTarget,
}

impl TutorAgent {
    /// Create an agent wired from configuration.
    pub fn new(settings: &Settings) -> Result<Self> {
        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;

        let completion: Arc<dyn CompletionClient> =
            Arc::new(OpenAICompletion::from_settings(&settings.completion)?);

        let sink: Arc<dyn SharedLinkSink> = if settings.sink.enabled {
            Arc::new(HttpSharedLinkSink::from_settings(&settings.sink)?)
        } else {
            info!("Shared-link service disabled, answers will be sent inline");
            Arc::new(NoSink)
        };

        let relay = create_relay(&settings.relay)?;
        info!("Relaying responses via {}", relay.name());

        Ok(Self::with_components(
            &settings.agent.name,
            PromptBuilder::new(&prompts),
            completion,
            sink,
            relay,
            RelayTarget::from_settings(&settings.relay),
        ))
    }

    /// Create an agent with custom components.
    pub fn with_components(
        name: &str,
        prompt_builder: PromptBuilder,
        completion: Arc<dyn CompletionClient>,
        sink: Arc<dyn SharedLinkSink>,
        relay: Arc<dyn Relay>,
        target: RelayTarget,
    ) -> Self {
        Self {
            name: name.to_string(),
            prompt_builder,
            completion,
            router: OutputRouter::new(sink),
            relay,
            target,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Handle one request and relay exactly one response.
    ///
    /// Returns the relayed response. Completion and relay failures are logged
    /// with the request context and returned; nothing is relayed when the
    /// completion fails.
    #[instrument(skip(self, request), fields(sender = %request.sender, chapter = %request.chapter))]
    pub async fn handle(&self, request: TutorRequest) -> Result<TutorResponse> {
        info!("Got request from {}: success={}", request.sender, request.success);

        let prompt = self.prompt_builder.build(&request)?;
        debug!("Request: {}", prompt.user);

        let raw = match self.completion.complete(&prompt).await {
            Ok(raw) => raw,
            Err(e) => {
                error!(
                    model = %self.completion.model(),
                    request = %prompt.user,
                    "Completion failed: {}",
                    e
                );
                return Err(e);
            }
        };

        let outcome = validate(&raw, &request.sender);
        match &outcome {
            Outcome::Summary(pack) => info!("Summary: {}", excerpt(&pack.summary, 200)),
            Outcome::Error { .. } => debug!("Raw completion: {}", raw),
        }

        let response = self.router.route(outcome, &request.sender).await;

        let recipient = self.target.resolve(&request);
        if let Err(e) = self.relay.deliver(recipient, &response).await {
            error!(
                recipient = %recipient,
                request = %prompt.user,
                "Failed to relay response: {}",
                e
            );
            return Err(e);
        }

        info!("Relayed response to {}", recipient);
        Ok(response)
    }
}
