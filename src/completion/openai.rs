//! OpenAI chat-completion implementation.

use super::CompletionClient;
use crate::config::CompletionSettings;
use crate::error::{Result, TutorError};
use crate::http_client::create_client_with_timeout;
use crate::prompt::Prompt;
use crate::validate::excerpt;
use async_openai::types::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

/// Completion client for OpenAI-compatible `/chat/completions` endpoints.
///
/// Requests are sent directly with reqwest so that each call is a single
/// attempt. Requests use async-openai's types; responses are read down to
/// `choices[0].message.content` only, so compatible endpoints that omit the
/// other OpenAI fields are accepted.
pub struct OpenAICompletion {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAICompletion {
    /// Create a client from settings, resolving the API key.
    pub fn from_settings(settings: &CompletionSettings) -> Result<Self> {
        let api_key = settings.resolve_api_key()?;
        Self::new(
            &settings.api_base,
            &api_key,
            &settings.model,
            Duration::from_secs(settings.timeout_secs),
        )
    }

    pub fn new(api_base: &str, api_key: &str, model: &str, timeout: Duration) -> Result<Self> {
        Ok(Self {
            http: create_client_with_timeout(timeout)?,
            endpoint: format!("{}/chat/completions", api_base.trim_end_matches('/')),
            api_key: api_key.to_string(),
            model: model.to_string(),
        })
    }

    fn build_messages(prompt: &Prompt) -> Result<Vec<ChatCompletionRequestMessage>> {
        Ok(vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(prompt.system.clone())
                .build()
                .map_err(|e| TutorError::Completion(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt.user.clone())
                .build()
                .map_err(|e| TutorError::Completion(e.to_string()))?
                .into(),
        ])
    }
}

#[async_trait]
impl CompletionClient for OpenAICompletion {
    #[instrument(skip(self, prompt), fields(model = %self.model))]
    async fn complete(&self, prompt: &Prompt) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(Self::build_messages(prompt)?)
            .build()
            .map_err(|e| TutorError::Completion(e.to_string()))?;

        debug!("Sending completion request to {}", self.endpoint);

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| TutorError::Completion(format!("Request to completion API failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TutorError::Completion(format!(
                "Completion API returned {}: {}",
                status,
                excerpt(&body, 500)
            )));
        }

        let completion: ChatResponse = response.json().await.map_err(|e| {
            TutorError::Completion(format!("Unreadable completion response: {}", e))
        })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| TutorError::Completion("Empty response from LLM".to_string()))?;

        debug!("Received {} bytes of completion text", content.len());
        Ok(content)
    }

    fn model(&self) -> &str {
        &self.model
    }
}
