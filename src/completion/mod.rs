//! Chat-completion clients.

mod openai;

pub use openai::OpenAICompletion;

use crate::error::Result;
use crate::prompt::Prompt;
use async_trait::async_trait;

/// Trait for language-model completion backends.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Send one prompt and return the raw text of the first completion choice.
    ///
    /// Exactly one attempt is made; transport failures and non-success
    /// statuses are returned as errors.
    async fn complete(&self, prompt: &Prompt) -> Result<String>;

    /// Model identifier used for requests.
    fn model(&self) -> &str;
}
