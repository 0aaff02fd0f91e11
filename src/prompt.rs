//! Prompt construction for tutoring requests.

use crate::config::Prompts;
use crate::error::Result;
use crate::message::TutorRequest;

/// A system instruction paired with the user prompt for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub system: String,
    pub user: String,
}

/// Turns a request into the prompt sent to the completion API.
///
/// The user prompt is the request serialized as JSON, embedded as-is.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    system: String,
}

impl PromptBuilder {
    pub fn new(prompts: &Prompts) -> Self {
        Self {
            system: prompts.tutor_system(),
        }
    }

    pub fn build(&self, request: &TutorRequest) -> Result<Prompt> {
        Ok(Prompt {
            system: self.system.clone(),
            user: serde_json::to_string(request)?,
        })
    }
}

impl Default for PromptBuilder {
    fn default() -> Self {
        Self::new(&Prompts::default())
    }
}
