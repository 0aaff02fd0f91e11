//! Configuration module for the tutor agent.
//!
//! Handles loading and managing application settings and prompt templates.

mod prompts;
mod settings;

pub use prompts::{Prompts, TutorPrompts};
pub use settings::{
    AgentSettings, CompletionSettings, PromptSettings, RelaySettings, Settings, SinkSettings,
    API_KEY_ENV,
};
