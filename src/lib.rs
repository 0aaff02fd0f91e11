//! NCERT Tutor - a message-driven tutoring agent
//!
//! Receives a chapter request from another agent, asks a chat-completion model
//! for a summary, question bank and answer key, and relays the result.
//!
//! # Overview
//!
//! Each request flows through the same path:
//! - the request is serialized into a prompt alongside a fixed tutoring instruction
//! - one chat-completion call returns the model's raw text
//! - the text is validated into a study pack, or a fixed apology when unusable
//! - the study pack is offered to a shared-link service; with a link the answer
//!   key is replaced by an anchor, otherwise it is sent inline
//! - the formatted message is relayed exactly once
//!
//! # Architecture
//!
//! - `config` - Settings and prompt templates
//! - `message` - Request, response and outcome types
//! - `prompt` - Prompt construction
//! - `completion` - Chat-completion clients
//! - `validate` - Model output validation
//! - `sink` - Shared-link service
//! - `router` - Output formatting and routing
//! - `relay` - Outbound delivery
//! - `agent` - Request handling
//!
//! # Example
//!
//! ```rust,no_run
//! use ncert_tutor::agent::TutorAgent;
//! use ncert_tutor::config::Settings;
//! use ncert_tutor::message::TutorRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let agent = TutorAgent::new(&settings)?;
//!
//!     let response = agent
//!         .handle(TutorRequest {
//!             pdf: String::new(),
//!             success: true,
//!             question: "What is reflection?".to_string(),
//!             chapter: "Light".to_string(),
//!             subject: "Science".to_string(),
//!             standard: "8".to_string(),
//!             sender: "agent1qexample".to_string(),
//!         })
//!         .await?;
//!     println!("{}", response.text);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod http_client;
pub mod message;
pub mod prompt;
pub mod relay;
pub mod router;
pub mod sink;
pub mod validate;

#[cfg(test)]
mod test_support;

pub use error::{Result, TutorError};
