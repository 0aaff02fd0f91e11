//! Pre-flight checks before starting the agent.
//!
//! Validates configuration and credentials up front so the first request
//! does not fail on something that was knowable at startup.

use crate::config::Settings;
use crate::error::Result;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Serving requires a valid config and an API key.
    Serve,
    /// One-shot asks have the same requirements as serving.
    Ask,
    /// Inspecting configuration has no requirements.
    Config,
}

/// Run pre-flight checks for the given operation.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Serve | Operation::Ask => {
            settings.validate()?;
            settings.completion.resolve_api_key()?;
        }
        Operation::Config => {}
    }
    Ok(())
}
