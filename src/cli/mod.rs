//! CLI module for the tutor agent.

pub mod commands;
mod output;
pub mod preflight;

pub use output::Output;

use clap::{Args, Parser, Subcommand};

/// NCERT tutor agent
///
/// Receives chapter requests from other agents, asks a language model for a
/// summary and question bank, and relays the result.
#[derive(Parser, Debug)]
#[command(name = "ncert-tutor")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the agent's inbound HTTP endpoint
    Serve {
        /// Host to bind to (defaults to agent.host)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (defaults to agent.port)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Handle a single request and print the response
    Ask(AskArgs),

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Args, Debug)]
pub struct AskArgs {
    /// Read the full request from a JSON file instead of flags
    #[arg(long, conflicts_with_all = ["subject", "standard", "chapter", "question"])]
    pub request: Option<String>,

    /// Subject, e.g. "Science"
    #[arg(long, required_unless_present = "request")]
    pub subject: Option<String>,

    /// Class/standard, e.g. "8"
    #[arg(long, required_unless_present = "request")]
    pub standard: Option<String>,

    /// Chapter name
    #[arg(long, required_unless_present = "request")]
    pub chapter: Option<String>,

    /// Question to focus on
    #[arg(long, required_unless_present = "request")]
    pub question: Option<String>,

    /// Reference to the chapter PDF
    #[arg(long, default_value = "")]
    pub pdf: String,

    /// Identifier of the requesting agent
    #[arg(long, default_value = "cli")]
    pub sender: String,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,
}
