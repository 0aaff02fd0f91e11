//! Ask command implementation: handle a single request from the command line.

use crate::agent::TutorAgent;
use crate::cli::preflight::{self, Operation};
use crate::cli::{AskArgs, Output};
use crate::config::Settings;
use crate::message::TutorRequest;
use anyhow::{Context, Result};

/// Run the ask command.
pub async fn run_ask(args: &AskArgs, settings: Settings) -> Result<()> {
    preflight::check(Operation::Ask, &settings)?;

    let request = build_request(args)?;
    let agent = TutorAgent::new(&settings)?;

    let spinner = Output::spinner(&format!(
        "Preparing {} class {}: {}...",
        request.subject, request.standard, request.chapter
    ));
    let result = agent.handle(request).await;
    spinner.finish_and_clear();

    let response = result?;
    Output::header("Response");
    println!("{}", response.text);

    Ok(())
}

fn build_request(args: &AskArgs) -> Result<TutorRequest> {
    if let Some(path) = &args.request {
        let content = std::fs::read_to_string(Settings::expand_path(path))
            .with_context(|| format!("Failed to read request file {}", path))?;
        return serde_json::from_str(&content)
            .with_context(|| format!("Invalid request in {}", path));
    }

    let field = |value: &Option<String>, name: &str| {
        value
            .clone()
            .with_context(|| format!("--{} is required without --request", name))
    };

    Ok(TutorRequest {
        pdf: args.pdf.clone(),
        success: true,
        question: field(&args.question, "question")?,
        chapter: field(&args.chapter, "chapter")?,
        subject: field(&args.subject, "subject")?,
        standard: field(&args.standard, "standard")?,
        sender: args.sender.clone(),
    })
}
