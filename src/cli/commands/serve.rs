//! Inbound HTTP endpoint for other agents.
//!
//! Accepts tutoring requests on `POST /submit` and answers each with the
//! response that was relayed for it.
//!
//! `/submit` takes a bare [`TutorRequest`]. Outbound traffic is different:
//! the HTTP relay posts an [`Envelope`](crate::relay::Envelope) carrying a
//! `TutorResponse` to the configured endpoint. An envelope is never a
//! request, so pointing one agent's relay at another agent's `/submit` is
//! rejected with 422.

use crate::agent::TutorAgent;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::message::TutorRequest;
use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

/// Run the agent's HTTP endpoint.
pub async fn run_serve(
    host: Option<String>,
    port: Option<u16>,
    mut settings: Settings,
) -> anyhow::Result<()> {
    if let Some(host) = host {
        settings.agent.host = host;
    }
    if let Some(port) = port {
        settings.agent.port = port;
    }

    preflight::check(Operation::Serve, &settings)?;

    let agent = Arc::new(TutorAgent::new(&settings)?);
    let app = router(agent.clone());

    let addr = settings.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("{} started on {}", agent.name(), addr);

    Output::header(agent.name());
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Submit", "POST /submit");
    println!();
    Output::kv("Model", &settings.completion.model);
    Output::kv(
        "Shared links",
        if settings.sink.enabled { settings.sink.url.as_str() } else { "disabled" },
    );
    Output::kv(
        "Replies to",
        settings.relay.recipient.as_deref().unwrap_or("request sender"),
    );
    println!();
    Output::info("Press Ctrl+C to stop the agent.");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the router for the agent's endpoints.
pub fn router(agent: Arc<TutorAgent>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/submit", post(submit))
        .layer(cors)
        .with_state(agent)
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

async fn health(State(agent): State<Arc<TutorAgent>>) -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok", "agent": agent.name() }))
}

async fn submit(
    State(agent): State<Arc<TutorAgent>>,
    Json(request): Json<TutorRequest>,
) -> impl IntoResponse {
    match agent.handle(request).await {
        Ok(response) => Json(response).into_response(),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
            .into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::CompletionClient;
    use crate::error::{Result, TutorError};
    use crate::message::{StudyPack, TutorResponse};
    use crate::prompt::{Prompt, PromptBuilder};
    use crate::relay::{Envelope, Relay, RelayTarget};
    use crate::sink::SharedLinkSink;
    use crate::test_support::{sample_request, spawn_stub};
    use async_trait::async_trait;
    use serde_json::Value;

    struct FixedCompletion(Option<&'static str>);

    #[async_trait]
    impl CompletionClient for FixedCompletion {
        async fn complete(&self, _prompt: &Prompt) -> Result<String> {
            self.0
                .map(str::to_string)
                .ok_or_else(|| TutorError::Completion("Completion API returned 503".to_string()))
        }

        fn model(&self) -> &str {
            "stub"
        }
    }

    struct DownSink;

    #[async_trait]
    impl SharedLinkSink for DownSink {
        async fn publish(&self, _pack: &StudyPack) -> Option<String> {
            None
        }
    }

    struct NullRelay;

    #[async_trait]
    impl Relay for NullRelay {
        async fn deliver(&self, _recipient: &str, _message: &TutorResponse) -> Result<()> {
            Ok(())
        }

        fn name(&self) -> &'static str {
            "null"
        }
    }

    async fn spawn_agent(reply: Option<&'static str>) -> String {
        let agent = TutorAgent::with_components(
            "OpenAI Agent",
            PromptBuilder::default(),
            Arc::new(FixedCompletion(reply)),
            Arc::new(DownSink),
            Arc::new(NullRelay),
            RelayTarget::Sender,
        );
        spawn_stub(router(Arc::new(agent))).await
    }

    #[tokio::test]
    async fn test_health() {
        let base = spawn_agent(None).await;
        let body: Value = reqwest::get(format!("{}/health", base))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body["status"], "ok");
        assert_eq!(body["agent"], "OpenAI Agent");
    }

    #[tokio::test]
    async fn test_submit_returns_relayed_response() {
        let base = spawn_agent(Some(
            r#"{"summary":"S","question_bank":"Q1\nQ2","answer_key":"A1\nA2"}"#,
        ))
        .await;

        let response = reqwest::Client::new()
            .post(format!("{}/submit", base))
            .json(&sample_request("agentA"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: TutorResponse = response.json().await.unwrap();
        assert_eq!(body.text, "S\nQ1\nQ2\nA1\nA2");
        assert_eq!(body.sender, "agentA");
    }

    #[tokio::test]
    async fn test_submit_completion_failure_is_bad_gateway() {
        let base = spawn_agent(None).await;

        let response = reqwest::Client::new()
            .post(format!("{}/submit", base))
            .json(&sample_request("agentA"))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::BAD_GATEWAY);

        let body: Value = response.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("503"));
    }

    #[tokio::test]
    async fn test_submit_rejects_malformed_request() {
        let base = spawn_agent(None).await;

        let response = reqwest::Client::new()
            .post(format!("{}/submit", base))
            .json(&serde_json::json!({ "chapter": "Light" }))
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_submit_rejects_relayed_envelope() {
        let base = spawn_agent(None).await;
        let envelope = Envelope::new(
            "agentB",
            &TutorResponse {
                text: "S\nQ1\nA1".to_string(),
                sender: "agentA".to_string(),
            },
        );

        let response = reqwest::Client::new()
            .post(format!("{}/submit", base))
            .json(&envelope)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);
    }
}
