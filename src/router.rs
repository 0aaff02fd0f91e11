//! Output routing: turns an outcome into the message sent to the recipient.

use crate::message::{Outcome, StudyPack, TutorResponse};
use crate::sink::SharedLinkSink;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Chooses between a linked answer key and inline answers.
pub struct OutputRouter {
    sink: Arc<dyn SharedLinkSink>,
}

impl OutputRouter {
    pub fn new(sink: Arc<dyn SharedLinkSink>) -> Self {
        Self { sink }
    }

    /// Build the outbound message for `outcome`.
    ///
    /// Summaries are offered to the shared-link service first. A link replaces
    /// the answer key; without one the answer key is sent inline. Errors are
    /// passed through without contacting the service.
    #[instrument(skip(self, outcome))]
    pub async fn route(&self, outcome: Outcome, sender: &str) -> TutorResponse {
        let text = match outcome {
            Outcome::Error { message } => message,
            Outcome::Summary(pack) => match self.sink.publish(&pack).await {
                Some(link) => {
                    debug!("Answers published, sending link");
                    format_with_link(&pack, &link)
                }
                None => {
                    debug!("Shared link unavailable, sending answers inline");
                    format_inline(&pack)
                }
            },
        };

        TutorResponse {
            text,
            sender: sender.to_string(),
        }
    }
}

fn format_with_link(pack: &StudyPack, link: &str) -> String {
    format!(
        "{}\n{}\n<a href=\"{}\">Link to answers</a>",
        pack.summary,
        pack.question_bank,
        escape_attr(link)
    )
}

/// Escape `value` for use inside a double-quoted HTML attribute.
fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn format_inline(pack: &StudyPack) -> String {
    format!("{}\n{}\n{}", pack.summary, pack.question_bank, pack.answer_key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sink::NoSink;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedSink {
        link: Option<String>,
        calls: AtomicUsize,
    }

    impl FixedSink {
        fn new(link: Option<&str>) -> Arc<Self> {
            Arc::new(Self {
                link: link.map(str::to_string),
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait]
    impl SharedLinkSink for FixedSink {
        async fn publish(&self, _pack: &StudyPack) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.link.clone()
        }
    }

    fn summary() -> Outcome {
        Outcome::Summary(StudyPack {
            summary: "S".to_string(),
            question_bank: "Q1\nQ2".to_string(),
            answer_key: "A1\nA2".to_string(),
            sender: "agentA".to_string(),
        })
    }

    #[tokio::test]
    async fn test_link_replaces_answer_key() {
        let router = OutputRouter::new(FixedSink::new(Some("http://x/1")));
        let response = router.route(summary(), "agentA").await;

        assert_eq!(
            response.text,
            "S\nQ1\nQ2\n<a href=\"http://x/1\">Link to answers</a>"
        );
        assert!(!response.text.contains("A1"));
        assert_eq!(response.sender, "agentA");
    }

    #[tokio::test]
    async fn test_link_is_escaped_in_href() {
        let router = OutputRouter::new(FixedSink::new(Some(
            r#"http://x/1?a=1&b="2"><script>"#,
        )));
        let response = router.route(summary(), "agentA").await;

        assert_eq!(
            response.text,
            "S\nQ1\nQ2\n<a href=\"http://x/1?a=1&amp;b=&quot;2&quot;&gt;&lt;script&gt;\">Link to answers</a>"
        );
    }

    #[tokio::test]
    async fn test_inline_answers_without_link() {
        let router = OutputRouter::new(Arc::new(NoSink));
        let response = router.route(summary(), "agentA").await;

        assert_eq!(response.text, "S\nQ1\nQ2\nA1\nA2");
        assert!(!response.text.contains("<a href"));
    }

    #[tokio::test]
    async fn test_error_skips_sink() {
        let sink = FixedSink::new(Some("http://x/1"));
        let router = OutputRouter::new(sink.clone());
        let response = router
            .route(
                Outcome::Error {
                    message: "sorry".to_string(),
                },
                "agentB",
            )
            .await;

        assert_eq!(response.text, "sorry");
        assert_eq!(response.sender, "agentB");
        assert_eq!(sink.calls.load(Ordering::SeqCst), 0);
    }
}
