//! Message types exchanged with other agents.

use serde::{Deserialize, Serialize};

/// Inbound tutoring request.
///
/// Field order is significant: the prompt is the JSON serialization of this
/// struct, so it must stay stable for identical requests to produce identical
/// prompts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorRequest {
    /// Reference to the chapter PDF.
    pub pdf: String,
    /// Whether the upstream agent managed to fetch the chapter.
    pub success: bool,
    pub question: String,
    pub chapter: String,
    pub subject: String,
    /// Class/grade, e.g. "8".
    pub standard: String,
    /// Identifier of the requesting agent.
    pub sender: String,
}

/// Outbound message relayed to another agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorResponse {
    pub text: String,
    /// Identifier of the original requester.
    pub sender: String,
}

/// Structured answer produced by the model for one request.
///
/// This is also the payload posted to the shared-link service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyPack {
    pub summary: String,
    /// Newline-delimited questions.
    pub question_bank: String,
    /// Newline-delimited answers, in question order.
    pub answer_key: String,
    pub sender: String,
}

/// Result of validating a completion: either a study pack or a user-facing error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Summary(StudyPack),
    Error { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_wire_names() {
        let json = r#"{
            "pdf": "https://ncert.nic.in/textbook/pdf/hesc111.pdf",
            "success": true,
            "question": "What is reflection?",
            "chapter": "Light",
            "subject": "Science",
            "standard": "8",
            "sender": "agentA"
        }"#;

        let request: TutorRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.chapter, "Light");
        assert!(request.success);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["standard"], "8");
        assert_eq!(value["sender"], "agentA");
    }

    #[test]
    fn test_request_rejects_missing_field() {
        let json = r#"{"pdf": "", "success": true, "question": "q", "chapter": "c", "subject": "s", "sender": "a"}"#;
        assert!(serde_json::from_str::<TutorRequest>(json).is_err());
    }
}
