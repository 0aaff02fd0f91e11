//! Validation of raw model output into an [`Outcome`].
//!
//! The model is asked for a JSON object with `summary`, `question_bank` and
//! `answer_key`. Anything else, including a missing key, becomes
//! [`Outcome::Error`] carrying [`APOLOGY`].

use crate::message::{Outcome, StudyPack};
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::warn;

/// Message returned to the requester when the model output is unusable.
pub const APOLOGY: &str =
    "Sorry, I wasn't able to answer your request this time. Feel free to try again.";

/// Shape the model is instructed to produce.
#[derive(Debug, Deserialize)]
struct ModelAnswer {
    summary: String,
    question_bank: TextOrLines,
    answer_key: TextOrLines,
}

/// Newline-delimited text, or a list of lines.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextOrLines {
    Text(String),
    Lines(Vec<String>),
}

impl From<TextOrLines> for String {
    fn from(value: TextOrLines) -> Self {
        match value {
            TextOrLines::Text(text) => text,
            TextOrLines::Lines(lines) => lines.join("\n"),
        }
    }
}

fn code_fence() -> &'static Regex {
    static FENCE: OnceLock<Regex> = OnceLock::new();
    FENCE.get_or_init(|| {
        Regex::new(r"(?s)^```[A-Za-z]*\s*(.*?)\s*```$").expect("code fence pattern is valid")
    })
}

/// Strip a single surrounding Markdown code fence, if present.
fn unfence(raw: &str) -> &str {
    let trimmed = raw.trim();
    code_fence()
        .captures(trimmed)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(trimmed)
}

/// Truncate `text` to at most `max` bytes on a character boundary.
pub(crate) fn excerpt(text: &str, max: usize) -> &str {
    if text.len() <= max {
        return text;
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}

/// Decode a JSON object into a [`ModelAnswer`].
///
/// Serde also builds structs from arrays in field order, so anything other
/// than an object is rejected up front.
fn parse_answer(text: &str) -> serde_json::Result<ModelAnswer> {
    match serde_json::from_str::<Value>(text)? {
        value @ Value::Object(_) => serde_json::from_value(value),
        other => Err(serde::de::Error::custom(format!(
            "expected a JSON object, found {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Parse a completion into a study pack for `sender`.
pub fn validate(raw: &str, sender: &str) -> Outcome {
    match parse_answer(unfence(raw)) {
        Ok(answer) => Outcome::Summary(StudyPack {
            summary: answer.summary,
            question_bank: answer.question_bank.into(),
            answer_key: answer.answer_key.into(),
            sender: sender.to_string(),
        }),
        Err(e) => {
            warn!(
                sender = %sender,
                "An error occurred retrieving data from the AI model: {}. Response was: {}",
                e,
                excerpt(raw, 500)
            );
            Outcome::Error {
                message: APOLOGY.to_string(),
            }
        }
    }
}
