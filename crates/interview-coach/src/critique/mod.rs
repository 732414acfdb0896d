//! Optional model-backed critique of a practice answer.
//!
//! The deterministic rubric score from [`crate::scoring`] is always available. A critique adds
//! a narrative review produced by an external chat-completion model and is only offered when an
//! API key is configured.

mod openai;
mod prompt;

pub use openai::OpenAiCritiqueClient;
pub use prompt::{build_prompt, SYSTEM_PROMPT};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::catalog::Question;
use crate::scoring::ScoreLabel;

/// Narrative review returned by the critique model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Critique {
    pub score: u8,
    pub label: ScoreLabel,
    pub summary: String,
    #[serde(default)]
    pub strengths: Vec<String>,
    #[serde(default)]
    pub improvements: Vec<String>,
    #[serde(default)]
    pub follow_up_questions: Vec<String>,
}

#[async_trait]
pub trait CritiqueProvider: Send + Sync {
    async fn critique(&self, question: &Question, answer: &str) -> Result<Critique, CritiqueError>;
}

#[derive(Debug, thiserror::Error)]
pub enum CritiqueError {
    #[error("critique service is not configured: OPENAI_API_KEY is missing")]
    MissingApiKey,
    #[error("answer is empty")]
    EmptyAnswer,
    #[error("critique request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("critique service responded with {status}: {body}")]
    Upstream { status: u16, body: String },
    #[error("critique service returned no content")]
    EmptyResponse,
    #[error("critique response could not be parsed: {0}")]
    Malformed(String),
}
