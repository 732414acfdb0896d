use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for catalog questions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QuestionId(pub String);

impl QuestionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for QuestionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Interview track a question belongs to. Behavioral questions widen the soft-skill vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    #[serde(alias = "IT", alias = "it")]
    Technical,
    #[serde(alias = "Personality", alias = "personality")]
    Behavioral,
}

impl QuestionCategory {
    pub fn label(&self) -> &'static str {
        match self {
            QuestionCategory::Technical => "technical",
            QuestionCategory::Behavioral => "behavioral",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "technical" | "it" | "tech" => Some(Self::Technical),
            "behavioral" | "behavioural" | "personality" => Some(Self::Behavioral),
            _ => None,
        }
    }
}

impl fmt::Display for QuestionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Rubric describing what an interviewer expects to hear.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expectations {
    pub core_topics: Vec<String>,
    #[serde(default)]
    pub bonus_topics: Vec<String>,
    pub min_word_count: u32,
    #[serde(default)]
    pub competencies: Vec<String>,
    #[serde(default)]
    pub guidance: String,
}

/// A single practice question together with its rubric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub category: QuestionCategory,
    pub prompt: String,
    pub expectations: Expectations,
}
