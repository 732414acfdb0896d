use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Question, QuestionId};
use crate::critique::Critique;
use crate::scoring::{evaluate, EvaluationResult, ScoreLabel};

/// Scores below this value are surfaced for review in the session summary.
pub const REVIEW_THRESHOLD: u8 = 70;
const REVIEW_WINDOW: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Latest answer for one question together with its scoring.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    pub answer: String,
    pub evaluation: EvaluationResult,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critique: Option<Critique>,
    pub evaluated_at: DateTime<Utc>,
}

/// One candidate's run through the catalog.
///
/// Records keep the order in which questions were first answered. Re-answering a question
/// replaces its record in place; resetting it removes the record entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeSession {
    pub id: SessionId,
    pub started_at: DateTime<Utc>,
    records: Vec<AnswerRecord>,
}

impl PracticeSession {
    pub fn new(id: SessionId, started_at: DateTime<Utc>) -> Self {
        Self {
            id,
            started_at,
            records: Vec::new(),
        }
    }

    pub fn records(&self) -> &[AnswerRecord] {
        &self.records
    }

    pub fn record_for(&self, question_id: &QuestionId) -> Option<&AnswerRecord> {
        self.records
            .iter()
            .find(|record| &record.question_id == question_id)
    }

    /// Score `answer` and store it, replacing any earlier answer and critique.
    pub fn record(&mut self, question: &Question, answer: &str) -> EvaluationResult {
        self.record_at(question, answer, Utc::now())
    }

    pub(crate) fn record_at(
        &mut self,
        question: &Question,
        answer: &str,
        evaluated_at: DateTime<Utc>,
    ) -> EvaluationResult {
        let evaluation = evaluate(answer, question);
        let record = AnswerRecord {
            question_id: question.id.clone(),
            answer: answer.to_string(),
            evaluation: evaluation.clone(),
            critique: None,
            evaluated_at,
        };

        match self
            .records
            .iter_mut()
            .find(|existing| existing.question_id == question.id)
        {
            Some(existing) => *existing = record,
            None => self.records.push(record),
        }
        evaluation
    }

    /// Returns `false` when the question has no recorded answer to attach to.
    pub fn attach_critique(&mut self, question_id: &QuestionId, critique: Critique) -> bool {
        match self
            .records
            .iter_mut()
            .find(|record| &record.question_id == question_id)
        {
            Some(record) => {
                record.critique = Some(critique);
                true
            }
            None => false,
        }
    }

    /// Drop the answer, evaluation and critique for a question.
    pub fn reset(&mut self, question_id: &QuestionId) -> bool {
        let before = self.records.len();
        self.records.retain(|record| &record.question_id != question_id);
        self.records.len() != before
    }

    pub fn summary(&self) -> SessionSummary {
        if self.records.is_empty() {
            return SessionSummary::default();
        }

        let mut scores: Vec<QuestionScore> = self.records.iter().map(QuestionScore::from).collect();
        let total: u32 = scores.iter().map(|entry| u32::from(entry.score)).sum();
        let average_score = (f64::from(total) / scores.len() as f64).round() as u8;

        // Stable sort: equal scores stay in answer order.
        scores.sort_by(|a, b| b.score.cmp(&a.score));
        let best = scores.first().cloned();
        let window_start = scores.len().saturating_sub(REVIEW_WINDOW);
        let needs_review = scores[window_start..]
            .iter()
            .filter(|entry| entry.score < REVIEW_THRESHOLD)
            .cloned()
            .collect();

        SessionSummary {
            answered: self.records.len(),
            average_score,
            best,
            needs_review,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionScore {
    pub question_id: QuestionId,
    pub score: u8,
    pub label: ScoreLabel,
}

impl From<&AnswerRecord> for QuestionScore {
    fn from(record: &AnswerRecord) -> Self {
        Self {
            question_id: record.question_id.clone(),
            score: record.evaluation.score,
            label: record.evaluation.label,
        }
    }
}

/// Aggregate progress across a session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub answered: usize,
    pub average_score: u8,
    pub best: Option<QuestionScore>,
    pub needs_review: Vec<QuestionScore>,
}
