//! Deterministic rubric scoring for practice answers.
//!
//! [`evaluate`] turns raw answer text plus a question rubric into a score, a label, a structured
//! breakdown and feedback lines. It holds no state and performs no I/O, so it can be called from
//! any thread or task without coordination.

pub mod components;
mod feedback;
mod label;
pub mod matching;
pub mod vocabulary;

#[cfg(test)]
mod tests;

pub use label::ScoreLabel;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::catalog::Question;
use feedback::{FeedbackContext, EMPTY_ANSWER_MESSAGE};

/// Sub-scores and diagnostics behind a total score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub keyword_score: u8,
    pub bonus_score: u8,
    pub depth_score: u8,
    pub structure_score: u8,
    pub soft_skill_score: u8,
    pub matched_core_topics: Vec<String>,
    pub matched_bonus_topics: Vec<String>,
    pub missing_core_topics: Vec<String>,
    pub word_count: usize,
    pub tone_signals: Vec<String>,
}

impl ScoreBreakdown {
    pub fn component_total(&self) -> u16 {
        [
            self.keyword_score,
            self.bonus_score,
            self.depth_score,
            self.structure_score,
            self.soft_skill_score,
        ]
        .iter()
        .map(|score| u16::from(*score))
        .sum()
    }
}

/// Outcome of scoring one answer against one question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub score: u8,
    pub label: ScoreLabel,
    pub feedback: Vec<String>,
    pub breakdown: ScoreBreakdown,
}

/// Score `answer` against the rubric of `question`.
///
/// Any string is accepted. A blank answer short-circuits to a zero score that lists every core
/// topic as missing.
pub fn evaluate(answer: &str, question: &Question) -> EvaluationResult {
    let expectations = &question.expectations;
    let answer = answer.trim();

    if answer.is_empty() {
        return empty_answer(question);
    }

    if expectations.core_topics.is_empty() || expectations.min_word_count == 0 {
        warn!(
            question_id = %question.id,
            core_topics = expectations.core_topics.len(),
            min_word_count = expectations.min_word_count,
            "scoring against a malformed rubric"
        );
    }

    let word_count = matching::count_words(answer);
    let matched_core = matching::match_keywords(answer, &expectations.core_topics);
    let matched_bonus = matching::match_keywords(answer, &expectations.bonus_topics);
    let missing_core: Vec<&str> = expectations
        .core_topics
        .iter()
        .map(String::as_str)
        .filter(|topic| !matched_core.contains(topic))
        .collect();

    let keyword_score =
        components::keyword_score(matched_core.len(), expectations.core_topics.len());
    let bonus_score =
        components::bonus_score(matched_bonus.len(), expectations.bonus_topics.len());
    let depth_score = components::depth_score(word_count, expectations.min_word_count);

    let matched_structure = matching::match_keywords(answer, vocabulary::STRUCTURE_SIGNALS);
    let structure_score =
        components::structure_score(matched_structure.len(), vocabulary::STRUCTURE_SIGNALS.len());

    let soft_skill_pool = vocabulary::soft_skill_pool(question.category);
    let matched_soft_skills = matching::match_keywords(answer, &soft_skill_pool);
    let soft_skill_score =
        components::soft_skill_score(matched_soft_skills.len(), soft_skill_pool.len());

    let score = components::total_score([
        keyword_score,
        bonus_score,
        depth_score,
        structure_score,
        soft_skill_score,
    ]);
    let tone_signals = matching::detect_tone(answer);

    let feedback = feedback::synthesize(&FeedbackContext {
        category: question.category,
        core_topics: &expectations.core_topics,
        matched_core: &matched_core,
        missing_core: &missing_core,
        word_count,
        min_word_count: expectations.min_word_count,
        structure_score,
        soft_skill_score,
        total_score: score,
        tone_signals: &tone_signals,
    });

    let label = ScoreLabel::from_score(score);
    debug!(
        question_id = %question.id,
        score,
        %label,
        word_count,
        matched_core = matched_core.len(),
        "answer evaluated"
    );

    EvaluationResult {
        score,
        label,
        feedback,
        breakdown: ScoreBreakdown {
            keyword_score,
            bonus_score,
            depth_score,
            structure_score,
            soft_skill_score,
            matched_core_topics: owned_strings(&matched_core),
            matched_bonus_topics: owned_strings(&matched_bonus),
            missing_core_topics: owned_strings(&missing_core),
            word_count,
            tone_signals,
        },
    }
}

fn empty_answer(question: &Question) -> EvaluationResult {
    EvaluationResult {
        score: 0,
        label: ScoreLabel::NeedsImprovement,
        feedback: vec![EMPTY_ANSWER_MESSAGE.to_string()],
        breakdown: ScoreBreakdown {
            keyword_score: 0,
            bonus_score: 0,
            depth_score: 0,
            structure_score: 0,
            soft_skill_score: 0,
            matched_core_topics: Vec::new(),
            matched_bonus_topics: Vec::new(),
            missing_core_topics: question.expectations.core_topics.clone(),
            word_count: 0,
            tone_signals: Vec::new(),
        },
    }
}

fn owned_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|value| value.to_string()).collect()
}
