//! Advisory messages assembled from an ordered list of independent rules.

use crate::catalog::QuestionCategory;

use super::components::weak_structure_threshold;
use super::matching::CAUTION_MARKER;

pub(crate) const EMPTY_ANSWER_MESSAGE: &str =
    "No answer yet. Write down your thoughts to receive a score and feedback.";
pub(crate) const FULL_COVERAGE_MESSAGE: &str =
    "You covered every key point. This is a very solid answer.";
pub(crate) const TOO_LONG_MESSAGE: &str =
    "Trim the answer down to its core message to keep the interviewer focused.";
pub(crate) const WEAK_STRUCTURE_MESSAGE: &str =
    "Add transition language (먼저, 다음으로, because, as a result) to make the story easier to follow.";
pub(crate) const SOFT_SKILL_MESSAGE: &str =
    "Show a little more collaboration and how you felt; it makes the answer more convincing.";
pub(crate) const HIGH_ACHIEVER_MESSAGE: &str =
    "A highly polished answer. Practise your delivery pace to make it even better.";
pub(crate) const NEGATIVE_TONE_MESSAGE: &str =
    "Some phrasing may sound negative. Emphasise what you learned or the value you delivered to the team.";
pub(crate) const FALLBACK_MESSAGE: &str =
    "A solid answer. Polish the storytelling a little and it will stand out.";

const SHORT_ANSWER_RATIO: f64 = 0.75;
const LONG_ANSWER_RATIO: f64 = 1.4;
const SOFT_SKILL_GAP_THRESHOLD: u8 = 20;
const HIGH_ACHIEVER_THRESHOLD: u8 = 85;
const STARTER_TOPIC_COUNT: usize = 3;

/// Everything a feedback rule may inspect.
pub(crate) struct FeedbackContext<'a> {
    pub category: QuestionCategory,
    pub core_topics: &'a [String],
    pub matched_core: &'a [&'a str],
    pub missing_core: &'a [&'a str],
    pub word_count: usize,
    pub min_word_count: u32,
    pub structure_score: u8,
    pub soft_skill_score: u8,
    pub total_score: u8,
    pub tone_signals: &'a [String],
}

type FeedbackRule = fn(&FeedbackContext<'_>) -> Option<String>;

const RULES: [FeedbackRule; 6] = [
    core_coverage,
    answer_length,
    weak_structure,
    soft_skill_gap,
    high_achiever,
    negative_tone,
];

pub(crate) fn synthesize(context: &FeedbackContext<'_>) -> Vec<String> {
    let mut feedback: Vec<String> = RULES.iter().filter_map(|rule| rule(context)).collect();
    if feedback.is_empty() {
        feedback.push(FALLBACK_MESSAGE.to_string());
    }
    feedback
}

fn core_coverage(context: &FeedbackContext<'_>) -> Option<String> {
    let matched = context.matched_core.len();
    let message = if matched == context.core_topics.len() {
        FULL_COVERAGE_MESSAGE.to_string()
    } else if matched > 0 {
        format!(
            "You mentioned {matched} key point(s). Try to also cover: {}.",
            context.missing_core.join(", ")
        )
    } else {
        let starters: Vec<&str> = context
            .core_topics
            .iter()
            .take(STARTER_TOPIC_COUNT)
            .map(String::as_str)
            .collect();
        format!("Make sure to address these key points: {}.", starters.join(", "))
    };
    Some(message)
}

fn answer_length(context: &FeedbackContext<'_>) -> Option<String> {
    let target = f64::from(context.min_word_count);
    let words = context.word_count as f64;
    if words < target * SHORT_ANSWER_RATIO {
        Some(format!(
            "Add a bit more detail. Aim for at least {} words; you currently have {}.",
            context.min_word_count, context.word_count
        ))
    } else if words > target * LONG_ANSWER_RATIO {
        Some(TOO_LONG_MESSAGE.to_string())
    } else {
        None
    }
}

fn weak_structure(context: &FeedbackContext<'_>) -> Option<String> {
    (context.structure_score < weak_structure_threshold())
        .then(|| WEAK_STRUCTURE_MESSAGE.to_string())
}

fn soft_skill_gap(context: &FeedbackContext<'_>) -> Option<String> {
    (context.category == QuestionCategory::Behavioral
        && context.soft_skill_score < SOFT_SKILL_GAP_THRESHOLD)
        .then(|| SOFT_SKILL_MESSAGE.to_string())
}

fn high_achiever(context: &FeedbackContext<'_>) -> Option<String> {
    (context.total_score >= HIGH_ACHIEVER_THRESHOLD).then(|| HIGH_ACHIEVER_MESSAGE.to_string())
}

fn negative_tone(context: &FeedbackContext<'_>) -> Option<String> {
    context
        .tone_signals
        .iter()
        .any(|signal| signal.starts_with(CAUTION_MARKER))
        .then(|| NEGATIVE_TONE_MESSAGE.to_string())
}
