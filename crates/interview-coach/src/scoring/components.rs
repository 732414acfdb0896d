//! Weighted sub-scores. Each component is `round(weight * min(achieved / total, 1) * 100)`.

use super::vocabulary::SIGNAL_TARGET;

pub const KEYWORD_WEIGHT: f64 = 0.55;
pub const BONUS_WEIGHT: f64 = 0.1;
pub const DEPTH_WEIGHT: f64 = 0.2;
pub const STRUCTURE_WEIGHT: f64 = 0.075;
pub const SOFT_SKILL_WEIGHT: f64 = 0.075;

/// Raw length ratio ceiling. The depth multiplier itself never exceeds 1.0.
pub const DEPTH_RATIO_CAP: f64 = 1.2;

pub const MAX_SCORE: u8 = 100;

/// Shared accumulator: zero when there is nothing to achieve.
pub fn weighted_score(weight: f64, achieved: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let ratio = (achieved as f64 / total as f64).min(1.0);
    (weight * ratio * 100.0).round() as u8
}

pub fn keyword_score(matched: usize, core_topics: usize) -> u8 {
    weighted_score(KEYWORD_WEIGHT, matched, core_topics)
}

/// Bonus credit is opt-in: a rubric without bonus topics divides by one and earns nothing.
pub fn bonus_score(matched: usize, bonus_topics: usize) -> u8 {
    weighted_score(BONUS_WEIGHT, matched, bonus_topics.max(1))
}

/// Full credit at or beyond the target word count. A zero target is treated as already met.
pub fn depth_score(word_count: usize, min_word_count: u32) -> u8 {
    let ratio = if min_word_count == 0 {
        1.0
    } else {
        (word_count as f64 / f64::from(min_word_count)).min(DEPTH_RATIO_CAP)
    };
    (ratio.min(1.0) * DEPTH_WEIGHT * 100.0).round() as u8
}

pub fn structure_score(matched: usize, vocabulary_size: usize) -> u8 {
    weighted_score(
        STRUCTURE_WEIGHT,
        matched,
        vocabulary_size.min(SIGNAL_TARGET),
    )
}

pub fn soft_skill_score(matched: usize, pool_size: usize) -> u8 {
    weighted_score(SOFT_SKILL_WEIGHT, matched, pool_size.min(SIGNAL_TARGET))
}

/// Structure scores below this value count as a weak structural signal.
pub fn weak_structure_threshold() -> u8 {
    (STRUCTURE_WEIGHT * 100.0 * 0.3).round() as u8
}

pub fn total_score(components: [u8; 5]) -> u8 {
    let sum: u16 = components.iter().map(|score| u16::from(*score)).sum();
    sum.min(u16::from(MAX_SCORE)) as u8
}
