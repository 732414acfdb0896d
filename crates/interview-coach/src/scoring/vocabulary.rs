//! Fixed word lists consulted by every evaluation. Structure signals are mostly
//! Korean connectives; the soft-skill and tone lists pair Korean and English terms.

use crate::catalog::QuestionCategory;

/// Sequencing and causal connectives that signal a structured answer.
pub const STRUCTURE_SIGNALS: &[&str] = &[
    "먼저",
    "다음으로",
    "그 다음",
    "이후",
    "마지막으로",
    "결론적으로",
    "예를 들어",
    "결과적으로",
    "because",
    "as a result",
    "outcome",
];

/// Soft-skill signals credited for every question.
pub const GENERAL_SOFT_SKILLS: &[&str] = &[
    "협업",
    "team",
    "이해관계자",
    "stakeholder",
    "소통",
    "communicate",
    "정렬",
    "align",
    "영향",
    "impact",
    "고객",
    "customer",
    "문서화",
    "document",
    "공유",
    "share",
    "학습",
    "learn",
];

/// Interpersonal signals credited only for behavioral questions.
pub const INTERPERSONAL_SOFT_SKILLS: &[&str] = &[
    "공감",
    "empathy",
    "지원",
    "support",
    "경청",
    "listen",
    "피드백",
    "feedback",
    "신뢰",
    "trust",
    "존중",
    "respect",
    "포용",
    "inclusion",
    "동기부여",
    "motivated",
    "균형",
    "balance",
    "성장",
    "growth",
];

pub const POSITIVE_TONE_WORDS: &[&str] = &[
    "감사",
    "기쁘",
    "자랑스럽",
    "자신 있",
    "배웠",
    "개선했",
    "성공",
    "뿌듯",
    "excited",
    "proud",
    "confident",
    "learned",
    "improved",
    "successful",
    "grateful",
];

/// Deflecting or defeatist phrasing an interviewer may read as a red flag.
pub const NEGATIVE_TONE_FLAGS: &[&str] = &[
    "탓",
    "아무것도",
    "불가능",
    "막혔",
    "좌절",
    "실패만",
    "포기",
    "blame",
    "nothing",
    "impossible",
    "stuck",
];

/// Upper bound on the number of signals needed for full structure or soft-skill credit.
pub const SIGNAL_TARGET: usize = 6;

pub fn soft_skill_pool(category: QuestionCategory) -> Vec<&'static str> {
    match category {
        QuestionCategory::Technical => GENERAL_SOFT_SKILLS.to_vec(),
        QuestionCategory::Behavioral => GENERAL_SOFT_SKILLS
            .iter()
            .chain(INTERPERSONAL_SOFT_SKILLS)
            .copied()
            .collect(),
    }
}
