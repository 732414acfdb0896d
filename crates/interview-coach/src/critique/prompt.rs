use crate::catalog::Question;

pub const SYSTEM_PROMPT: &str = "You are an assistant to a job interviewer. Evaluate answers \
fairly and specifically, and return nothing but the JSON result.";

/// User message asking the model to grade one answer against the question rubric.
pub fn build_prompt(question: &Question, answer: &str) -> String {
    let expectations = &question.expectations;
    let bonus_topics = if expectations.bonus_topics.is_empty() {
        "none".to_string()
    } else {
        expectations.bonus_topics.join(", ")
    };

    format!(
        r#"Below is a candidate's answer from a technical or behavioral interview. Evaluate it from the interviewer's point of view and summarise the result as JSON.

Interview question: {prompt}
Expected key points: {core}
Bonus points if mentioned: {bonus}
Competencies assessed: {competencies}
Recommended length (words): {min_words}

Candidate answer:
"""
{answer}
"""

Follow this JSON schema exactly.
{{
  "score": number (0-100),
  "label": "excellent" | "strong" | "developing" | "needs-improvement",
  "summary": string,
  "strengths": string[],
  "improvements": string[],
  "followUpQuestions": string[]
}}

- Scoring: weigh coverage of the key points, structure, depth and how collaboration and attitude come across.
- Choose the label from the score and keep it consistent.
- summary: two or three sentences on the overall impression of the answer.
- strengths and improvements: two or three bullets each.
- followUpQuestions: one or two questions the interviewer could ask next.
- Do not write anything outside the JSON."#,
        prompt = question.prompt,
        core = expectations.core_topics.join(", "),
        bonus = bonus_topics,
        competencies = expectations.competencies.join(", "),
        min_words = expectations.min_word_count,
        answer = answer,
    )
}
