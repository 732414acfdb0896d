use crate::catalog::{Expectations, Question, QuestionCategory, QuestionId};

pub(super) fn question(category: QuestionCategory, min_word_count: u32) -> Question {
    Question {
        id: QuestionId::from("event-loop"),
        category,
        prompt: "Explain how the JavaScript event loop works.".to_string(),
        expectations: Expectations {
            core_topics: vec![
                "call stack".to_string(),
                "task queue".to_string(),
                "rendering impact".to_string(),
                "asynchronous work".to_string(),
            ],
            bonus_topics: vec!["microtask".to_string(), "web worker".to_string()],
            min_word_count,
            competencies: vec!["language internals".to_string()],
            guidance: "Walk through the queue.".to_string(),
        },
    }
}

pub(super) fn technical_question() -> Question {
    question(QuestionCategory::Technical, 50)
}

pub(super) fn behavioral_question() -> Question {
    question(QuestionCategory::Behavioral, 50)
}

/// `count` neutral tokens that match no rubric term or vocabulary entry.
pub(super) fn filler(count: usize) -> String {
    vec!["word"; count].join(" ")
}

pub(super) fn sample_answers() -> Vec<String> {
    vec![
        String::new(),
        "   ".to_string(),
        "call stack".to_string(),
        filler(130),
        format!("First the call stack, next the task queue. {}", filler(30)),
        format!(
            "I blame nothing on the team; the rendering impact was stuck {}",
            filler(200)
        ),
        "먼저 call stack 다음으로 task queue 결과적으로 rendering impact 협업 공감".to_string(),
        full_coverage_answer(),
    ]
}

/// Hits all core and bonus topics, three connectives and three general soft skills; 58 words.
pub(super) fn full_coverage_answer() -> String {
    format!(
        "I explain the call stack and the task queue, and as a result the rendering impact of \
         asynchronous work on the team. I share why a microtask or a web worker helps because \
         the outcome has real impact. {}",
        filler(20)
    )
}
