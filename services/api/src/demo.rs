use crate::infra::{load_catalog, InMemorySessionRepository};
use clap::{ArgGroup, Args};
use interview_coach::scoring::components::{
    BONUS_WEIGHT, DEPTH_WEIGHT, KEYWORD_WEIGHT, SOFT_SKILL_WEIGHT, STRUCTURE_WEIGHT,
};
use interview_coach::{
    evaluate, AppError, EvaluationResult, PracticeService, PracticeServiceError, Question,
    QuestionCatalog, QuestionCategory, QuestionId, SessionSummary,
};
use std::fmt::Write as _;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug, Default)]
pub(crate) struct QuestionsListArgs {
    /// Only list questions from this category (technical or behavioral)
    #[arg(long, value_parser = crate::infra::parse_category)]
    pub(crate) category: Option<QuestionCategory>,
    /// Question catalog file (JSON or CSV). Defaults to the built-in catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub(crate) struct QuestionsShowArgs {
    /// Question id, e.g. it-01
    pub(crate) id: String,
    /// Question catalog file (JSON or CSV). Defaults to the built-in catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug)]
#[command(group(
    ArgGroup::new("answer_source")
        .required(true)
        .args(["answer", "answer_file"])
))]
pub(crate) struct EvaluateArgs {
    /// Question id to score against
    #[arg(long)]
    pub(crate) question: String,
    /// Answer text
    #[arg(long)]
    pub(crate) answer: Option<String>,
    /// Read the answer from a file
    #[arg(long)]
    pub(crate) answer_file: Option<PathBuf>,
    /// Print the evaluation as JSON
    #[arg(long)]
    pub(crate) json: bool,
    /// Question catalog file (JSON or CSV). Defaults to the built-in catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Question catalog file (JSON or CSV). Defaults to the built-in catalog.
    #[arg(long)]
    pub(crate) catalog: Option<PathBuf>,
}

pub(crate) fn run_questions_list(args: QuestionsListArgs) -> Result<(), AppError> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let questions: Vec<&Question> = match args.category {
        Some(category) => catalog.by_category(category).collect(),
        None => catalog.iter().collect(),
    };

    if questions.is_empty() {
        println!("No questions found");
        return Ok(());
    }
    for question in questions {
        println!(
            "{:<8} {:<11} {}",
            question.id.as_str(),
            question.category.label(),
            question.prompt
        );
    }
    Ok(())
}

pub(crate) fn run_questions_show(args: QuestionsShowArgs) -> Result<(), AppError> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let question = find_question(&catalog, &args.id)?;
    print!("{}", format_question(question));
    if let Some(navigation) = format_navigation(&catalog, question) {
        println!("{navigation}");
    }
    Ok(())
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let catalog = load_catalog(args.catalog.as_deref())?;
    let question = find_question(&catalog, &args.question)?;
    let answer = match (args.answer, args.answer_file) {
        (Some(answer), _) => answer,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => String::new(),
    };

    let result = evaluate(&answer, question);
    if args.json {
        let json = serde_json::to_string_pretty(&result).map_err(std::io::Error::from)?;
        println!("{json}");
    } else {
        print!("{}", format_evaluation(question, &result));
    }
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let catalog = Arc::new(load_catalog(args.catalog.as_deref())?);
    let service = PracticeService::new(
        catalog.clone(),
        Arc::new(InMemorySessionRepository::default()),
    );

    println!("Interview practice demo");
    let session = service.start_session()?;
    println!("Session {} started {}", session.id, session.started_at);

    let mut technical = catalog.by_category(QuestionCategory::Technical);
    let mut behavioral = catalog.by_category(QuestionCategory::Behavioral);
    let plan: Vec<(&Question, String)> = [
        technical.next().map(|question| (question, strong_answer(question))),
        behavioral.next().map(|question| (question, partial_answer(question))),
        technical.next().map(|question| (question, brief_answer(question))),
    ]
    .into_iter()
    .flatten()
    .collect();

    for (question, answer) in plan {
        println!("\nAnswer:\n  {answer}");
        let result = service.submit_answer(&session.id, &question.id, &answer)?;
        print!("{}", format_evaluation(question, &result));
    }

    let summary = service.summary(&session.id)?;
    print!("\n{}", format_summary(&summary));
    Ok(())
}

fn find_question<'a>(catalog: &'a QuestionCatalog, id: &str) -> Result<&'a Question, AppError> {
    let id = QuestionId::from(id.trim());
    catalog
        .get(&id)
        .ok_or_else(|| PracticeServiceError::UnknownQuestion(id).into())
}

/// Structured answer touching every rubric topic.
fn strong_answer(question: &Question) -> String {
    let expectations = &question.expectations;
    let mut answer = format!(
        "First, I would clarify the goal with the team. Next, I would cover {}.",
        expectations.core_topics.join(", ")
    );
    if !expectations.bonus_topics.is_empty() {
        let _ = write!(
            answer,
            " For example, I would add {} because it lowers risk.",
            expectations.bonus_topics.join(" and ")
        );
    }
    answer.push_str(
        " Finally, I would share the outcome with stakeholders, document what we learned \
         and align on the next steps so the customer impact stays visible.",
    );
    answer
}

fn partial_answer(question: &Question) -> String {
    let topic = question
        .expectations
        .core_topics
        .first()
        .map(String::as_str)
        .unwrap_or("the problem");
    format!(
        "I focused on {topic} and worked with my team to agree on a plan. We listened to \
         feedback and the situation improved."
    )
}

fn brief_answer(_question: &Question) -> String {
    "It depends on the situation.".to_string()
}

fn format_question(question: &Question) -> String {
    let expectations = &question.expectations;
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", question.id, question.category);
    let _ = writeln!(out, "{}", question.prompt);
    let _ = writeln!(out, "Core topics: {}", expectations.core_topics.join(", "));
    if !expectations.bonus_topics.is_empty() {
        let _ = writeln!(out, "Bonus topics: {}", expectations.bonus_topics.join(", "));
    }
    if !expectations.competencies.is_empty() {
        let _ = writeln!(out, "Competencies: {}", expectations.competencies.join(", "));
    }
    let _ = writeln!(out, "Target length: {} words", expectations.min_word_count);
    if !expectations.guidance.is_empty() {
        let _ = writeln!(out, "Guidance: {}", expectations.guidance);
    }
    out
}

/// Neighbouring question ids; the catalog clamps at either end, so a
/// neighbour equal to `question` is left out.
fn format_navigation(catalog: &QuestionCatalog, question: &Question) -> Option<String> {
    let neighbour = |candidate: Option<&Question>| {
        candidate
            .filter(|candidate| candidate.id != question.id)
            .map(|candidate| candidate.id.as_str().to_string())
    };
    let parts: Vec<String> = [
        neighbour(catalog.previous_before(&question.id)).map(|id| format!("Previous: {id}")),
        neighbour(catalog.next_after(&question.id)).map(|id| format!("Next: {id}")),
    ]
    .into_iter()
    .flatten()
    .collect();
    (!parts.is_empty()).then(|| parts.join(" | "))
}

fn component_max(weight: f64) -> u8 {
    (weight * 100.0).round() as u8
}

pub(crate) fn format_evaluation(question: &Question, result: &EvaluationResult) -> String {
    let breakdown = &result.breakdown;
    let mut out = String::new();
    let _ = writeln!(out, "\n{} ({}): {}", question.id, question.category, question.prompt);
    let _ = writeln!(
        out,
        "Score {}/100 - {} ({})",
        result.score,
        result.label.title(),
        result.label
    );
    let _ = writeln!(out, "{}", result.label.tone());

    let components = [
        ("Key points", breakdown.keyword_score, KEYWORD_WEIGHT),
        ("Bonus", breakdown.bonus_score, BONUS_WEIGHT),
        ("Depth", breakdown.depth_score, DEPTH_WEIGHT),
        ("Structure", breakdown.structure_score, STRUCTURE_WEIGHT),
        ("Soft skills", breakdown.soft_skill_score, SOFT_SKILL_WEIGHT),
    ];
    for (name, score, weight) in components {
        let _ = writeln!(out, "- {:<12} {:>3}/{}", name, score, component_max(weight));
    }

    let _ = writeln!(
        out,
        "Words: {} (target {})",
        breakdown.word_count, question.expectations.min_word_count
    );
    if !breakdown.matched_core_topics.is_empty() {
        let _ = writeln!(out, "Covered: {}", breakdown.matched_core_topics.join(", "));
    }
    if !breakdown.missing_core_topics.is_empty() {
        let _ = writeln!(out, "Missing: {}", breakdown.missing_core_topics.join(", "));
    }
    if !breakdown.matched_bonus_topics.is_empty() {
        let _ = writeln!(
            out,
            "Bonus hits: {}",
            breakdown.matched_bonus_topics.join(", ")
        );
    }
    for signal in &breakdown.tone_signals {
        let _ = writeln!(out, "Tone {signal}");
    }
    let _ = writeln!(out, "Feedback:");
    for line in &result.feedback {
        let _ = writeln!(out, "  * {line}");
    }
    out
}

pub(crate) fn format_summary(summary: &SessionSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Session summary");
    let _ = writeln!(
        out,
        "- Answered {} | average score {}",
        summary.answered, summary.average_score
    );
    match &summary.best {
        Some(best) => {
            let _ = writeln!(out, "- Best: {} ({})", best.question_id, best.score);
        }
        None => {
            let _ = writeln!(out, "- Best: none yet");
        }
    }
    if summary.needs_review.is_empty() {
        let _ = writeln!(out, "- Needs review: none");
    } else {
        let entries: Vec<String> = summary
            .needs_review
            .iter()
            .map(|entry| format!("{} ({})", entry.question_id, entry.score))
            .collect();
        let _ = writeln!(out, "- Needs review: {}", entries.join(", "));
    }
    out
}
