//! Question catalog: the ordered set of practice questions and their rubrics.
//!
//! The scoring engine trusts every rubric it is handed, so well-formedness is checked here,
//! once, when a catalog is loaded.

mod domain;
mod import;

pub use domain::{Expectations, Question, QuestionCategory, QuestionId};

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use tracing::debug;

const BUILTIN_CATALOG: &str = include_str!("../../data/questions.json");

/// Ordered, validated collection of questions.
#[derive(Debug, Clone)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    pub fn new(questions: Vec<Question>) -> Result<Self, CatalogError> {
        validate(&questions)?;
        Ok(Self { questions })
    }

    /// Catalog shipped with the crate.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_json_reader(BUILTIN_CATALOG.as_bytes())
    }

    pub fn from_json_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let questions: Vec<Question> = serde_json::from_reader(reader)?;
        Self::new(questions)
    }

    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        Self::new(import::read_csv(reader)?)
    }

    /// Load a catalog file, choosing the format from the extension (`.csv` or JSON otherwise).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)?;
        let is_csv = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false);

        let catalog = if is_csv {
            Self::from_csv_reader(file)?
        } else {
            Self::from_json_reader(file)?
        };
        debug!(path = %path.display(), questions = catalog.len(), "question catalog loaded");
        Ok(catalog)
    }

    pub fn get(&self, id: &QuestionId) -> Option<&Question> {
        self.questions.iter().find(|question| &question.id == id)
    }

    pub fn position(&self, id: &QuestionId) -> Option<usize> {
        self.questions.iter().position(|question| &question.id == id)
    }

    pub fn by_category(&self, category: QuestionCategory) -> impl Iterator<Item = &Question> {
        self.questions
            .iter()
            .filter(move |question| question.category == category)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Question> {
        self.questions.iter()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Question following `id`, staying on the last question at the end of the catalog.
    pub fn next_after(&self, id: &QuestionId) -> Option<&Question> {
        let index = self.position(id)?;
        self.questions.get((index + 1).min(self.questions.len() - 1))
    }

    /// Question preceding `id`, staying on the first question at the start of the catalog.
    pub fn previous_before(&self, id: &QuestionId) -> Option<&Question> {
        let index = self.position(id)?;
        self.questions.get(index.saturating_sub(1))
    }
}

fn validate(questions: &[Question]) -> Result<(), CatalogError> {
    if questions.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut seen = HashSet::new();
    for question in questions {
        if question.id.as_str().trim().is_empty() {
            return Err(CatalogError::MissingId);
        }
        if !seen.insert(&question.id) {
            return Err(CatalogError::DuplicateId(question.id.clone()));
        }
        if question
            .expectations
            .core_topics
            .iter()
            .all(|topic| topic.trim().is_empty())
        {
            return Err(CatalogError::MissingCoreTopics(question.id.clone()));
        }
        if question.expectations.min_word_count == 0 {
            return Err(CatalogError::InvalidMinWordCount(question.id.clone()));
        }
    }

    Ok(())
}

/// Errors raised while loading or validating a catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read question catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid question catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid question catalog CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("line {line}: unknown question category '{value}'")]
    UnknownCategory { line: u64, value: String },
    #[error("question catalog contains no questions")]
    Empty,
    #[error("question without an id")]
    MissingId,
    #[error("duplicate question id {0}")]
    DuplicateId(QuestionId),
    #[error("question {0} declares no core topics")]
    MissingCoreTopics(QuestionId),
    #[error("question {0} must have a positive minimum word count")]
    InvalidMinWordCount(QuestionId),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn question(id: &str, category: QuestionCategory) -> Question {
        Question {
            id: QuestionId::from(id),
            category,
            prompt: format!("Prompt for {id}"),
            expectations: Expectations {
                core_topics: vec!["topic".to_string()],
                bonus_topics: Vec::new(),
                min_word_count: 50,
                competencies: Vec::new(),
                guidance: String::new(),
            },
        }
    }

    #[test]
    fn builtin_catalog_loads_both_categories() {
        let catalog = QuestionCatalog::builtin().expect("builtin catalog is valid");
        assert!(!catalog.is_empty());
        assert!(catalog.by_category(QuestionCategory::Technical).count() > 0);
        assert!(catalog.by_category(QuestionCategory::Behavioral).count() > 0);
        assert!(catalog.iter().all(|question| question.expectations.min_word_count > 0));
    }

    #[test]
    fn rejects_duplicate_ids() {
        let result = QuestionCatalog::new(vec![
            question("q-1", QuestionCategory::Technical),
            question("q-1", QuestionCategory::Behavioral),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id.as_str() == "q-1"));
    }

    #[test]
    fn rejects_rubric_without_core_topics() {
        let mut bad = question("q-1", QuestionCategory::Technical);
        bad.expectations.core_topics.clear();
        assert!(matches!(
            QuestionCatalog::new(vec![bad]),
            Err(CatalogError::MissingCoreTopics(_))
        ));
    }

    #[test]
    fn rejects_zero_word_target() {
        let mut bad = question("q-1", QuestionCategory::Technical);
        bad.expectations.min_word_count = 0;
        assert!(matches!(
            QuestionCatalog::new(vec![bad]),
            Err(CatalogError::InvalidMinWordCount(_))
        ));
    }

    #[test]
    fn navigation_clamps_at_both_ends() {
        let catalog = QuestionCatalog::new(vec![
            question("q-1", QuestionCategory::Technical),
            question("q-2", QuestionCategory::Behavioral),
        ])
        .expect("valid catalog");

        let first = QuestionId::from("q-1");
        let last = QuestionId::from("q-2");
        assert_eq!(catalog.next_after(&first).map(|q| q.id.as_str()), Some("q-2"));
        assert_eq!(catalog.next_after(&last).map(|q| q.id.as_str()), Some("q-2"));
        assert_eq!(catalog.previous_before(&first).map(|q| q.id.as_str()), Some("q-1"));
        assert!(catalog.next_after(&QuestionId::from("missing")).is_none());
    }

    #[test]
    fn json_accepts_legacy_category_names_and_missing_bonus_topics() {
        let json = r#"[{
            "id": "legacy-1",
            "category": "Personality",
            "prompt": "Tell me about feedback you received.",
            "expectations": {
                "coreTopics": ["open communication"],
                "minWordCount": 120,
                "competencies": ["coachability"],
                "guidance": "Share the routine."
            }
        }]"#;
        let catalog = QuestionCatalog::from_json_reader(json.as_bytes()).expect("json parses");
        let question = catalog.get(&QuestionId::from("legacy-1")).expect("present");
        assert_eq!(question.category, QuestionCategory::Behavioral);
        assert!(question.expectations.bonus_topics.is_empty());
    }
}
