use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use crate::catalog::{Expectations, Question, QuestionCatalog, QuestionCategory, QuestionId};
use crate::critique::{Critique, CritiqueError, CritiqueProvider};
use crate::practice::domain::{PracticeSession, SessionId};
use crate::practice::repository::{RepositoryError, SessionRepository};
use crate::practice::{practice_router, PracticeService};
use crate::scoring::ScoreLabel;

pub(super) const TOPICS: [&str; 4] = ["alpha", "beta", "gamma", "delta"];

/// Question whose score is fully determined by how many of [`TOPICS`] an answer names.
pub(super) fn rubric_question(id: &str, category: QuestionCategory) -> Question {
    Question {
        id: QuestionId::from(id),
        category,
        prompt: format!("Explain {id}."),
        expectations: Expectations {
            core_topics: TOPICS.iter().map(|topic| topic.to_string()).collect(),
            bonus_topics: Vec::new(),
            min_word_count: 10,
            competencies: vec!["reasoning".to_string()],
            guidance: String::new(),
        },
    }
}

pub(super) fn catalog() -> QuestionCatalog {
    QuestionCatalog::new(vec![
        rubric_question("q1", QuestionCategory::Technical),
        rubric_question("q2", QuestionCategory::Technical),
        rubric_question("q3", QuestionCategory::Technical),
        rubric_question("q4", QuestionCategory::Behavioral),
        rubric_question("q5", QuestionCategory::Behavioral),
    ])
    .expect("valid catalog")
}

/// Ten-word answer naming the first `topics` core topics.
///
/// Scores: 0 -> 20, 1 -> 34, 2 -> 48, 3 -> 61, 4 -> 75.
pub(super) fn answer_with(topics: usize) -> String {
    let mut words: Vec<&str> = TOPICS.iter().take(topics).copied().collect();
    words.resize(10, "word");
    words.join(" ")
}

pub(super) fn critique_fixture() -> Critique {
    Critique {
        score: 72,
        label: ScoreLabel::Strong,
        summary: "Covers the main points with a clear order.".to_string(),
        strengths: vec!["Names every topic".to_string()],
        improvements: vec!["Add a concrete example".to_string()],
        follow_up_questions: vec!["What would you measure first?".to_string()],
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryRepository {
    pub(super) sessions: Arc<Mutex<HashMap<SessionId, PracticeSession>>>,
}

impl SessionRepository for MemoryRepository {
    fn insert(&self, session: PracticeSession) -> Result<PracticeSession, RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        if guard.contains_key(&session.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    fn update(&self, session: PracticeSession) -> Result<(), RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        guard.insert(session.id.clone(), session);
        Ok(())
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<PracticeSession>, RepositoryError> {
        let guard = self.sessions.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<(), RepositoryError> {
        let mut guard = self.sessions.lock().expect("repository mutex poisoned");
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

pub(super) struct UnavailableRepository;

impl SessionRepository for UnavailableRepository {
    fn insert(&self, _session: PracticeSession) -> Result<PracticeSession, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn update(&self, _session: PracticeSession) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn fetch(&self, _id: &SessionId) -> Result<Option<PracticeSession>, RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }

    fn remove(&self, _id: &SessionId) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("store offline".to_string()))
    }
}

/// Critique provider that answers with a canned review and counts calls.
#[derive(Default)]
pub(super) struct FakeCritic {
    calls: AtomicUsize,
    answers: Mutex<Vec<String>>,
}

impl FakeCritic {
    pub(super) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(super) fn answers(&self) -> Vec<String> {
        self.answers.lock().expect("critic mutex poisoned").clone()
    }
}

#[async_trait]
impl CritiqueProvider for FakeCritic {
    async fn critique(&self, _question: &Question, answer: &str) -> Result<Critique, CritiqueError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answers
            .lock()
            .expect("critic mutex poisoned")
            .push(answer.to_string());
        Ok(critique_fixture())
    }
}

pub(super) struct FailingCritic;

#[async_trait]
impl CritiqueProvider for FailingCritic {
    async fn critique(&self, _question: &Question, _answer: &str) -> Result<Critique, CritiqueError> {
        Err(CritiqueError::Upstream {
            status: 429,
            body: "rate limited".to_string(),
        })
    }
}

pub(super) fn build_service() -> (PracticeService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = PracticeService::new(Arc::new(catalog()), repository.clone());
    (service, repository)
}

pub(super) fn build_service_with_critic(
    critic: Arc<dyn CritiqueProvider>,
) -> PracticeService<MemoryRepository> {
    let (service, _) = build_service();
    service.with_critic(critic)
}

pub(super) fn router_with_service(service: PracticeService<MemoryRepository>) -> axum::Router {
    practice_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
