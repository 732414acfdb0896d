use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{PracticeSession, SessionId, SessionSummary};
use super::repository::{RepositoryError, SessionRepository};
use crate::catalog::{Question, QuestionCatalog, QuestionId};
use crate::critique::{Critique, CritiqueError, CritiqueProvider};
use crate::scoring::{evaluate, EvaluationResult};

/// Service composing the question catalog, session storage and the optional critique model.
pub struct PracticeService<R> {
    catalog: Arc<QuestionCatalog>,
    repository: Arc<R>,
    critic: Option<Arc<dyn CritiqueProvider>>,
}

static SESSION_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_session_id() -> SessionId {
    let id = SESSION_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    SessionId(format!("session-{id:06}"))
}

impl<R> PracticeService<R>
where
    R: SessionRepository + 'static,
{
    pub fn new(catalog: Arc<QuestionCatalog>, repository: Arc<R>) -> Self {
        Self {
            catalog,
            repository,
            critic: None,
        }
    }

    pub fn with_critic(mut self, critic: Arc<dyn CritiqueProvider>) -> Self {
        self.critic = Some(critic);
        self
    }

    pub fn catalog(&self) -> &QuestionCatalog {
        &self.catalog
    }

    pub fn critique_enabled(&self) -> bool {
        self.critic.is_some()
    }

    pub fn start_session(&self) -> Result<PracticeSession, PracticeServiceError> {
        let session = PracticeSession::new(next_session_id(), Utc::now());
        let stored = self.repository.insert(session)?;
        info!(session = %stored.id, "practice session started");
        Ok(stored)
    }

    pub fn session(&self, session_id: &SessionId) -> Result<PracticeSession, PracticeServiceError> {
        let session = self
            .repository
            .fetch(session_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(session)
    }

    pub fn close_session(&self, session_id: &SessionId) -> Result<(), PracticeServiceError> {
        self.repository.remove(session_id)?;
        info!(session = %session_id, "practice session closed");
        Ok(())
    }

    /// Score an answer and store it in the session, replacing any earlier attempt.
    pub fn submit_answer(
        &self,
        session_id: &SessionId,
        question_id: &QuestionId,
        answer: &str,
    ) -> Result<EvaluationResult, PracticeServiceError> {
        let question = self.question(question_id)?;
        let mut session = self.session(session_id)?;
        let evaluation = session.record(question, answer);
        self.repository.update(session)?;
        Ok(evaluation)
    }

    pub fn reset_answer(
        &self,
        session_id: &SessionId,
        question_id: &QuestionId,
    ) -> Result<(), PracticeServiceError> {
        self.question(question_id)?;
        let mut session = self.session(session_id)?;
        if session.reset(question_id) {
            self.repository.update(session)?;
        }
        Ok(())
    }

    pub fn summary(&self, session_id: &SessionId) -> Result<SessionSummary, PracticeServiceError> {
        Ok(self.session(session_id)?.summary())
    }

    /// Score an answer without touching any session.
    pub fn evaluate_once(
        &self,
        question_id: &QuestionId,
        answer: &str,
    ) -> Result<EvaluationResult, PracticeServiceError> {
        let question = self.question(question_id)?;
        Ok(evaluate(answer, question))
    }

    /// Ask the critique model about an answer without storing the result.
    pub async fn critique(
        &self,
        question_id: &QuestionId,
        answer: &str,
    ) -> Result<Critique, PracticeServiceError> {
        let question = self.question(question_id)?;
        if answer.trim().is_empty() {
            return Err(PracticeServiceError::EmptyAnswer(question_id.clone()));
        }
        let critic = self
            .critic
            .as_ref()
            .ok_or(PracticeServiceError::CritiqueUnavailable)?;

        critic.critique(question, answer).await.map_err(|err| {
            warn!(question = %question_id, error = %err, "critique failed");
            PracticeServiceError::Critique(err)
        })
    }

    /// Critique the answer already recorded in the session and keep the result with it.
    pub async fn request_critique(
        &self,
        session_id: &SessionId,
        question_id: &QuestionId,
    ) -> Result<Critique, PracticeServiceError> {
        self.question(question_id)?;
        let session = self.session(session_id)?;
        let answer = session
            .record_for(question_id)
            .map(|record| record.answer.clone())
            .filter(|answer| !answer.trim().is_empty())
            .ok_or_else(|| PracticeServiceError::EmptyAnswer(question_id.clone()))?;

        let critique = self.critique(question_id, &answer).await?;

        // Re-read so answers recorded while the model was working are not lost.
        let mut session = self.session(session_id)?;
        let still_current = session
            .record_for(question_id)
            .is_some_and(|record| record.answer == answer);
        if still_current && session.attach_critique(question_id, critique.clone()) {
            self.repository.update(session)?;
        }
        Ok(critique)
    }

    fn question(&self, question_id: &QuestionId) -> Result<&Question, PracticeServiceError> {
        self.catalog
            .get(question_id)
            .ok_or_else(|| PracticeServiceError::UnknownQuestion(question_id.clone()))
    }
}

/// Error raised by the practice service.
#[derive(Debug, thiserror::Error)]
pub enum PracticeServiceError {
    #[error("unknown question {0}")]
    UnknownQuestion(QuestionId),
    #[error("no answer provided for question {0}")]
    EmptyAnswer(QuestionId),
    #[error("critique service is not configured")]
    CritiqueUnavailable,
    #[error(transparent)]
    Critique(#[from] CritiqueError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
