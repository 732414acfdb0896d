//! Practice sessions: per-candidate answer history, summaries and HTTP endpoints.
//!
//! Sessions live behind [`SessionRepository`]; the API service provides an in-memory
//! implementation and tests supply their own.

pub mod domain;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    AnswerRecord, PracticeSession, QuestionScore, SessionId, SessionSummary, REVIEW_THRESHOLD,
};
pub use repository::{RepositoryError, SessionRepository};
pub use router::practice_router;
pub use service::{PracticeService, PracticeServiceError};
