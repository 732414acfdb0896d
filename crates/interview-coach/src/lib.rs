pub mod catalog;
pub mod config;
pub mod critique;
pub mod error;
pub mod practice;
pub mod scoring;
pub mod telemetry;

pub use catalog::{Expectations, Question, QuestionCatalog, QuestionCategory, QuestionId};
pub use critique::{Critique, CritiqueError, CritiqueProvider, OpenAiCritiqueClient};
pub use error::AppError;
pub use practice::{
    practice_router, PracticeService, PracticeServiceError, PracticeSession, RepositoryError,
    SessionId, SessionRepository, SessionSummary,
};
pub use scoring::{evaluate, EvaluationResult, ScoreBreakdown, ScoreLabel};
