use interview_coach::catalog::CatalogError;
use interview_coach::{
    PracticeSession, QuestionCatalog, QuestionCategory, RepositoryError, SessionId,
    SessionRepository,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemorySessionRepository {
    sessions: Arc<Mutex<HashMap<SessionId, PracticeSession>>>,
}

impl InMemorySessionRepository {
    fn lock(
        &self,
    ) -> Result<std::sync::MutexGuard<'_, HashMap<SessionId, PracticeSession>>, RepositoryError>
    {
        self.sessions
            .lock()
            .map_err(|_| RepositoryError::Unavailable("session store poisoned".to_string()))
    }
}

impl SessionRepository for InMemorySessionRepository {
    fn insert(&self, session: PracticeSession) -> Result<PracticeSession, RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&session.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(session.id.clone(), session.clone());
        Ok(session)
    }

    fn update(&self, session: PracticeSession) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        if guard.contains_key(&session.id) {
            guard.insert(session.id.clone(), session);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &SessionId) -> Result<Option<PracticeSession>, RepositoryError> {
        let guard = self.lock()?;
        Ok(guard.get(id).cloned())
    }

    fn remove(&self, id: &SessionId) -> Result<(), RepositoryError> {
        let mut guard = self.lock()?;
        guard.remove(id).map(|_| ()).ok_or(RepositoryError::NotFound)
    }
}

/// Load the catalog at `path`, or the built-in catalog when no path is given.
pub(crate) fn load_catalog(path: Option<&Path>) -> Result<QuestionCatalog, CatalogError> {
    let catalog = match path {
        Some(path) => QuestionCatalog::from_path(path)?,
        None => QuestionCatalog::builtin()?,
    };
    let source = path
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "builtin".to_string());
    info!(questions = catalog.len(), %source, "question catalog ready");
    Ok(catalog)
}

pub(crate) fn parse_category(raw: &str) -> Result<QuestionCategory, String> {
    QuestionCategory::parse(raw)
        .ok_or_else(|| format!("unknown category '{raw}', expected technical or behavioral"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::io::Write;

    fn session(id: &str) -> PracticeSession {
        PracticeSession::new(SessionId::from(id), Utc::now())
    }

    #[test]
    fn repository_rejects_duplicates_and_unknown_updates() {
        let repository = InMemorySessionRepository::default();
        repository.insert(session("session-1")).expect("insert");

        assert!(matches!(
            repository.insert(session("session-1")),
            Err(RepositoryError::Conflict)
        ));
        assert!(matches!(
            repository.update(session("session-2")),
            Err(RepositoryError::NotFound)
        ));
    }

    #[test]
    fn repository_removes_sessions() {
        let repository = InMemorySessionRepository::default();
        repository.insert(session("session-1")).expect("insert");

        repository
            .remove(&SessionId::from("session-1"))
            .expect("remove");

        assert!(repository
            .fetch(&SessionId::from("session-1"))
            .expect("fetch")
            .is_none());
        assert!(matches!(
            repository.remove(&SessionId::from("session-1")),
            Err(RepositoryError::NotFound)
        ));
    }

    #[test]
    fn parse_category_accepts_aliases() {
        assert_eq!(parse_category("IT"), Ok(QuestionCategory::Technical));
        assert_eq!(parse_category("personality"), Ok(QuestionCategory::Behavioral));
        assert!(parse_category("sales").is_err());
    }

    #[test]
    fn load_catalog_defaults_to_builtin() {
        let catalog = load_catalog(None).expect("builtin loads");
        assert!(!catalog.is_empty());
    }

    #[test]
    fn load_catalog_reads_csv_files() {
        let path = std::env::temp_dir().join(format!(
            "interview-coach-catalog-{}.csv",
            std::process::id()
        ));
        {
            let mut file = std::fs::File::create(&path).expect("create temp catalog");
            writeln!(
                file,
                "id,category,prompt,core_topics,bonus_topics,min_word_count,competencies,guidance"
            )
            .expect("write header");
            writeln!(
                file,
                "ops-01,technical,How do you roll back a release?,rollback plan;health checks,canary,80,operations,"
            )
            .expect("write row");
        }

        let catalog = load_catalog(Some(&path)).expect("csv catalog loads");
        std::fs::remove_file(&path).ok();

        assert_eq!(catalog.len(), 1);
        let question = catalog.iter().next().expect("one question");
        assert_eq!(
            question.expectations.core_topics,
            vec!["rollback plan".to_string(), "health checks".to_string()]
        );
    }
}
