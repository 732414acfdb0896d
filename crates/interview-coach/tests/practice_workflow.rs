//! End-to-end practice flow through the public service facade and HTTP router, using the
//! built-in catalog and a mocked chat-completions endpoint for critiques.

mod common {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use axum::body::Body;
    use axum::http::{header, Method, Request};
    use axum::response::Response;
    use serde_json::Value;

    use interview_coach::{
        OpenAiCritiqueClient, PracticeService, PracticeSession, QuestionCatalog, RepositoryError,
        SessionId, SessionRepository,
    };

    #[derive(Default)]
    pub struct MemoryRepository {
        sessions: Mutex<HashMap<SessionId, PracticeSession>>,
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

    pub fn service(critique_url: Option<&str>) -> Arc<PracticeService<MemoryRepository>> {
        let catalog = QuestionCatalog::builtin().expect("builtin catalog");
        let service = PracticeService::new(Arc::new(catalog), Arc::new(MemoryRepository::default()));
        let service = match critique_url {
            Some(url) => {
                let client =
                    OpenAiCritiqueClient::new("test-key", "gpt-4o-mini", Duration::from_secs(5))
                        .expect("client builds")
                        .with_base_url(url);
                service.with_critic(Arc::new(client))
            }
            None => service,
        };
        Arc::new(service)
    }

    pub fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    pub fn empty_request(method: Method, uri: &str) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .expect("request builds")
    }

    pub async fn read_json_body(response: Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 256 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }
}

use axum::http::{Method, StatusCode};
use serde_json::json;
use tower::ServiceExt;
use wiremock::{matchers, Mock, MockServer, ResponseTemplate};

use common::*;
use interview_coach::{practice_router, QuestionCategory, QuestionId, ScoreLabel};

const EVENT_LOOP_ANSWER: &str = "First, the call stack runs synchronous code until it is empty. \
Next, the event loop takes the oldest callback from the task queue, but every microtask queued \
by promises runs before that. Long handlers block rendering because the main thread stays busy, so the rendering impact shows \
up as dropped frames. For example, I moved asynchronous work such as parsing into a web worker and \
shared the profile with my team so we could align on the fix. As a result, input latency \
dropped, and the outcome was that the customer impact disappeared.";

#[test]
fn builtin_catalog_covers_both_tracks() {
    let service = service(None);
    let catalog = service.catalog();

    assert!(catalog.by_category(QuestionCategory::Technical).count() >= 5);
    assert!(catalog.by_category(QuestionCategory::Behavioral).count() >= 5);
    for question in catalog.iter() {
        assert!(!question.expectations.core_topics.is_empty());
        assert!(question.expectations.min_word_count > 0);
    }
}

#[test]
fn strong_answer_scores_well_against_builtin_rubric() {
    let service = service(None);

    let result = service
        .evaluate_once(&QuestionId::from("it-03"), EVENT_LOOP_ANSWER)
        .expect("question exists");

    assert!(result.breakdown.missing_core_topics.is_empty());
    assert_eq!(result.breakdown.keyword_score, 55);
    assert_eq!(result.breakdown.bonus_score, 10);
    assert!(result.score >= 85, "score was {}", result.score);
    assert_eq!(result.label, ScoreLabel::Excellent);
}

#[tokio::test]
async fn practice_session_round_trip_over_http() {
    let server = MockServer::start().await;
    let critique = json!({
        "score": 88,
        "label": "excellent",
        "summary": "Accurate model of the event loop with a concrete fix.",
        "strengths": ["Explains microtask ordering"],
        "improvements": ["Mention requestAnimationFrame"],
        "followUpQuestions": ["How would you profile this in production?"]
    });
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v1/chat/completions"))
        .and(matchers::header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": critique.to_string() } }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let router = practice_router(service(Some(&server.uri())));

    let started = router
        .clone()
        .oneshot(empty_request(Method::POST, "/api/v1/sessions"))
        .await
        .expect("route executes");
    assert_eq!(started.status(), StatusCode::CREATED);
    let session_id = read_json_body(started).await["sessionId"]
        .as_str()
        .expect("session id")
        .to_string();

    let answers = [
        ("it-03", EVENT_LOOP_ANSWER.to_string()),
        ("per-01", "I would rather not say.".to_string()),
    ];
    for (question_id, answer) in &answers {
        let response = router
            .clone()
            .oneshot(json_request(
                Method::POST,
                &format!("/api/v1/sessions/{session_id}/answers"),
                json!({ "questionId": question_id, "answer": answer }),
            ))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let critique_response = router
        .clone()
        .oneshot(empty_request(
            Method::POST,
            &format!("/api/v1/sessions/{session_id}/answers/it-03/critique"),
        ))
        .await
        .expect("route executes");
    assert_eq!(critique_response.status(), StatusCode::OK);
    let payload = read_json_body(critique_response).await;
    assert_eq!(payload["ok"], true);
    assert_eq!(payload["feedback"]["label"], "excellent");

    let view = router
        .oneshot(empty_request(
            Method::GET,
            &format!("/api/v1/sessions/{session_id}"),
        ))
        .await
        .expect("route executes");
    assert_eq!(view.status(), StatusCode::OK);
    let payload = read_json_body(view).await;
    assert_eq!(payload["summary"]["answered"], 2);
    assert_eq!(payload["summary"]["best"]["questionId"], "it-03");
    assert_eq!(payload["summary"]["needsReview"][0]["questionId"], "per-01");
    assert_eq!(payload["records"][0]["critique"]["score"], 88);
    assert!(payload["records"][1].get("critique").is_none());
}

#[tokio::test]
async fn critique_endpoint_relays_upstream_failures() {
    let server = MockServer::start().await;
    Mock::given(matchers::method("POST"))
        .and(matchers::path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let router = practice_router(service(Some(&server.uri())));

    let response = router
        .oneshot(json_request(
            Method::POST,
            "/api/v1/critique",
            json!({ "questionId": "it-03", "answer": EVENT_LOOP_ANSWER }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert_eq!(payload["ok"], false);
    assert!(payload["error"]
        .as_str()
        .is_some_and(|message| message.contains("upstream exploded")));
}
