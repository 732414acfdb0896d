use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use super::{build_prompt, Critique, CritiqueError, CritiqueProvider, SYSTEM_PROMPT};
use crate::catalog::Question;
use crate::config::CritiqueConfig;

const TEMPERATURE: f64 = 0.2;

/// Chat-completions client for any OpenAI-compatible endpoint.
#[derive(Clone)]
pub struct OpenAiCritiqueClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiCritiqueClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, CritiqueError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            api_key: api_key.into(),
            model: model.into(),
            base_url: "https://api.openai.com".to_string(),
        })
    }

    pub fn from_config(config: &CritiqueConfig) -> Result<Self, CritiqueError> {
        let api_key = config.api_key.clone().ok_or(CritiqueError::MissingApiKey)?;
        Ok(Self::new(api_key, config.model.clone(), config.timeout)?.with_base_url(&config.base_url))
    }

    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

#[derive(Deserialize)]
struct ChatCompletion {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    content: Option<String>,
}

#[async_trait]
impl CritiqueProvider for OpenAiCritiqueClient {
    async fn critique(&self, question: &Question, answer: &str) -> Result<Critique, CritiqueError> {
        let answer = answer.trim();
        if answer.is_empty() {
            return Err(CritiqueError::EmptyAnswer);
        }

        let body = json!({
            "model": self.model,
            "temperature": TEMPERATURE,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": build_prompt(question, answer) },
            ],
        });

        debug!(question = %question.id, model = %self.model, "requesting critique");
        let response = self
            .http
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(question = %question.id, status = status.as_u16(), "critique request rejected");
            return Err(CritiqueError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletion = response
            .json()
            .await
            .map_err(|err| CritiqueError::Malformed(err.to_string()))?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(CritiqueError::EmptyResponse)?;

        parse_critique(&content)
    }
}

/// Parse the model output, tolerating a fenced ```json block around the payload.
pub(crate) fn parse_critique(content: &str) -> Result<Critique, CritiqueError> {
    let payload = strip_code_fence(content);
    let critique: Critique =
        serde_json::from_str(payload).map_err(|err| CritiqueError::Malformed(err.to_string()))?;
    if critique.score > 100 {
        return Err(CritiqueError::Malformed(format!(
            "score {} is outside 0-100",
            critique.score
        )));
    }
    Ok(critique)
}

fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string (`json`, `JSON`, ...) on the opening fence line.
    let rest = match rest.split_once('\n') {
        Some((info, body)) if !info.trim_start().starts_with(|c: char| c == '{' || c == '[') => body,
        _ => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
