use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedText {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Default)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Content,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// Client for the generative-text endpoint used to backfill director and movie text.
#[derive(Clone)]
pub struct TextGenClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl TextGenClient {
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent("movie-web-app/0.1")
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
        })
    }

    pub async fn generate(&self, prompt: &str) -> AppResult<GeneratedText> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        );
        let body = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::TextGeneration(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::TextGeneration(format!(
                "model returned status {status}"
            )));
        }

        let parsed = response
            .json::<GenerateContentResponse>()
            .await
            .map_err(|e| AppError::TextGeneration(format!("invalid response body: {e}")))?;

        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| AppError::TextGeneration("response contained no text".into()))?;

        Ok(GeneratedText { text })
    }
}
