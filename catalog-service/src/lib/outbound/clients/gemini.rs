use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use crate::book::errors::BookError;
use crate::book::ports::ContentGenerator;

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const MODEL: &str = "gemini-2.5-flash-preview-05-20";

/// Calls the Gemini generateContent API. The response schema pins the
/// output to a JSON integer array, so the model returns book ids only.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(http: reqwest::Client, api_key: String) -> Self {
        Self { http, api_key }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: String,
}

#[async_trait]
impl ContentGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, BookError> {
        let url = format!("{BASE_URL}/{MODEL}:generateContent");

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "ARRAY",
                    "items": { "type": "INTEGER" }
                }
            }
        });

        let response = self
            .http
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| BookError::Generation(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BookError::Generation(format!(
                "provider returned status {}",
                response.status()
            )));
        }

        let generated: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| BookError::Generation(e.to_string()))?;

        generated
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or_else(|| BookError::Generation("response carried no candidates".to_string()))
    }
}
