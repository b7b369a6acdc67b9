//! Google generative-language client.

use async_trait::async_trait;
use log::warn;
use serde::{Deserialize, Serialize};

use super::Assistant;
use crate::error::{HttpResultExt, MatrixError, Result};

const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_ENDPOINT: &str = "https://generativelanguage.googleapis.com/v1beta";

/// HTTP client for the generative-language `generateContent` API.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    /// Creates a client with the default model and endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
        }
    }

    /// Overrides the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sends a single-prompt generation request and returns the first
    /// candidate's text.
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        );

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .assistant_context("Generation request failed")?
            .error_for_status()
            .assistant_context("Generation request rejected")?
            .json::<GenerateResponse>()
            .await
            .assistant_context("Malformed generation response")?;

        response
            .first_text()
            .ok_or_else(|| MatrixError::Assistant {
                message: "Empty generation response".to_string(),
            })
    }

    /// Corrects spelling and minor grammar errors while preserving meaning.
    ///
    /// Falls back to the input text on any failure; a typo is never worth
    /// losing the user's edit over.
    pub async fn fix_spelling(&self, text: &str) -> String {
        if text.trim().is_empty() || text.len() < 2 {
            return text.to_string();
        }

        let prompt = format!(
            "Fix only spelling and minor grammar errors in the following text.\n\
             DO NOT change the meaning.\n\
             DO NOT add or remove information.\n\
             DO NOT change the professional tone.\n\
             Return ONLY the corrected text.\n\
             Text: \"{text}\""
        );

        match self.generate(&prompt).await {
            Ok(corrected) if !corrected.trim().is_empty() => corrected.trim().to_string(),
            Ok(_) => text.to_string(),
            Err(e) => {
                warn!("Spelling correction failed: {e}");
                text.to_string()
            }
        }
    }
}

#[async_trait]
impl Assistant for GeminiClient {
    async fn ask(&self, question: &str, plan_context: &str) -> Result<String> {
        let prompt = format!(
            "You are a pragmatic planning strategist for a weekly priority matrix.\n\
             The board rows below are JSON: each row has a priority group \
             (P1 critical, P2, P3, Meeting), a label, and per-weekday task \
             cells with completion flags.\n\n\
             Current board:\n{plan_context}\n\n\
             Question: {question}\n\n\
             Answer concretely and reference specific rows and days where useful."
        );
        self.generate(&prompt).await
    }
}

// Wire DTOs for the generateContent call.

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateResponse {
    fn first_text(self) -> Option<String> {
        self.candidates
            .into_iter()
            .next()?
            .content
            .parts
            .into_iter()
            .next()
            .map(|part| part.text)
            .filter(|text| !text.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_extracts_first_candidate_text() {
        let body = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Focus P1 on Monday."}]}},
                {"content": {"parts": [{"text": "ignored"}]}}
            ]
        }"#;
        let parsed: GenerateResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.first_text().unwrap(), "Focus P1 on Monday.");
    }

    #[test]
    fn test_empty_response_yields_none() {
        let parsed: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.first_text().is_none());

        let blank: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"   "}]}}]}"#,
        )
        .unwrap();
        assert!(blank.first_text().is_none());
    }
}
