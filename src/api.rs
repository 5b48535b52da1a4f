use crate::errors::{GemchatError, GemchatResult};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

// Constants for the Gemini API endpoint and model
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const GEMINI_MODEL: &str = "gemini-pro";

/// Thin client around the Gemini `generateContent` endpoint. Each call is a
/// single stateless turn: the user's message is the entire conversation
/// context, and exactly one attempt is made per call.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
}

impl GeminiClient {
    pub fn new() -> Self {
        Self::with_base_url(GEMINI_API_BASE)
    }

    /// Points the client at an alternate endpoint, used by tests to target a
    /// mock server.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Sends one message to Gemini and returns the generated text, with all
    /// returned segments joined by newlines and surrounding whitespace
    /// trimmed. Fails fast on a blank key without touching the network.
    pub async fn complete(&self, message: &str, api_key: &str) -> GemchatResult<String> {
        if api_key.trim().is_empty() {
            return Err(GemchatError::MissingCredential);
        }

        let url = format!("{}/models/{}:generateContent", self.base_url, GEMINI_MODEL);
        let payload = json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": message }],
                }
            ]
        });

        debug!(model = GEMINI_MODEL, "sending generateContent request");
        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<Value>(&body)
                .ok()
                .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Gemini request failed")
                        .to_string()
                });
            return Err(GemchatError::HttpError {
                status: status.as_u16(),
                detail,
            });
        }

        let body: Value = response.json().await?;
        let segments: Vec<&str> = body["candidates"]
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|candidate| candidate["content"]["parts"].as_array())
            .flatten()
            .filter_map(|part| part["text"].as_str())
            .collect();

        let text = segments.join("\n").trim().to_string();
        if text.is_empty() {
            return Err(GemchatError::EmptyResponse);
        }

        Ok(text)
    }
}

impl Default for GeminiClient {
    fn default() -> Self {
        Self::new()
    }
}
