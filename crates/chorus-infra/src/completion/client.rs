//! GeminiClient -- concrete [`CompletionClient`] implementation for the
//! Gemini `generateContent` API.
//!
//! The API key travels as a query parameter (the platform's convention) and
//! is wrapped in [`secrecy::SecretString`] so it never appears in Debug
//! output or logs.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use chorus_core::client::CompletionClient;
use chorus_types::error::CompletionError;

use super::types::{GenerateContentRequest, GenerateContentResponse};

/// The default completion model.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash-latest";

/// Gemini completion client. One instance is shared by all workers; it
/// carries no per-agent state.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(60))
            .build()
            .expect("failed to create reqwest client");

        Self {
            client,
            api_key,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Override the base URL (useful for testing or proxies).
    pub fn with_base_url(mut self, base_url: String) -> Self {
        self.base_url = base_url;
        self
    }

    /// Override the completion model.
    pub fn with_model(mut self, model: String) -> Self {
        self.model = model;
        self
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

impl CompletionClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, CompletionError> {
        let body = GenerateContentRequest::single(prompt);

        let response = self
            .client
            .post(self.url())
            .query(&[("key", self.api_key.expose_secret())])
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        parsed
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| CompletionError::MalformedResponse("no candidate text".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_model_url() {
        let client = GeminiClient::new(SecretString::from("test-key-not-real"));
        assert_eq!(
            client.url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-flash-latest:generateContent"
        );
    }

    #[test]
    fn test_url_overrides() {
        let client = GeminiClient::new(SecretString::from("test-key"))
            .with_base_url("http://localhost:9090".to_string())
            .with_model("gemini-pro".to_string());
        assert_eq!(
            client.url(),
            "http://localhost:9090/v1beta/models/gemini-pro:generateContent"
        );
    }
}
