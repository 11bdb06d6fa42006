//! HTTP client for the Gemini API
//!
//! Single-shot `generateContent` calls authenticated per request with a
//! `?key=` query parameter, so the caller can rotate credentials across
//! calls without rebuilding the client.

use std::time::Duration;

use reqwest::Client as ReqwestClient;
use tracing::{debug, error, instrument};

use super::error::ProviderError;
use super::types::{Content, GenerateContentRequest, GenerateContentResponse};

/// Default timeout for HTTP requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default base URL of the Gemini Developer API
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// API version path segment
const API_VERSION: &str = "v1beta";

/// Client for the Gemini generateContent endpoint
#[derive(Debug, Clone)]
pub struct GenerativeClient {
    client: ReqwestClient,
    base_url: String,
}

impl GenerativeClient {
    /// Create a client against the public Gemini endpoint.
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a client against a custom base endpoint (proxies, tests).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Generate text from `model` for a single prompt.
    ///
    /// Any non-2xx status, malformed body, or empty candidate text is an
    /// error; the caller decides whether to retry with another credential.
    #[instrument(skip(self, api_key, prompt), level = "debug")]
    pub async fn generate(
        &self,
        api_key: &str,
        model: &str,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        let url = format!(
            "{}/{}/models/{}:generateContent",
            self.base_url, API_VERSION, model
        );
        let request = GenerateContentRequest {
            contents: vec![Content::user_text(prompt)],
        };

        debug!(model, "sending generateContent request");
        let response = self
            .client
            .post(&url)
            .query(&[("key", api_key)])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!("API error: {} - {}", status, body);
            return Err(ProviderError::Api {
                status_code: status.as_u16(),
                message: body,
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            error!("Failed to parse response: {}", e);
            ProviderError::UnexpectedResponse(format!("failed to parse response: {e}"))
        })?;

        let text = parsed.text();
        if text.trim().is_empty() {
            return Err(ProviderError::Empty);
        }
        Ok(text)
    }
}

impl Default for GenerativeClient {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SUCCESS_BODY: &str = r#"{
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": "a summary"}]},
            "finishReason": "STOP"
        }]
    }"#;

    #[tokio::test]
    async fn test_generate_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .match_query(mockito::Matcher::UrlEncoded(
                "key".to_string(),
                "test-key".to_string(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(SUCCESS_BODY)
            .expect(1)
            .create_async()
            .await;

        let client = GenerativeClient::with_base_url(server.url());
        let text = client
            .generate("test-key", "gemini-1.5-flash", "summarize this")
            .await
            .unwrap();

        assert_eq!(text, "a summary");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_api_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .match_query(mockito::Matcher::Any)
            .with_status(429)
            .with_body(r#"{"error": {"status": "RESOURCE_EXHAUSTED"}}"#)
            .create_async()
            .await;

        let client = GenerativeClient::with_base_url(server.url());
        let result = client
            .generate("test-key", "gemini-1.5-flash", "summarize this")
            .await;

        assert!(matches!(
            result,
            Err(ProviderError::Api {
                status_code: 429,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_generate_empty_candidates_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(r#"{"candidates": []}"#)
            .create_async()
            .await;

        let client = GenerativeClient::with_base_url(server.url());
        let result = client
            .generate("test-key", "gemini-1.5-flash", "summarize this")
            .await;

        assert!(matches!(result, Err(ProviderError::Empty)));
    }

    #[tokio::test]
    async fn test_generate_malformed_body_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let client = GenerativeClient::with_base_url(server.url());
        let result = client
            .generate("test-key", "gemini-1.5-flash", "summarize this")
            .await;

        assert!(matches!(result, Err(ProviderError::UnexpectedResponse(_))));
    }
}
