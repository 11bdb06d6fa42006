//! Client for the ingestion collaborator
//!
//! Finished records leave the pipeline through a single HTTP call: the
//! article store owns persistence, indexing, and everything downstream.
//! Any 2xx answer counts as accepted; anything else is a per-URL failure
//! for the batch runner to record.

use std::time::Duration;

use reqwest::Client as ReqwestClient;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::crawler::ExtractedArticle;
use crate::error::Error as CrateError;
use crate::summarizer::SummaryResult;

/// Timeout for ingestion requests in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error type for ingestion submissions
#[derive(Debug, Error)]
pub enum IngestError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The collaborator rejected the record
    #[error("ingestion rejected with status {code}: {body}")]
    Status {
        /// HTTP status code
        code: u16,
        /// Response body, for the logs
        body: String,
    },
}

impl From<IngestError> for CrateError {
    fn from(err: IngestError) -> Self {
        match err {
            IngestError::Http(e) => CrateError::Http(e),
            _ => CrateError::Ingest(err.to_string()),
        }
    }
}

/// Wire record for article submission
#[derive(Debug, Serialize)]
struct ArticleRecord<'a> {
    #[serde(flatten)]
    article: &'a ExtractedArticle,
    summary: &'a str,
}

/// HTTP client for the article store's ingestion endpoint
pub struct IngestClient {
    client: ReqwestClient,
    base_url: String,
}

impl IngestClient {
    /// Create a client for the collaborator at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = ReqwestClient::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Submit an extracted article and its summary for storage.
    #[instrument(skip(self, article, summary), fields(url = %article.url))]
    pub async fn submit(
        &self,
        article: &ExtractedArticle,
        summary: &SummaryResult,
    ) -> Result<(), IngestError> {
        let url = format!("{}/articles", self.base_url.trim_end_matches('/'));
        let record = ArticleRecord {
            article,
            summary: &summary.text,
        };

        debug!("submitting article");
        let response = self.client.post(&url).json(&record).send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(IngestError::Status {
                code: status.as_u16(),
                body,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summarizer::SummaryStrategy;

    fn sample_article() -> ExtractedArticle {
        ExtractedArticle {
            title: "Headline".to_string(),
            url: "https://example.com/a".to_string(),
            content: "Body".to_string(),
            source: "example.com".to_string(),
            author: None,
            published_at: None,
            image_url: Some("https://example.com/a.png".to_string()),
        }
    }

    fn sample_summary() -> SummaryResult {
        SummaryResult {
            text: "A concise summary.".to_string(),
            strategy: SummaryStrategy::AiGenerated,
            key_index: Some(0),
        }
    }

    #[tokio::test]
    async fn test_submit_success() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/articles")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "title": "Headline",
                "url": "https://example.com/a",
                "source": "example.com",
                "imageUrl": "https://example.com/a.png",
                "summary": "A concise summary."
            })))
            .with_status(201)
            .expect(1)
            .create_async()
            .await;

        let client = IngestClient::new(server.url());
        client
            .submit(&sample_article(), &sample_summary())
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_submit_rejection_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/articles")
            .with_status(422)
            .with_body("validation failed")
            .create_async()
            .await;

        let client = IngestClient::new(server.url());
        let result = client.submit(&sample_article(), &sample_summary()).await;

        assert!(matches!(
            result,
            Err(IngestError::Status { code: 422, .. })
        ));
    }
}
