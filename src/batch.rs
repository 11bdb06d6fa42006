//! Batch ingestion runner
//!
//! The process entry point for scheduled ingestion: one logical worker
//! processes each seed URL fully — extraction, summarization, submission —
//! before starting the next. Sequential on purpose: parallel URLs would
//! hammer one provider's rate limits and make per-URL backoff meaningless.
//! A URL's failure never aborts the batch; every configured URL is
//! processed exactly once and counted.

use tracing::{error, info, instrument, warn};
use url::Url;

use crate::crawler::CrawlOrchestrator;
use crate::ingest::IngestClient;
use crate::summarizer::{Summarizer, SummaryStrategy};

/// Aggregate result of one batch run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchRunSummary {
    /// URLs that were extracted and accepted by the store
    pub success_count: usize,

    /// URLs that failed extraction, submission, or source derivation
    pub failure_count: usize,
}

/// Sequential crawl-summarize-ingest pipeline over a URL list
pub struct BatchRunner {
    orchestrator: CrawlOrchestrator,
    summarizer: Summarizer,
    ingest: IngestClient,
}

impl BatchRunner {
    /// Assemble a runner from its three collaborators.
    pub fn new(
        orchestrator: CrawlOrchestrator,
        summarizer: Summarizer,
        ingest: IngestClient,
    ) -> Self {
        Self {
            orchestrator,
            summarizer,
            ingest,
        }
    }

    /// Process every URL exactly once, in the order supplied.
    ///
    /// Always returns counts satisfying
    /// `success_count + failure_count == urls.len()`.
    #[instrument(skip(self, urls), fields(total = urls.len()))]
    pub async fn run(&self, urls: &[String]) -> BatchRunSummary {
        let mut summary = BatchRunSummary::default();

        for url in urls {
            info!(%url, "processing");
            if self.process(url).await {
                summary.success_count += 1;
            } else {
                summary.failure_count += 1;
            }
        }

        info!(
            success = summary.success_count,
            failures = summary.failure_count,
            "batch run complete"
        );
        summary
    }

    async fn process(&self, url: &str) -> bool {
        let Some(source) = derive_source(url) else {
            warn!(%url, "could not derive a source from the URL");
            return false;
        };

        let Some(article) = self.orchestrator.crawl(url, &source).await else {
            return false;
        };

        let summary = self.summarizer.summarize(&article.content).await;
        if summary.strategy == SummaryStrategy::FallbackTruncated {
            warn!(%url, "provider unavailable, ingesting truncated fallback summary");
        }

        match self.ingest.submit(&article, &summary).await {
            Ok(()) => {
                info!(%url, "ingested");
                true
            }
            Err(err) => {
                error!(%url, error = %err, "ingestion failed");
                false
            }
        }
    }
}

/// Derive the source label from a URL: its host with a leading `www.`
/// stripped. `None` for URLs without a parseable host.
pub fn derive_source(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(host.strip_prefix("www.").unwrap_or(host).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;
    use std::time::Duration;

    use crate::crawler::{
        CrawlError, CrawlerConfig, ExtractedArticle, Extraction, ExtractionStrategy, StrategyKind,
    };
    use crate::gemini::GenerativeClient;
    use crate::retry::RetryPolicy;
    use crate::summarizer::CredentialPool;

    #[test]
    fn test_derive_source_strips_www() {
        assert_eq!(
            derive_source("https://www.example.com/news/1").as_deref(),
            Some("example.com")
        );
    }

    #[test]
    fn test_derive_source_keeps_plain_host() {
        assert_eq!(
            derive_source("https://news.example.org/x").as_deref(),
            Some("news.example.org")
        );
    }

    #[test]
    fn test_derive_source_only_strips_leading_www_prefix() {
        assert_eq!(
            derive_source("https://wwwx.example.com/x").as_deref(),
            Some("wwwx.example.com")
        );
    }

    #[test]
    fn test_derive_source_rejects_unparseable_urls() {
        assert_eq!(derive_source("not a url"), None);
    }

    /// Static double: a full article for a.example, empty elsewhere.
    struct SelectiveStatic;

    #[async_trait]
    impl ExtractionStrategy for SelectiveStatic {
        fn kind(&self) -> StrategyKind {
            StrategyKind::Static
        }

        async fn try_extract(&self, url: &str, source: &str) -> Result<Extraction, CrawlError> {
            if url.contains("a.example") {
                Ok(Extraction::Article(ExtractedArticle {
                    title: "Headline".to_string(),
                    url: url.to_string(),
                    content: "Body text.".to_string(),
                    source: source.to_string(),
                    author: None,
                    published_at: None,
                    image_url: None,
                }))
            } else {
                Ok(Extraction::Empty)
            }
        }
    }

    /// Rendered double that never finds anything either.
    struct AlwaysEmptyRendered;

    #[async_trait]
    impl ExtractionStrategy for AlwaysEmptyRendered {
        fn kind(&self) -> StrategyKind {
            StrategyKind::Rendered
        }

        async fn try_extract(&self, _url: &str, _source: &str) -> Result<Extraction, CrawlError> {
            Ok(Extraction::Empty)
        }
    }

    const SUMMARY_BODY: &str = r#"{
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": "A concise summary."}]}
        }]
    }"#;

    #[tokio::test]
    async fn test_mixed_batch_counts_every_url_once() {
        let mut provider = mockito::Server::new_async().await;
        provider
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(SUMMARY_BODY)
            .create_async()
            .await;

        let mut store = mockito::Server::new_async().await;
        let ingest_mock = store
            .mock("POST", "/articles")
            .match_body(mockito::Matcher::PartialJson(serde_json::json!({
                "source": "a.example",
                "summary": "A concise summary."
            })))
            .with_status(201)
            .expect(1)
            .create_async()
            .await;

        let orchestrator = CrawlOrchestrator::new(
            vec![Box::new(SelectiveStatic), Box::new(AlwaysEmptyRendered)],
            RetryPolicy::new(CrawlerConfig::default().max_retries, Duration::from_millis(1)),
        );
        let pool = Arc::new(CredentialPool::new(vec!["k0".to_string()]).unwrap());
        let summarizer = Summarizer::new(
            GenerativeClient::with_base_url(provider.url()),
            pool,
            "Summarize the following article concisely and naturally:",
        )
        .with_retry_policy(RetryPolicy::new(3, Duration::from_millis(1)));
        let runner = BatchRunner::new(orchestrator, summarizer, IngestClient::new(store.url()));

        let urls = vec![
            "https://a.example/x".to_string(),
            "https://b.example/y".to_string(),
        ];
        let summary = runner.run(&urls).await;

        assert_eq!(summary.success_count, 1);
        assert_eq!(summary.failure_count, 1);
        assert_eq!(summary.success_count + summary.failure_count, urls.len());
        ingest_mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_store_rejection_counts_as_failure() {
        let mut provider = mockito::Server::new_async().await;
        provider
            .mock("POST", "/v1beta/models/gemini-1.5-flash:generateContent")
            .match_query(mockito::Matcher::Any)
            .with_status(200)
            .with_body(SUMMARY_BODY)
            .create_async()
            .await;

        let mut store = mockito::Server::new_async().await;
        store
            .mock("POST", "/articles")
            .with_status(500)
            .create_async()
            .await;

        let orchestrator = CrawlOrchestrator::new(
            vec![Box::new(SelectiveStatic)],
            RetryPolicy::new(3, Duration::from_millis(1)),
        );
        let pool = Arc::new(CredentialPool::new(vec!["k0".to_string()]).unwrap());
        let summarizer = Summarizer::new(
            GenerativeClient::with_base_url(provider.url()),
            pool,
            "Summarize the following article concisely and naturally:",
        )
        .with_retry_policy(RetryPolicy::new(3, Duration::from_millis(1)));
        let runner = BatchRunner::new(orchestrator, summarizer, IngestClient::new(store.url()));

        let urls = vec!["https://a.example/x".to_string()];
        let summary = runner.run(&urls).await;

        assert_eq!(summary.success_count, 0);
        assert_eq!(summary.failure_count, 1);
    }

    #[tokio::test]
    async fn test_unparseable_url_counts_as_failure_without_crawling() {
        let orchestrator = CrawlOrchestrator::new(
            vec![Box::new(SelectiveStatic)],
            RetryPolicy::new(3, Duration::from_millis(1)),
        );
        let pool = Arc::new(CredentialPool::new(vec!["k0".to_string()]).unwrap());
        let summarizer = Summarizer::new(GenerativeClient::new(), pool, "Summarize:");
        let runner = BatchRunner::new(
            orchestrator,
            summarizer,
            IngestClient::new("http://127.0.0.1:1"),
        );

        let urls = vec!["definitely not a url".to_string()];
        let summary = runner.run(&urls).await;

        assert_eq!(summary.success_count, 0);
        assert_eq!(summary.failure_count, 1);
    }
}
