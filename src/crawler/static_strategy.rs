//! Static extraction strategy
//!
//! Plain HTTP fetch plus DOM selectors. Fast and cheap; the first thing
//! the orchestrator tries on every attempt. Network failures and non-2xx
//! statuses propagate so the orchestrator can make its own retry/fallback
//! decision.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::content::resolve_article;
use super::error::CrawlError;
use super::{CrawlerConfig, Extraction, ExtractionStrategy, StrategyKind};

/// Fetch-and-parse extraction without script execution
pub struct StaticStrategy {
    client: Client,
}

impl StaticStrategy {
    /// Create a strategy with the configured timeout and user agent.
    pub fn new(config: &CrawlerConfig) -> Self {
        let client = Client::builder()
            .timeout(config.fetch_timeout())
            .user_agent(config.user_agent.as_str())
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

impl Default for StaticStrategy {
    fn default() -> Self {
        Self::new(&CrawlerConfig::default())
    }
}

#[async_trait]
impl ExtractionStrategy for StaticStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Static
    }

    async fn try_extract(&self, url: &str, source: &str) -> Result<Extraction, CrawlError> {
        debug!(%url, "fetching page");
        let response = self.client.get(url).send().await?.error_for_status()?;
        let body = response.text().await?;

        resolve_article(&body, url, source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTICLE_HTML: &str = r#"
        <html>
          <head><title>Doc Title</title></head>
          <body><h1>Headline</h1><article>Story body.</article></body>
        </html>"#;

    #[tokio::test]
    async fn test_extracts_article_from_response() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/news/1")
            .with_status(200)
            .with_header("content-type", "text/html")
            .with_body(ARTICLE_HTML)
            .expect(1)
            .create_async()
            .await;

        let strategy = StaticStrategy::default();
        let url = format!("{}/news/1", server.url());
        let extraction = strategy.try_extract(&url, "example.com").await.unwrap();

        let Extraction::Article(article) = extraction else {
            panic!("expected an article");
        };
        assert_eq!(article.title, "Headline");
        assert_eq!(article.content, "Story body.");
        assert_eq!(article.url, url);
        assert_eq!(article.source, "example.com");

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_blank_page_yields_empty_not_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/blank")
            .with_status(200)
            .with_body("<html><head><title> </title></head><body>  </body></html>")
            .create_async()
            .await;

        let strategy = StaticStrategy::default();
        let url = format!("{}/blank", server.url());
        let extraction = strategy.try_extract(&url, "example.com").await.unwrap();

        assert!(matches!(extraction, Extraction::Empty));
    }

    #[tokio::test]
    async fn test_non_2xx_status_is_a_network_error() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/gone")
            .with_status(503)
            .create_async()
            .await;

        let strategy = StaticStrategy::default();
        let url = format!("{}/gone", server.url());
        let result = strategy.try_extract(&url, "example.com").await;

        assert!(matches!(result, Err(CrawlError::Network(_))));
    }

    #[tokio::test]
    async fn test_connection_failure_is_a_network_error() {
        let strategy = StaticStrategy::default();
        // port 1 is never listening
        let result = strategy
            .try_extract("http://127.0.0.1:1/", "example.com")
            .await;

        assert!(matches!(result, Err(CrawlError::Network(_))));
    }
}
