//! Article crawler module
//!
//! This module turns a URL into a clean [`ExtractedArticle`]. Two
//! extraction strategies share one contract: a cheap static fetch-and-parse
//! and an expensive headless-browser render for JavaScript-heavy pages.
//! The [`CrawlOrchestrator`] tries them in order with bounded retry.

mod config;
mod content;
mod error;
mod orchestrator;
mod rendered_strategy;
mod static_strategy;

pub use config::CrawlerConfig;
pub use error::CrawlError;
pub use orchestrator::CrawlOrchestrator;
pub use rendered_strategy::RenderedStrategy;
pub use static_strategy::StaticStrategy;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum number of characters of body text kept per article
pub const MAX_CONTENT_CHARS: usize = 20_000;

/// A fully extracted article, ready for enrichment and ingestion
///
/// Both `title` and `content` are guaranteed non-empty; a strategy that
/// cannot produce both reports [`Extraction::Empty`] instead of a partial
/// record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedArticle {
    /// Article headline
    pub title: String,

    /// Absolute URL the article was extracted from
    pub url: String,

    /// Plain-text body, clipped to [`MAX_CONTENT_CHARS`]
    pub content: String,

    /// Publisher label, derived from the URL host
    pub source: String,

    /// Author, when the page declares one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,

    /// Publication timestamp, when the page declares one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_at: Option<DateTime<Utc>>,

    /// Lead image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Result of one strategy invocation
///
/// `Empty` is a value, not an error: the page answered but held no usable
/// title/content pair, which tells the orchestrator to fall back to the
/// next strategy rather than retry this one.
#[derive(Debug, Clone)]
pub enum Extraction {
    /// A complete article
    Article(ExtractedArticle),

    /// Structurally valid response with no usable title or content
    Empty,
}

/// Which extraction strategy produced an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    /// HTTP fetch plus DOM selectors, no script execution
    Static,

    /// Headless-browser render of the live DOM
    Rendered,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StrategyKind::Static => write!(f, "static"),
            StrategyKind::Rendered => write!(f, "rendered"),
        }
    }
}

/// One attempted extraction, recorded for logging and backoff decisions only
#[derive(Debug)]
pub struct CrawlAttempt<'a> {
    /// URL being crawled
    pub url: &'a str,

    /// Strategy that ran
    pub strategy: StrategyKind,

    /// 0-based outer attempt index
    pub attempt: u32,

    /// What the strategy produced
    pub outcome: AttemptOutcome,
}

/// Outcome classification for a [`CrawlAttempt`]
#[derive(Debug)]
pub enum AttemptOutcome {
    /// A complete article was produced
    Success,

    /// The strategy returned [`Extraction::Empty`]
    Empty,

    /// The strategy failed with an error
    Error(String),
}

/// A single method of extracting an article from a URL
///
/// Implementations must be self-contained: any resource they acquire
/// (connections, browser processes) is released before returning.
#[async_trait]
pub trait ExtractionStrategy: Send + Sync {
    /// Which strategy this is, for attempt records and logs
    fn kind(&self) -> StrategyKind;

    /// Attempt to extract an article from `url`, labeling it with `source`.
    async fn try_extract(&self, url: &str, source: &str) -> Result<Extraction, CrawlError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_article_serializes_camel_case() {
        let article = ExtractedArticle {
            title: "Title".to_string(),
            url: "https://example.com/a".to_string(),
            content: "Body".to_string(),
            source: "example.com".to_string(),
            author: None,
            published_at: None,
            image_url: Some("https://example.com/a.png".to_string()),
        };

        let json = serde_json::to_value(&article).unwrap();
        assert_eq!(json["imageUrl"], "https://example.com/a.png");
        assert!(json.get("author").is_none());
        assert!(json.get("publishedAt").is_none());
        assert!(json.get("image_url").is_none());
    }

    #[test]
    fn test_strategy_kind_display() {
        assert_eq!(StrategyKind::Static.to_string(), "static");
        assert_eq!(StrategyKind::Rendered.to_string(), "rendered");
    }
}
