//! Crawl orchestration
//!
//! Runs the ordered strategy list under a bounded retry budget. Within one
//! outer attempt the first strategy to produce a non-empty article wins and
//! later strategies are never invoked; when every strategy fails or comes
//! back empty, the whole attempt sleeps through exponential backoff and
//! starts over with the cheap strategy first — sites are sometimes
//! transiently down rather than structurally dynamic.

use std::time::Duration;

use tracing::{debug, info, instrument, warn};

use super::error::CrawlError;
use super::{
    AttemptOutcome, CrawlAttempt, CrawlerConfig, ExtractedArticle, Extraction,
    ExtractionStrategy, RenderedStrategy, StaticStrategy,
};
use crate::retry::RetryPolicy;

/// Tries extraction strategies in order with bounded retry
pub struct CrawlOrchestrator {
    strategies: Vec<Box<dyn ExtractionStrategy>>,
    retry: RetryPolicy,
}

impl CrawlOrchestrator {
    /// Create an orchestrator over an ordered strategy list.
    pub fn new(strategies: Vec<Box<dyn ExtractionStrategy>>, retry: RetryPolicy) -> Self {
        Self { strategies, retry }
    }

    /// Static-then-rendered strategies with the given configuration.
    pub fn from_config(config: &CrawlerConfig) -> Self {
        let strategies: Vec<Box<dyn ExtractionStrategy>> = vec![
            Box::new(StaticStrategy::new(config)),
            Box::new(RenderedStrategy::new(config)),
        ];
        Self::new(
            strategies,
            RetryPolicy::new(config.max_retries, Duration::from_secs(1)),
        )
    }

    /// Static-then-rendered strategies with default configuration.
    pub fn with_default_strategies() -> Self {
        Self::from_config(&CrawlerConfig::default())
    }

    /// Crawl `url`, returning the first complete article any strategy
    /// produces, or `None` once the retry budget is exhausted.
    ///
    /// Exhaustion is a definitive per-URL outcome, not an error: nothing
    /// escapes this boundary, the caller only counts it.
    #[instrument(skip(self))]
    pub async fn crawl(&self, url: &str, source: &str) -> Option<ExtractedArticle> {
        let outcome = self
            .retry
            .run(|attempt| self.run_attempt(url, source, attempt), |_| true)
            .await;

        match outcome {
            Ok(article) => Some(article),
            Err(err) => {
                warn!(%url, error = %err, "all crawl attempts failed");
                None
            }
        }
    }

    /// One outer attempt: each strategy in order, first non-empty article wins.
    async fn run_attempt(
        &self,
        url: &str,
        source: &str,
        attempt: u32,
    ) -> Result<ExtractedArticle, CrawlError> {
        let mut last_error = None;

        for strategy in &self.strategies {
            match strategy.try_extract(url, source).await {
                Ok(Extraction::Article(article)) => {
                    let record = CrawlAttempt {
                        url,
                        strategy: strategy.kind(),
                        attempt,
                        outcome: AttemptOutcome::Success,
                    };
                    debug!(?record, "extraction succeeded");
                    info!(%url, strategy = %strategy.kind(), "extracted article");
                    return Ok(article);
                }
                Ok(Extraction::Empty) => {
                    let record = CrawlAttempt {
                        url,
                        strategy: strategy.kind(),
                        attempt,
                        outcome: AttemptOutcome::Empty,
                    };
                    debug!(?record, "extraction empty, trying next strategy");
                }
                Err(err) => {
                    let record = CrawlAttempt {
                        url,
                        strategy: strategy.kind(),
                        attempt,
                        outcome: AttemptOutcome::Error(err.to_string()),
                    };
                    debug!(?record, "extraction failed, trying next strategy");
                    last_error = Some(err);
                }
            }
        }

        Err(last_error.unwrap_or(CrawlError::EmptyExtraction))
    }
}
