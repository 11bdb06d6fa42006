//! Crawler configuration
//!
//! Timeouts, retry budget, and the identifying user agent for both
//! extraction strategies. Uses a builder pattern for flexible configuration.

use std::time::Duration;

/// Identifying user agent sent on every fetch and render
pub const USER_AGENT: &str = "Mozilla/5.0 (compatible; ContentCurator/1.0)";

/// Configuration for the crawler
#[derive(Debug, Clone)]
pub struct CrawlerConfig {
    /// Timeout for a static HTTP fetch, in seconds
    pub fetch_timeout_secs: u64,

    /// Overall budget for a rendered page load, in seconds
    pub render_timeout_secs: u64,

    /// Number of outer crawl attempts before giving up on a URL
    pub max_retries: u32,

    /// User agent to use for requests
    pub user_agent: String,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            fetch_timeout_secs: 15,
            render_timeout_secs: 30,
            max_retries: 3,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

impl CrawlerConfig {
    /// Create a new builder
    pub fn builder() -> CrawlerConfigBuilder {
        CrawlerConfigBuilder::new()
    }

    /// Static fetch timeout as a Duration
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    /// Rendered page-load budget as a Duration
    pub fn render_timeout(&self) -> Duration {
        Duration::from_secs(self.render_timeout_secs)
    }
}

/// Builder for CrawlerConfig
#[derive(Debug, Default)]
pub struct CrawlerConfigBuilder {
    config: CrawlerConfig,
}

impl CrawlerConfigBuilder {
    /// Create a new builder with default configuration
    pub fn new() -> Self {
        Self {
            config: CrawlerConfig::default(),
        }
    }

    /// Set the static fetch timeout in seconds
    pub fn fetch_timeout_secs(mut self, secs: u64) -> Self {
        self.config.fetch_timeout_secs = secs;
        self
    }

    /// Set the rendered page-load budget in seconds
    pub fn render_timeout_secs(mut self, secs: u64) -> Self {
        self.config.render_timeout_secs = secs;
        self
    }

    /// Set the number of outer crawl attempts
    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.config.max_retries = max_retries;
        self
    }

    /// Set the user agent to use for requests
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config.user_agent = user_agent.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> CrawlerConfig {
        self.config
    }
}
