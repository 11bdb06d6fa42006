//! Rendered extraction strategy
//!
//! Drives a headless Chromium to fully render JavaScript-heavy pages and
//! resolves the same fields from the live DOM. Each invocation launches
//! its own browser and tears it down on every exit path; the handle is
//! never shared or reused across URLs. Significantly more expensive than
//! the static strategy, so the orchestrator only reaches for it when the
//! static pass failed or came back empty.

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::content::resolve_article;
use super::error::CrawlError;
use super::{CrawlerConfig, Extraction, ExtractionStrategy, StrategyKind};

/// Interval between DOM-settle polls after the load event
const SETTLE_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Maximum number of settle polls before taking the DOM as-is
const SETTLE_MAX_POLLS: u32 = 8;

/// Headless-browser extraction for JavaScript-rendered pages
pub struct RenderedStrategy {
    render_timeout: Duration,
    user_agent: String,
}

impl RenderedStrategy {
    /// Create a strategy with the configured page-load budget and user agent.
    pub fn new(config: &CrawlerConfig) -> Self {
        Self {
            render_timeout: config.render_timeout(),
            user_agent: config.user_agent.clone(),
        }
    }

    async fn launch(&self) -> Result<(Browser, JoinHandle<()>), CrawlError> {
        let browser_config = BrowserConfig::builder()
            .request_timeout(self.render_timeout)
            .arg(format!("--user-agent={}", self.user_agent))
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--mute-audio")
            .build()
            .map_err(CrawlError::Browser)?;

        let (browser, mut handler) = Browser::launch(browser_config)
            .await
            .map_err(|e| CrawlError::Browser(e.to_string()))?;

        // The handler stream must be drained for the browser connection to
        // make progress; it is aborted during teardown.
        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(err) = event {
                    debug!("browser handler event error: {err}");
                }
            }
        });

        Ok((browser, events))
    }

    async fn render(&self, browser: &Browser, url: &str, source: &str) -> Result<Extraction, CrawlError> {
        let page = browser
            .new_page(url)
            .await
            .map_err(|e| CrawlError::Render(e.to_string()))?;

        page.wait_for_navigation()
            .await
            .map_err(|e| CrawlError::Render(e.to_string()))?;

        let html = settled_content(&page).await?;
        resolve_article(&html, url, source)
    }
}

impl Default for RenderedStrategy {
    fn default() -> Self {
        Self::new(&CrawlerConfig::default())
    }
}

#[async_trait]
impl ExtractionStrategy for RenderedStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Rendered
    }

    async fn try_extract(&self, url: &str, source: &str) -> Result<Extraction, CrawlError> {
        debug!(%url, "rendering page");
        let (mut browser, events) = self.launch().await?;

        let result = match tokio::time::timeout(
            self.render_timeout,
            self.render(&browser, url, source),
        )
        .await
        {
            Ok(extraction) => extraction,
            Err(_) => Err(CrawlError::Timeout(self.render_timeout)),
        };

        // Teardown runs on every path, success or failure, before the
        // result propagates.
        if let Err(err) = browser.close().await {
            warn!("failed to close browser: {err}");
        }
        let _ = browser.wait().await;
        events.abort();

        result
    }
}

/// Read the page DOM, polling until its size stops changing.
///
/// The load event fires before client-side rendering finishes on many
/// sites; a short settle loop captures late-arriving content without
/// waiting out the whole render budget.
async fn settled_content(page: &Page) -> Result<String, CrawlError> {
    let mut html = page
        .content()
        .await
        .map_err(|e| CrawlError::Render(e.to_string()))?;

    for _ in 0..SETTLE_MAX_POLLS {
        tokio::time::sleep(SETTLE_POLL_INTERVAL).await;
        let next = page
            .content()
            .await
            .map_err(|e| CrawlError::Render(e.to_string()))?;

        if next.len() == html.len() {
            return Ok(next);
        }
        html = next;
    }

    Ok(html)
}
