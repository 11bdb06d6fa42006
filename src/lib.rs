//! # Curator - Article Ingestion Pipeline
//!
//! This crate turns arbitrary URLs into clean, summarized article records.
//! It combines a dual-strategy content crawler with an AI enrichment stage
//! that tolerates an unreliable, rate-limited provider.
//!
//! ## Features
//!
//! - Static extraction via HTTP fetch and DOM selectors
//! - Rendered extraction via headless Chromium for JavaScript-heavy sites
//! - Orchestrated strategy fallback with bounded exponential-backoff retry
//! - AI summarization with round-robin credential rotation and a
//!   deterministic truncation fallback
//! - Best-effort bias scoring with a neutral default
//! - Sequential batch ingestion with per-URL failure containment
//! - Async API with Tokio
//! - Structured logging with tracing
//!
//! ## Example
//!
//! ```rust,no_run
//! use curator::crawler::CrawlOrchestrator;
//!
//! #[tokio::main]
//! async fn main() {
//!     let orchestrator = CrawlOrchestrator::with_default_strategies();
//!     if let Some(article) = orchestrator
//!         .crawl("https://example.com/news/1", "example.com")
//!         .await
//!     {
//!         println!("{}: {} chars", article.title, article.content.len());
//!     }
//! }
//! ```

mod error;
mod text;

pub mod batch;
pub mod config;
pub mod crawler;
pub mod gemini;
pub mod ingest;
pub mod retry;
pub mod summarizer;

pub use error::Error;

/// Re-export of common types for public use
pub mod prelude {
    pub use crate::error::Error;
    pub use crate::error::Result;
}
