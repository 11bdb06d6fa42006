//! AI summarization and bias scoring
//!
//! The enrichment stage sits between extraction and ingestion and must
//! tolerate an unreliable, rate-limited provider. Summarization retries
//! with exponential backoff, rotating through the credential pool on every
//! attempt; when the budget is exhausted it degrades to a deterministic
//! truncation of the original content. Bias scoring is single-attempt
//! best-effort with a neutral default. Neither operation ever returns an
//! error to its caller — a provider outage is visible only through the
//! result's strategy tag and the logs.

mod credentials;

pub use credentials::CredentialPool;

use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, instrument, warn};

use crate::gemini::{GenerativeClient, ProviderError};
use crate::retry::RetryPolicy;
use crate::text::clip_chars;

/// Characters of article content included in a summarization prompt
const PROMPT_CONTENT_CHARS: usize = 10_000;

/// Characters of article content included in a bias-scoring prompt
const BIAS_CONTENT_CHARS: usize = 5_000;

/// Characters of the original content kept by the truncation fallback
const FALLBACK_CHARS: usize = 500;

/// How a summary was produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryStrategy {
    /// The provider generated the summary
    AiGenerated,

    /// The provider was unreachable; the summary is truncated content
    FallbackTruncated,
}

/// A produced summary
///
/// `text` is always non-empty for non-empty input: either provider output
/// or the first 500 characters of the content plus an ellipsis marker.
#[derive(Debug, Clone)]
pub struct SummaryResult {
    /// The summary text
    pub text: String,

    /// Whether the provider or the fallback produced it
    pub strategy: SummaryStrategy,

    /// Pool index of the credential that served the request; `None` for
    /// the fallback
    pub key_index: Option<usize>,
}

/// Best-effort bias assessment of article content
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BiasReport {
    /// 0 (neutral) to 10 (extremely biased)
    pub score: u8,

    /// Short explanation of the rating
    pub analysis: String,
}

impl Default for BiasReport {
    fn default() -> Self {
        Self {
            score: 5,
            analysis: "Bias detection unavailable".to_string(),
        }
    }
}

/// Summarization and bias scoring against a rotating credential pool
pub struct Summarizer {
    client: GenerativeClient,
    pool: Arc<CredentialPool>,
    instructions: String,
    summary_model: String,
    bias_model: String,
    retry: RetryPolicy,
}

impl Summarizer {
    /// Create a summarizer over a shared credential pool.
    pub fn new(
        client: GenerativeClient,
        pool: Arc<CredentialPool>,
        instructions: impl Into<String>,
    ) -> Self {
        Self {
            client,
            pool,
            instructions: instructions.into(),
            summary_model: "gemini-1.5-flash".to_string(),
            bias_model: "gemini-1.5-pro".to_string(),
            retry: RetryPolicy::default(),
        }
    }

    /// Override the summarization and bias-scoring models.
    pub fn with_models(mut self, summary_model: &str, bias_model: &str) -> Self {
        self.summary_model = summary_model.to_string();
        self.bias_model = bias_model.to_string();
        self
    }

    /// Override the retry policy (tests use millisecond backoff).
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Summarize `content`, never failing.
    ///
    /// Each attempt takes the next pool credential; the cursor advances
    /// whether or not the call succeeds. Exhausting the attempt budget
    /// yields the truncation fallback rather than an error, so ingestion
    /// is never blocked on the provider.
    #[instrument(skip(self, content))]
    pub async fn summarize(&self, content: &str) -> SummaryResult {
        let prompt = format!(
            "{}\n\n{}",
            self.instructions,
            clip_chars(content, PROMPT_CONTENT_CHARS)
        );

        let outcome = self
            .retry
            .run(
                |_attempt| {
                    let (key_index, api_key) = self.pool.next_key();
                    let prompt = prompt.as_str();
                    async move {
                        let text = self
                            .client
                            .generate(api_key, &self.summary_model, prompt)
                            .await?;
                        Ok::<_, ProviderError>((key_index, text))
                    }
                },
                |_| true,
            )
            .await;

        match outcome {
            Ok((key_index, text)) => {
                info!(key_index, "content summarized");
                SummaryResult {
                    text,
                    strategy: SummaryStrategy::AiGenerated,
                    key_index: Some(key_index),
                }
            }
            Err(err) => {
                warn!(error = %err, "all summarization attempts failed, using truncated content");
                SummaryResult {
                    text: format!("{}...", clip_chars(content, FALLBACK_CHARS)),
                    strategy: SummaryStrategy::FallbackTruncated,
                    key_index: None,
                }
            }
        }
    }

    /// Score `content` for bias on a 0-10 scale.
    ///
    /// A single best-effort attempt; any failure, including an
    /// unparseable response, yields the neutral default.
    #[instrument(skip(self, content))]
    pub async fn detect_bias(&self, content: &str) -> BiasReport {
        let prompt = format!(
            "Analyze the following article for bias. Rate the bias on a scale of 0-10 \
             (0 being completely neutral, 10 being extremely biased). Provide a brief \
             analysis explaining your rating.\n\nArticle:\n{}\n\nRespond in JSON format: \
             {{ \"score\": number, \"analysis\": string }}",
            clip_chars(content, BIAS_CONTENT_CHARS)
        );

        let (key_index, api_key) = self.pool.next_key();
        match self.client.generate(api_key, &self.bias_model, &prompt).await {
            Ok(text) => parse_bias_response(&text).unwrap_or_else(|| {
                warn!("bias response held no parseable JSON");
                BiasReport::default()
            }),
            Err(err) => {
                warn!(key_index, error = %err, "bias detection failed");
                BiasReport::default()
            }
        }
    }
}

/// Extract the JSON object between the outermost braces of a response.
///
/// Models wrap JSON in prose or code fences more often than not.
fn parse_bias_response(text: &str) -> Option<BiasReport> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}
