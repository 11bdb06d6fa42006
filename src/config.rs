//! Environment configuration for the ingestion pipeline
//!
//! All knobs are plain environment variables so the batch runner can be
//! driven from a scheduler without a config file. Every optional value has
//! a default; an empty credential pool is a startup error rather than a
//! silent no-op.

use crate::error::{Error, Result};

/// Default instruction template prepended to summarization prompts
pub const DEFAULT_INSTRUCTIONS: &str =
    "Summarize the following article concisely and naturally:";

const DEFAULT_PROVIDER_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_SUMMARY_MODEL: &str = "gemini-1.5-flash";
const DEFAULT_BIAS_MODEL: &str = "gemini-1.5-pro";
const DEFAULT_INGEST_BASE: &str = "http://localhost:5000/api";

/// Environment variables holding provider credentials, in rotation order
const KEY_VARS: [&str; 4] = [
    "GEMINI_API_KEY",
    "GEMINI_API_KEY1",
    "GEMINI_API_KEY2",
    "GEMINI_API_KEY3",
];

/// Runtime configuration assembled from the environment
#[derive(Debug, Clone)]
pub struct Config {
    /// Seed URLs for the batch runner (`CRAWL_URLS`, comma-separated)
    pub seed_urls: Vec<String>,

    /// Provider credential pool, in rotation order (`GEMINI_API_KEY`..`GEMINI_API_KEY3`)
    pub api_keys: Vec<String>,

    /// Instruction template for summarization prompts (`AI_INSTRUCTIONS`)
    pub instructions: String,

    /// Base endpoint of the generative-AI provider (`GEMINI_API_BASE`)
    pub provider_base_url: String,

    /// Model used for summarization (`GEMINI_SUMMARY_MODEL`)
    pub summary_model: String,

    /// Model used for bias scoring (`GEMINI_BIAS_MODEL`)
    pub bias_model: String,

    /// Base URL of the ingestion collaborator (`CURATOR_API_URL`)
    pub ingest_base_url: String,
}

impl Config {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// Tests pass a map-backed closure so they never mutate the process
    /// environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let seed_urls = lookup("CRAWL_URLS")
            .map(|value| split_csv(&value))
            .unwrap_or_default();

        let api_keys: Vec<String> = KEY_VARS
            .into_iter()
            .filter_map(|name| lookup(name))
            .filter(|key| !key.trim().is_empty())
            .collect();

        if api_keys.is_empty() {
            return Err(Error::Config(
                "no provider credentials configured; set GEMINI_API_KEY".to_string(),
            ));
        }

        Ok(Self {
            seed_urls,
            api_keys,
            instructions: lookup("AI_INSTRUCTIONS")
                .unwrap_or_else(|| DEFAULT_INSTRUCTIONS.to_string()),
            provider_base_url: lookup("GEMINI_API_BASE")
                .unwrap_or_else(|| DEFAULT_PROVIDER_BASE.to_string()),
            summary_model: lookup("GEMINI_SUMMARY_MODEL")
                .unwrap_or_else(|| DEFAULT_SUMMARY_MODEL.to_string()),
            bias_model: lookup("GEMINI_BIAS_MODEL")
                .unwrap_or_else(|| DEFAULT_BIAS_MODEL.to_string()),
            ingest_base_url: lookup("CURATOR_API_URL")
                .unwrap_or_else(|| DEFAULT_INGEST_BASE.to_string()),
        })
    }
}

fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(vars: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = vars.iter().copied().collect();
        move |name| map.get(name).map(|value| value.to_string())
    }

    #[test]
    fn test_defaults_applied() {
        let config = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "key-a")])).unwrap();

        assert!(config.seed_urls.is_empty());
        assert_eq!(config.api_keys, vec!["key-a"]);
        assert_eq!(config.instructions, DEFAULT_INSTRUCTIONS);
        assert_eq!(config.provider_base_url, DEFAULT_PROVIDER_BASE);
        assert_eq!(config.summary_model, "gemini-1.5-flash");
        assert_eq!(config.bias_model, "gemini-1.5-pro");
        assert_eq!(config.ingest_base_url, DEFAULT_INGEST_BASE);
    }

    #[test]
    fn test_seed_urls_split_and_trimmed() {
        let config = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "key-a"),
            (
                "CRAWL_URLS",
                "https://a.example/x, https://b.example/y ,,https://c.example/z",
            ),
        ]))
        .unwrap();

        assert_eq!(
            config.seed_urls,
            vec![
                "https://a.example/x",
                "https://b.example/y",
                "https://c.example/z"
            ]
        );
    }

    #[test]
    fn test_credential_pool_preserves_order() {
        let config = Config::from_lookup(lookup_from(&[
            ("GEMINI_API_KEY", "key-a"),
            ("GEMINI_API_KEY1", "key-b"),
            ("GEMINI_API_KEY3", "key-d"),
        ]))
        .unwrap();

        assert_eq!(config.api_keys, vec!["key-a", "key-b", "key-d"]);
    }

    #[test]
    fn test_empty_credential_pool_is_an_error() {
        let result = Config::from_lookup(lookup_from(&[("GEMINI_API_KEY", "  ")]));
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
