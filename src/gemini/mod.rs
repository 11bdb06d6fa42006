//! Minimal Gemini API client
//!
//! The pipeline needs exactly one provider operation: text-in, text-out
//! `generateContent`. This module provides the wire types and a single-shot
//! HTTP client for it. Retry and credential rotation are deliberately not
//! handled here; they belong to the summarizer, which owns the attempt
//! budget and the credential pool.

mod client;
mod error;
mod types;

pub use client::GenerativeClient;
pub use error::ProviderError;
pub use types::{Candidate, Content, GenerateContentResponse, Part};
