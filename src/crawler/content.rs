//! DOM field resolution shared by both extraction strategies
//!
//! Both strategies end up holding an HTML document — the static one from a
//! plain fetch, the rendered one from the live browser DOM — and resolve
//! the same fields in the same priority order: title from the first `<h1>`
//! falling back to `<title>`; body text from `<article>` falling back to
//! `<main>` falling back to `<body>`; lead image from the Open Graph meta
//! tag falling back to the first `<img>`.

use chrono::{DateTime, Utc};
use scraper::{Html, Selector};

use super::error::CrawlError;
use super::{Extraction, ExtractedArticle, MAX_CONTENT_CHARS};
use crate::text::{clip_chars, squash_whitespace};

/// Resolve an article from an HTML document.
///
/// Returns [`Extraction::Empty`] when no non-empty title/content pair can
/// be resolved; a partial record is never produced.
pub(crate) fn resolve_article(
    html: &str,
    url: &str,
    source: &str,
) -> Result<Extraction, CrawlError> {
    let document = Html::parse_document(html);

    let title = match first_text(&document, "h1")?.or(first_text(&document, "title")?) {
        Some(title) => title,
        None => return Ok(Extraction::Empty),
    };

    let content = match first_text(&document, "article")?
        .or(first_text(&document, "main")?)
        .or(first_text(&document, "body")?)
    {
        Some(content) => content,
        None => return Ok(Extraction::Empty),
    };

    Ok(Extraction::Article(ExtractedArticle {
        title,
        url: url.to_string(),
        content: clip_chars(&content, MAX_CONTENT_CHARS).to_string(),
        source: source.to_string(),
        author: first_attr(&document, "meta[name=\"author\"]", "content")?,
        published_at: published_at(&document)?,
        image_url: image_url(&document)?,
    }))
}

/// Text of the first element matching `selector`, whitespace-squashed;
/// `None` when absent or blank.
fn first_text(document: &Html, selector: &str) -> Result<Option<String>, CrawlError> {
    Ok(document
        .select(&parse_selector(selector)?)
        .next()
        .map(|element| squash_whitespace(&element.text().collect::<String>()))
        .filter(|text| !text.is_empty()))
}

fn first_attr(
    document: &Html,
    selector: &str,
    attr: &str,
) -> Result<Option<String>, CrawlError> {
    Ok(document
        .select(&parse_selector(selector)?)
        .next()
        .and_then(|element| element.value().attr(attr))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(String::from))
}

fn image_url(document: &Html) -> Result<Option<String>, CrawlError> {
    if let Some(og) = first_attr(document, "meta[property=\"og:image\"]", "content")? {
        return Ok(Some(og));
    }
    first_attr(document, "img", "src")
}

fn published_at(document: &Html) -> Result<Option<DateTime<Utc>>, CrawlError> {
    Ok(
        first_attr(document, "meta[property=\"article:published_time\"]", "content")?
            .and_then(|value| DateTime::parse_from_rfc3339(&value).ok())
            .map(|parsed| parsed.with_timezone(&Utc)),
    )
}

fn parse_selector(selector: &str) -> Result<Selector, CrawlError> {
    Selector::parse(selector)
        .map_err(|e| CrawlError::HtmlParse(format!("failed to parse selector '{selector}': {e}")))
}
