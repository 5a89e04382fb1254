use async_trait::async_trait;
use scraper::{Html, Selector};
use tracing::info;
use url::Url;

use serplens_common::{CategoryCount, ReportSection, SerpLensError, TaggedPhrase};
use tagger_client::TaggerClient;

use crate::fetch::PageFetcher;
use crate::report::build_report;

/// POS codes that participate in the report. Everything else the tagger
/// emits is dropped before counting.
pub const VALID_CATEGORIES: [&str; 5] = ["FW", "NN", "NP", "NNP", "DP"];

// --- PhraseTagger trait ---

#[async_trait]
pub trait PhraseTagger: Send + Sync {
    async fn tag_phrases(&self, text: &str) -> Result<Vec<TaggedPhrase>, SerpLensError>;
}

#[async_trait]
impl PhraseTagger for TaggerClient {
    async fn tag_phrases(&self, text: &str) -> Result<Vec<TaggedPhrase>, SerpLensError> {
        let spans = self
            .tag(text)
            .await
            .map_err(|e| SerpLensError::Tagging(e.to_string()))?;
        Ok(spans
            .into_iter()
            .map(|s| TaggedPhrase::new(s.phrase, s.tag))
            .collect())
    }
}

// --- Pure transforms ---

/// Guarantee an `http://` or `https://` prefix, defaulting to https.
pub fn ensure_url_scheme(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    }
}

/// Keyword hints for a page: the declared `<meta name="keywords">` list, or
/// the URL's final path segment (hyphens as spaces) when no tag is present.
/// A bare domain yields no hints.
pub fn extract_keyword_hints(document: &Html, page_url: &str) -> Vec<String> {
    let meta_selector = Selector::parse(r#"meta[name="keywords"]"#).unwrap();
    if let Some(meta) = document.select(&meta_selector).next() {
        let content = meta.value().attr("content").unwrap_or("");
        return content.split(',').map(|k| k.trim().to_string()).collect();
    }

    slug_hint(page_url).map(|hint| vec![hint]).unwrap_or_default()
}

fn slug_hint(page_url: &str) -> Option<String> {
    let parsed = Url::parse(page_url).ok()?;
    let segment = parsed
        .path_segments()
        .and_then(|segments| segments.last())
        .filter(|segment| !segment.is_empty())?;
    Some(segment.replace('-', " "))
}

/// Visible body text with normalized whitespace, space-joined.
pub fn extract_body_text(document: &Html) -> String {
    let body_selector = Selector::parse("body").unwrap();
    let Some(body) = document.select(&body_selector).next() else {
        return String::new();
    };
    body.text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Count tagged phrases into category -> phrase -> occurrences, keeping
/// first-seen order at both levels. Keys are exact strings; the tagger owns
/// any normalization.
pub fn count_phrases(tagged: &[TaggedPhrase]) -> CategoryCount {
    let mut counts = CategoryCount::new();
    for TaggedPhrase { phrase, tag } in tagged {
        if !VALID_CATEGORIES.contains(&tag.as_str()) {
            continue;
        }
        *counts
            .entry(tag.clone())
            .or_default()
            .entry(phrase.clone())
            .or_insert(0) += 1;
    }
    counts
}

// --- Orchestrator ---

/// Analysis pipeline: fetch the page, pull keyword hints and body text, tag
/// the text, count phrases per category, and build the filtered report.
pub async fn analyze_site(
    fetcher: &dyn PageFetcher,
    tagger: &dyn PhraseTagger,
    sitename: &str,
) -> Result<Vec<ReportSection>, SerpLensError> {
    let url = ensure_url_scheme(sitename);
    let html = fetcher.fetch(&url).await?;

    // Html holds non-Send parser state; keep it scoped so the future stays
    // Send across the tagger await.
    let (hints, body_text) = {
        let document = Html::parse_document(&html);
        (
            extract_keyword_hints(&document, &url),
            extract_body_text(&document),
        )
    };

    let tagged = tagger.tag_phrases(&body_text).await?;
    if tagged.is_empty() {
        return Err(SerpLensError::EmptyResult(
            "No taggable text found on the page.".to_string(),
        ));
    }
    info!(url = %url, hints = hints.len(), phrases = tagged.len(), "Tagged page text");

    let counts = count_phrases(&tagged);
    build_report(&counts, &hints)
}
