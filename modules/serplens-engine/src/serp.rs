use chrono::{Local, NaiveDate};
use scraper::{Html, Selector};
use tracing::info;
use url::Url;

use serplens_common::{RankType, RankingRecord, SerpLensError};

use crate::fetch::PageFetcher;

const SEARCH_BASE_URL: &str = "https://www.google.com/search";
const RESULTS_PER_PAGE: &str = "20";
/// Query-param marker the engine appends for click tracking; everything from
/// here on is redirect wrapping, not part of the result URL.
const TRACKING_MARKER: &str = "&ved";

/// Strip redirect wrapping from a raw anchor target.
///
/// Keeps from the first `https://` up to (not including) the tracking
/// marker. Returns `None` when the target carries no https URL at all —
/// those anchors are not organic results.
pub fn clean_url(raw: &str) -> Option<String> {
    let start = raw.find("https://")?;
    let rest = &raw[start..];
    match rest.find(TRACKING_MARKER) {
        Some(end) => Some(rest[..end].to_string()),
        None => Some(rest.to_string()),
    }
}

/// Extract cleaned result URLs from a results page, in listing order.
/// Listing order is rank order.
pub fn extract_result_links(html: &str) -> Result<Vec<String>, SerpLensError> {
    let document = Html::parse_document(html);
    let block_selector = Selector::parse("div.yuRUbf").unwrap();
    let anchor_selector = Selector::parse("a").unwrap();

    let mut urls = Vec::new();
    for block in document.select(&block_selector) {
        let Some(anchor) = block.select(&anchor_selector).next() else {
            continue;
        };
        let href = anchor.value().attr("href").unwrap_or("");
        if let Some(cleaned) = clean_url(href) {
            urls.push(cleaned);
        }
    }

    if urls.is_empty() {
        return Err(SerpLensError::EmptyResult(
            "No URLs found in the search results.".to_string(),
        ));
    }
    Ok(urls)
}

/// Match one tracked domain against the ordered URL list.
///
/// Raw substring containment, by intent: a domain embedded anywhere in the
/// URL string counts, and a domain may match multiple positions.
pub fn rank_check(
    domain: &str,
    urls: &[String],
    keyword: &str,
    rank_type: RankType,
    date: NaiveDate,
) -> Vec<RankingRecord> {
    urls.iter()
        .enumerate()
        .filter(|(_, url)| url.contains(domain))
        .map(|(idx, url)| RankingRecord {
            keyword: keyword.to_string(),
            rank: (idx + 1) as u32,
            url: url.clone(),
            date,
            rank_type,
        })
        .collect()
}

fn build_search_url(keyword: &str) -> String {
    Url::parse_with_params(SEARCH_BASE_URL, &[("num", RESULTS_PER_PAGE), ("q", keyword)])
        .expect("Search base URL is valid")
        .to_string()
}

/// Rank pipeline: fetch the results page for `keyword`, then match the site
/// and each competitor against the listing. Combined records are stably
/// sorted by rank; site records keep priority over competitors on ties.
pub async fn get_rankings(
    fetcher: &dyn PageFetcher,
    keyword: &str,
    sitename: &str,
    competitors: &[String],
) -> Result<Vec<RankingRecord>, SerpLensError> {
    let search_url = build_search_url(keyword);
    let html = fetcher.fetch(&search_url).await?;
    let urls = extract_result_links(&html)?;
    info!(keyword, links = urls.len(), "Extracted result links");

    let today = Local::now().date_naive();
    let mut rankings = rank_check(sitename, &urls, keyword, RankType::Site, today);
    for competitor in competitors {
        rankings.extend(rank_check(
            competitor,
            &urls,
            keyword,
            RankType::Competitor,
            today,
        ));
    }

    if rankings.is_empty() {
        return Err(SerpLensError::EmptyResult(
            "No rankings found. Please check your input and try again.".to_string(),
        ));
    }

    rankings.sort_by_key(|r| r.rank);
    Ok(rankings)
}
