use std::time::Duration;

use async_trait::async_trait;

use serplens_common::SerpLensError;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/100.0.4896.127 Safari/537.36";
const ACCEPT: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8";
const ACCEPT_LANGUAGE: &str = "en-US,en;q=0.5";

// --- PageFetcher trait ---

#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, SerpLensError>;
}

// --- Plain HTTP fetcher ---

/// Fetches pages with a browser-like header set. Search engines and many
/// sites serve bot-default markup (or a 403) to the reqwest default UA.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String, SerpLensError> {
        let resp = self
            .client
            .get(url)
            .header("User-Agent", USER_AGENT)
            .header("Accept", ACCEPT)
            .header("Accept-Language", ACCEPT_LANGUAGE)
            .header("Referer", url)
            .send()
            .await
            .map_err(|e| SerpLensError::Transport(e.to_string()))?;

        let status = resp.status();
        if status.as_u16() == 429 {
            return Err(SerpLensError::RateLimited);
        }
        if !status.is_success() {
            return Err(SerpLensError::Transport(format!(
                "Failed to retrieve data, status code: {}",
                status.as_u16()
            )));
        }

        resp.text()
            .await
            .map_err(|e| SerpLensError::Transport(e.to_string()))
    }
}
