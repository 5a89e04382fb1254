pub mod error;

pub use error::{Result, TaggerError};

use std::time::Duration;

use serde::Deserialize;

/// A phrase/tag pair as returned by the tagger service.
#[derive(Debug, Clone, Deserialize)]
pub struct TaggedSpan {
    pub phrase: String,
    pub tag: String,
}

#[derive(Debug, Deserialize)]
struct TagResponse {
    phrases: Vec<TaggedSpan>,
}

/// Client for the external part-of-speech tagger service.
///
/// The service takes raw text and returns phrase-level spans, each labeled
/// with a POS code (NN, NP, NNP, FW, DP, ...).
pub struct TaggerClient {
    client: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl TaggerClient {
    pub fn new(base_url: &str, token: Option<&str>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.map(String::from),
        }
    }

    /// Tag a block of text, returning phrase spans in document order.
    pub async fn tag(&self, text: &str) -> Result<Vec<TaggedSpan>> {
        let mut endpoint = format!("{}/tag", self.base_url);
        if let Some(ref token) = self.token {
            endpoint.push_str(&format!("?token={token}"));
        }

        let body = serde_json::json!({ "text": text });

        let resp = self
            .client
            .post(&endpoint)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(TaggerError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let text = resp.text().await?;
        parse_tag_response(&text)
    }
}

fn parse_tag_response(body: &str) -> Result<Vec<TaggedSpan>> {
    let parsed: TagResponse =
        serde_json::from_str(body).map_err(|e| TaggerError::Decode(e.to_string()))?;
    Ok(parsed.phrases)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_phrase_spans() {
        let body = r#"{"phrases": [
            {"phrase": "machine learning", "tag": "NP"},
            {"phrase": "data", "tag": "NN"}
        ]}"#;
        let spans = parse_tag_response(body).unwrap();
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0].phrase, "machine learning");
        assert_eq!(spans[0].tag, "NP");
    }

    #[test]
    fn rejects_malformed_body() {
        let err = parse_tag_response("not json").unwrap_err();
        assert!(matches!(err, TaggerError::Decode(_)));
    }
}
