use thiserror::Error;

#[derive(Error, Debug)]
pub enum SerpLensError {
    #[error("Upstream request failed: {0}")]
    Transport(String),

    #[error("Rate limit hit, status code 429. Blocked by upstream search engine.")]
    RateLimited,

    #[error("{0}")]
    EmptyResult(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Tagger error: {0}")]
    Tagging(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}
