use thiserror::Error;

pub type Result<T> = std::result::Result<T, TaggerError>;

#[derive(Debug, Error)]
pub enum TaggerError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed tagger response: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for TaggerError {
    fn from(err: reqwest::Error) -> Self {
        TaggerError::Network(err.to_string())
    }
}
