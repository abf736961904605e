use thiserror::Error;

/// Errors raised while probing an endpoint
#[derive(Debug, Error)]
pub enum ProbeError {
    /// Connection refused, DNS failure, timeout or a broken body stream
    #[error("{0}")]
    Transport(String),

    /// Response body was not the JSON we expected
    #[error("{0}")]
    Decode(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ProbeError {
    fn from(err: reqwest::Error) -> Self {
        ProbeError::Transport(err.to_string())
    }
}

pub type ProbeResult<T> = std::result::Result<T, ProbeError>;
