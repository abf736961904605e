use crate::error::ProbeResult;
use async_trait::async_trait;

/// What a check gets to look at after a GET completes
#[derive(Debug, Clone, PartialEq)]
pub struct ProbeResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw `content-type` header, empty when the server sent none
    pub content_type: String,
    /// Response body decoded as text
    pub body: String,
}

impl ProbeResponse {
    pub fn new(status: u16, content_type: &str, body: &str) -> Self {
        Self {
            status,
            content_type: content_type.to_string(),
            body: body.to_string(),
        }
    }

    /// Parse the body as JSON
    pub fn json(&self) -> ProbeResult<serde_json::Value> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Transport interface used by the runner
///
/// Abstracts the HTTP client so checks can be driven against a real server
/// or an in-memory fake.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET against an absolute URL
    ///
    /// Only transport failures are errors; any HTTP status is a response.
    async fn get(&self, url: &str) -> ProbeResult<ProbeResponse>;
}
