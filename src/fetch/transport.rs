use async_trait::async_trait;
use reqwest::Client;

use super::error::FetchError;

/// Raw response handed back by a [`Transport`].
///
/// The status is not interpreted here: a 404 is a perfectly good
/// transport-level response and it is up to the caller to reject it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Network boundary consumed by the fetcher.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue a GET against `url`.
    ///
    /// Only failures that prevent a response from existing are errors;
    /// any status code the server sends comes back as `Ok`.
    async fn get(&self, url: &str) -> Result<TransportResponse, FetchError>;
}

/// [`Transport`] backed by a shared `reqwest` client.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(concat!("blogdash/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str) -> Result<TransportResponse, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::Transport {
                url: url.to_string(),
                message: format!("Failed to read response body: {}", e),
            })?;

        Ok(TransportResponse::new(status, body.to_vec()))
    }
}
