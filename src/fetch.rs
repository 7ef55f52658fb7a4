use std::time::Duration;

use reqwest::blocking::Client;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected status {status} for {url}")]
    Status { status: u16, url: String },

    #[error("offline mode, network fetch skipped")]
    Offline,
}

/// Source of raw snippet text
pub trait SnippetFetcher: Send + Sync + 'static {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Production fetcher over HTTPS
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> crate::error::Result<Self> {
        let client = Client::builder()
            .connect_timeout(timeout.min(Duration::from_secs(5)))
            .timeout(timeout)
            .user_agent(concat!("codesprint/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }
}

impl SnippetFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        Ok(response.text()?)
    }
}

/// Fetcher that never touches the network
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineFetcher;

impl SnippetFetcher for OfflineFetcher {
    fn fetch(&self, _url: &str) -> Result<String, FetchError> {
        Err(FetchError::Offline)
    }
}
