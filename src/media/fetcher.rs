use crate::error::{MediaError, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, info};

#[async_trait]
pub trait ManifestFetcher: Send + Sync {
    /// Human-readable name of the fetcher
    fn name(&self) -> &'static str;

    /// Fetch the body of `url` as text
    async fn fetch_text(&self, url: &str) -> Result<String>;
}

/// Fetches manifests over HTTP. Requests are bounded by the configured
/// timeout and never retried.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()?;

        info!("HTTP fetcher initialized with a {:?} timeout", timeout);

        Ok(Self { client })
    }
}

#[async_trait]
impl ManifestFetcher for HttpFetcher {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch_text(&self, url: &str) -> Result<String> {
        let url = url::Url::parse(url)
            .map_err(|e| MediaError::Schema(format!("invalid manifest URL {}: {}", url, e)))?;

        debug!("Fetching manifest: {}", url);

        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        debug!("Fetched {} bytes of manifest", body.len());
        Ok(body)
    }
}
