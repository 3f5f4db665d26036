// HTTP asset fetcher backed by reqwest

use async_trait::async_trait;
use std::time::Duration;

use crate::bundler::errors::BundleError;
use crate::bundler::traits::AssetFetcher;

/// Fetches assets with a plain GET. No retries: one failure per asset
/// is reported to the orchestrator, which decides whether the batch
/// continues.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new() -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|e| {
                eprintln!("[HttpFetcher] Failed to build client ({}), using defaults", e);
                reqwest::Client::new()
            });
        Self { client }
    }

    /// Inject a preconfigured client (proxy, custom timeouts, tests).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for HttpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AssetFetcher for HttpFetcher {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn fetch(&self, url: &str) -> Result<Vec<u8>, BundleError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| {
                eprintln!("[HttpFetcher] Request failed for {}: {}", url, e);
                BundleError::Fetch {
                    url: url.to_string(),
                    status: e.status().map(|s| s.as_u16()),
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            eprintln!("[HttpFetcher] {} returned HTTP {}", url, status.as_u16());
            return Err(BundleError::Fetch {
                url: url.to_string(),
                status: Some(status.as_u16()),
            });
        }

        let bytes = response.bytes().await.map_err(|_| BundleError::Fetch {
            url: url.to_string(),
            status: None,
        })?;
        Ok(bytes.to_vec())
    }
}
