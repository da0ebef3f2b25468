//! Generic fetch-by-URL capability

use std::time::Duration;

use bytes::Bytes;

use crate::error::LoaderResult;

/// Default timeout for outbound fetch requests
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Maximum number of idle connections to maintain per host
const MAX_IDLE_CONNECTIONS_PER_HOST: usize = 10;
/// Redirect hops followed before a fetch is abandoned
const MAX_REDIRECTS: usize = 5;

/// Fetches a URL and returns the full response body.
///
/// The resolver delegates to this capability for both bypassed requests and
/// presigned storage URLs.
pub trait ObjectFetcher {
    /// Fetches `url`, returning the response body.
    ///
    /// # Errors
    ///
    /// Returns `LoaderError::Fetch` when the request fails, times out, or
    /// answers with an error status.
    async fn fetch(&self, url: &str) -> LoaderResult<Bytes>;
}

/// HTTP fetcher backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpObjectFetcher {
    http_client: reqwest::Client,
}

impl HttpObjectFetcher {
    /// Creates a fetcher with the default timeout, connection pool, and
    /// redirect policy.
    ///
    /// # Errors
    ///
    /// Returns `LoaderError::Fetch` if the HTTP client cannot be built.
    pub fn new() -> LoaderResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS))
            .pool_max_idle_per_host(MAX_IDLE_CONNECTIONS_PER_HOST)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .build()?;

        Ok(Self { http_client })
    }
}

impl ObjectFetcher for HttpObjectFetcher {
    async fn fetch(&self, url: &str) -> LoaderResult<Bytes> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await?
            .error_for_status()?;

        Ok(response.bytes().await?)
    }
}
