//! Presigning resolver

use std::sync::Arc;

use bytes::Bytes;
use object_storage::{BucketIdentity, ClientRegistry};
use tracing::{debug, warn};

use crate::error::LoaderResult;
use crate::fetch::ObjectFetcher;

/// Routing decision for one load request, resolved once per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadDecision {
    /// Serve with the generic HTTP fetcher, URL unmodified.
    Bypass,
    /// Presign against object storage, then fetch.
    StorageBacked {
        /// Bucket the request resolves to
        bucket: String,
        /// Object key within the bucket, prior to normalization
        key: String,
    },
}

/// Routing rules for the resolver.
#[derive(Debug, Clone, Default)]
pub struct ResolverConfig {
    /// Region for storage-backed requests
    pub region: String,
    /// Custom endpoint override for S3-compatible backends
    pub endpoint: Option<String>,
    /// Fixed bucket every request resolves to; when unset, the first path
    /// segment of the request names the bucket
    pub root_bucket: Option<String>,
    /// Buckets the resolver will serve; `None` allows any bucket
    pub allowed_buckets: Option<Vec<String>>,
    /// Serve fully qualified http(s) URLs with the generic fetcher instead
    /// of treating them as storage paths
    pub enable_http_bypass: bool,
}

/// Serves image loads either directly over HTTP or through a presigned
/// storage URL.
///
/// Storage clients come from the shared [`ClientRegistry`], so every request
/// for the same bucket identity reuses one session.
#[derive(Debug)]
pub struct PresigningResolver<F> {
    registry: Arc<ClientRegistry>,
    fetcher: F,
    config: ResolverConfig,
}

impl<F: ObjectFetcher> PresigningResolver<F> {
    /// Creates a resolver over a client registry and a fetch capability.
    #[must_use]
    pub const fn new(registry: Arc<ClientRegistry>, fetcher: F, config: ResolverConfig) -> Self {
        Self {
            registry,
            fetcher,
            config,
        }
    }

    /// Resolves the routing decision for `url` without performing any I/O.
    #[must_use]
    pub fn decide(&self, url: &str) -> LoadDecision {
        if self.config.enable_http_bypass
            && (url.starts_with("http://") || url.starts_with("https://"))
        {
            return LoadDecision::Bypass;
        }

        let (bucket, key) = self.split_bucket_and_key(url);
        LoadDecision::StorageBacked { bucket, key }
    }

    /// Loads `url`, returning the fetched bytes, or `None` when the request
    /// resolves to a bucket outside the allow-list. No network call is made
    /// for a declined bucket.
    ///
    /// # Errors
    ///
    /// Propagates storage errors from client construction and presigning,
    /// and fetch errors from the HTTP capability.
    pub async fn load(&self, url: &str) -> LoaderResult<Option<Bytes>> {
        match self.decide(url) {
            LoadDecision::Bypass => {
                debug!("bypassing storage for {url}");
                Ok(Some(self.fetcher.fetch(url).await?))
            }
            LoadDecision::StorageBacked { bucket, key } => {
                if !self.bucket_allowed(&bucket) {
                    warn!("declining to load from bucket {bucket}: not allow-listed");
                    return Ok(None);
                }

                let mut identity = BucketIdentity::new(bucket, self.config.region.clone());
                if let Some(endpoint) = &self.config.endpoint {
                    identity = identity.with_endpoint(endpoint.clone());
                }

                let client = self.registry.get_or_create(&identity)?;
                let presigned = client.presigned_get_url(&key).await?;

                Ok(Some(self.fetcher.fetch(&presigned.url).await?))
            }
        }
    }

    fn bucket_allowed(&self, bucket: &str) -> bool {
        self.config
            .allowed_buckets
            .as_ref()
            .is_none_or(|allowed| allowed.iter().any(|b| b == bucket))
    }

    /// Splits a request path into bucket and key. A configured root bucket
    /// takes precedence and keeps the whole path as the key; otherwise the
    /// first path segment names the bucket.
    fn split_bucket_and_key(&self, url: &str) -> (String, String) {
        if let Some(bucket) = &self.config.root_bucket {
            return (bucket.clone(), url.to_string());
        }

        let trimmed = url.trim_start_matches('/');
        trimmed.split_once('/').map_or_else(
            || (trimmed.to_string(), String::new()),
            |(bucket, key)| (bucket.to_string(), key.to_string()),
        )
    }
}
