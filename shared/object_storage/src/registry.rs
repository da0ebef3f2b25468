//! Client registry keyed by bucket identity

use std::collections::HashMap;
use std::sync::Arc;

use aws_config::SdkConfig;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::Client;
use parking_lot::Mutex;
use tracing::info;

use crate::client::StorageClient;
use crate::error::{StorageError, StorageResult};
use crate::identity::BucketIdentity;

/// Registry of storage clients, one per bucket identity.
///
/// Owned by the application and passed by handle. Identical identities share
/// one [`StorageClient`], so session setup happens once per identity. Entries
/// live for the process lifetime: the set of distinct identities a deployment
/// serves is small and bounded, so nothing is evicted.
#[derive(Debug)]
pub struct ClientRegistry {
    base_config: SdkConfig,
    clients: Mutex<HashMap<BucketIdentity, Arc<StorageClient>>>,
}

impl ClientRegistry {
    /// Creates a registry on top of a pre-configured AWS config.
    ///
    /// The config supplies credentials, retry, and timeout policy from the
    /// external session provider; per-identity region and endpoint settings
    /// are layered on top of it.
    #[must_use]
    pub fn new(base_config: SdkConfig) -> Self {
        Self {
            base_config,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the client for `identity`, constructing it on first request.
    ///
    /// Subsequent calls with an equal identity return the same shared
    /// instance. The lock is held across construction, so concurrent first
    /// access to one identity still constructs exactly once. Construction
    /// failures are not cached; the next call retries.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Configuration` for a malformed identity.
    pub fn get_or_create(&self, identity: &BucketIdentity) -> StorageResult<Arc<StorageClient>> {
        let mut clients = self.clients.lock();

        if let Some(client) = clients.get(identity) {
            return Ok(Arc::clone(client));
        }

        let client = Arc::new(self.build_client(identity)?);
        clients.insert(identity.clone(), Arc::clone(&client));
        Ok(client)
    }

    fn build_client(&self, identity: &BucketIdentity) -> StorageResult<StorageClient> {
        if identity.bucket().is_empty() {
            return Err(StorageError::Configuration(
                "bucket name is empty".to_string(),
            ));
        }
        if identity.region().is_empty() {
            return Err(StorageError::Configuration("region is empty".to_string()));
        }

        let mut builder = aws_sdk_s3::config::Builder::from(&self.base_config)
            .region(Region::new(identity.region().to_string()));

        // A custom endpoint must keep its host: path-style addressing stops
        // the SDK from rewriting it into a bucket-derived virtual host.
        if let Some(endpoint) = identity.endpoint() {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        let client = Client::from_conf(builder.build());

        info!(
            "initialized storage client for bucket {} in {}",
            identity.bucket(),
            identity.region()
        );

        Ok(StorageClient::new(client, identity.clone()))
    }
}
