//! Bucket identity used as the client-registry cache key

use std::collections::BTreeMap;

/// Identifies one logical storage target.
///
/// Equal identities share a single storage client, so the full tuple of
/// bucket, region, endpoint override, and extra parameters participates in
/// equality and hashing. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BucketIdentity {
    bucket: String,
    region: String,
    endpoint: Option<String>,
    extra: BTreeMap<String, String>,
}

impl BucketIdentity {
    /// Creates an identity for a bucket in the given region.
    #[must_use]
    pub fn new(bucket: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            bucket: bucket.into(),
            region: region.into(),
            endpoint: None,
            extra: BTreeMap::new(),
        }
    }

    /// Sets a custom endpoint override for S3-compatible backends.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Attaches an extra identity parameter.
    ///
    /// Extra parameters distinguish otherwise-equal identities in the
    /// registry; they are kept ordered so hashing does not depend on
    /// insertion order.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(name.into(), value.into());
        self
    }

    /// The bucket name.
    #[must_use]
    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    /// The region name.
    #[must_use]
    pub fn region(&self) -> &str {
        &self.region
    }

    /// The endpoint override, if one is configured.
    #[must_use]
    pub fn endpoint(&self) -> Option<&str> {
        self.endpoint.as_deref()
    }
}
