//! Storage client bound to one bucket identity

use std::collections::HashMap;
use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::{ServerSideEncryption, StorageClass};
use aws_sdk_s3::Client;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use http::Method;
use tracing::{debug, error};

use crate::error::{StorageError, StorageResult};
use crate::identity::BucketIdentity;
use crate::key::normalize_key;
use crate::sniff::detect_content_type;

/// Default validity window for presigned URLs, in seconds.
pub const DEFAULT_PRESIGN_EXPIRY_SECS: u64 = 3600;

/// Presigned URL with expiration information
#[derive(Debug, Clone)]
pub struct PresignedUrl {
    /// The signed URL
    pub url: String,
    /// UTC timestamp when the URL expires
    pub expires_at: DateTime<Utc>,
}

/// Request shaping for [`StorageClient::put`]
#[derive(Debug, Clone, Default)]
pub struct PutOptions {
    /// Metadata stored verbatim with the object
    pub metadata: HashMap<String, String>,
    /// Store under the reduced-redundancy storage class instead of standard
    pub reduced_redundancy: bool,
    /// Apply AES256 server-side encryption
    pub encrypt_key: bool,
}

impl PutOptions {
    fn storage_class(&self) -> StorageClass {
        if self.reduced_redundancy {
            StorageClass::ReducedRedundancy
        } else {
            StorageClass::Standard
        }
    }

    fn server_side_encryption(&self) -> Option<ServerSideEncryption> {
        self.encrypt_key.then_some(ServerSideEncryption::Aes256)
    }
}

/// Storage client for one bucket identity.
///
/// Shared by every caller that resolves the same identity. All operations
/// take `&self` and hold no per-call state, so concurrent invocations do not
/// interfere. Paths are normalized before every operation; no operation is
/// retried at this layer.
#[derive(Debug)]
pub struct StorageClient {
    client: Client,
    identity: BucketIdentity,
}

impl StorageClient {
    pub(crate) const fn new(client: Client, identity: BucketIdentity) -> Self {
        Self { client, identity }
    }

    /// The identity this client serves.
    #[must_use]
    pub const fn identity(&self) -> &BucketIdentity {
        &self.identity
    }

    /// Returns the object stored at `path`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the key does not exist,
    /// `StorageError::AccessDenied` on authorization failure, and
    /// `StorageError::Transport` on network, timeout, or service failure.
    pub async fn get(&self, path: &str) -> StorageResult<Bytes> {
        let key = normalize_key(path);

        let response = self
            .client
            .get_object()
            .bucket(self.identity.bucket())
            .key(&key)
            .send()
            .await
            .map_err(|e| {
                error!("GetObject failed for {key}: {e}");
                StorageError::from(e)
            })?;

        let body = response
            .body
            .collect()
            .await
            .map_err(|e| StorageError::Transport(format!("failed to read object body: {e}")))?;

        Ok(body.into_bytes())
    }

    /// Generates a presigned GET URL for `path` with the default expiry.
    ///
    /// # Errors
    ///
    /// See [`StorageClient::presigned_url`].
    pub async fn presigned_get_url(&self, path: &str) -> StorageResult<PresignedUrl> {
        self.presigned_url(
            path,
            Method::GET,
            Duration::from_secs(DEFAULT_PRESIGN_EXPIRY_SECS),
        )
        .await
    }

    /// Generates a presigned URL for `path`, valid for `expiry`.
    ///
    /// Signing happens locally over the session credentials; no request goes
    /// to the storage backend. Two URLs signed at different timestamps carry
    /// different signatures even for identical inputs.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Configuration` for an unsupported method or an
    /// expiry the signing scheme rejects, `StorageError::Transport` if
    /// credential resolution fails.
    pub async fn presigned_url(
        &self,
        path: &str,
        method: Method,
        expiry: Duration,
    ) -> StorageResult<PresignedUrl> {
        let key = normalize_key(path);

        let config = PresigningConfig::expires_in(expiry)
            .map_err(|e| StorageError::Configuration(format!("invalid presign expiry: {e}")))?;

        let presigned = if method == Method::GET {
            self.client
                .get_object()
                .bucket(self.identity.bucket())
                .key(&key)
                .presigned(config)
                .await
                .map_err(StorageError::from)?
        } else if method == Method::PUT {
            self.client
                .put_object()
                .bucket(self.identity.bucket())
                .key(&key)
                .presigned(config)
                .await
                .map_err(StorageError::from)?
        } else {
            return Err(StorageError::Configuration(format!(
                "unsupported presign method: {method}"
            )));
        };

        let expires_at: DateTime<Utc> = Utc::now() + expiry;

        debug!("generated presigned {method} URL for {key}, expires at {expires_at}");

        Ok(PresignedUrl {
            url: presigned.uri().to_string(),
            expires_at,
        })
    }

    /// Stores `data` at `path`.
    ///
    /// The storage class is reduced-redundancy when requested and standard
    /// otherwise; the content type is derived from the payload bytes, falling
    /// back to `application/octet-stream`; metadata is attached verbatim;
    /// `encrypt_key` adds an AES256 server-side-encryption directive.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::AccessDenied` on authorization failure and
    /// `StorageError::Transport` on network, timeout, or service failure.
    pub async fn put(&self, path: &str, data: Bytes, options: PutOptions) -> StorageResult<()> {
        let key = normalize_key(path);
        let content_type = detect_content_type(&data);
        let storage_class = options.storage_class();
        let encryption = options.server_side_encryption();

        self.client
            .put_object()
            .bucket(self.identity.bucket())
            .key(&key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .storage_class(storage_class)
            .set_server_side_encryption(encryption)
            .set_metadata((!options.metadata.is_empty()).then_some(options.metadata))
            .send()
            .await
            .map_err(|e| {
                error!("PutObject failed for {key}: {e}");
                StorageError::from(e)
            })?;

        debug!("stored object {key} as {content_type}");
        Ok(())
    }

    /// Deletes the object at `path`.
    ///
    /// Deleting a nonexistent key succeeds: the backend treats delete as
    /// idempotent and so does this client.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::AccessDenied` on authorization failure and
    /// `StorageError::Transport` on network, timeout, or service failure.
    pub async fn delete(&self, path: &str) -> StorageResult<()> {
        let key = normalize_key(path);

        self.client
            .delete_object()
            .bucket(self.identity.bucket())
            .key(&key)
            .send()
            .await
            .map_err(|e| {
                error!("DeleteObject failed for {key}: {e}");
                StorageError::from(e)
            })?;

        debug!("deleted object {key}");
        Ok(())
    }
}
