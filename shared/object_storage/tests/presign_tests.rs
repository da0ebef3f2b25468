use std::sync::Arc;
use std::time::Duration;

use aws_config::{BehaviorVersion, Region};
use aws_credential_types::Credentials;
use http::Method;
use object_storage::{BucketIdentity, ClientRegistry, StorageClient, StorageError};

const TEST_REGION: &str = "us-east-1";
const TEST_ENDPOINT: &str = "http://localhost:4566";

/// Builds a client against a fixed endpoint with hardcoded credentials.
/// Presigning is a local signing operation, so none of these tests touch the
/// network.
async fn test_client(bucket: &str) -> Arc<StorageClient> {
    let credentials = Credentials::from_keys("test", "test", None);
    let config = aws_config::defaults(BehaviorVersion::latest())
        .region(Region::new(TEST_REGION))
        .credentials_provider(credentials)
        .load()
        .await;

    let registry = ClientRegistry::new(config);
    registry
        .get_or_create(&BucketIdentity::new(bucket, TEST_REGION).with_endpoint(TEST_ENDPOINT))
        .unwrap()
}

/// Extracts a query parameter value from a presigned URL.
fn query_param(url: &str, name: &str) -> Option<String> {
    let (_, query) = url.split_once('?')?;
    query.split('&').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key == name).then(|| value.to_string())
    })
}

#[tokio::test]
async fn presigned_get_url_addresses_the_normalized_key() {
    let client = test_client("images").await;

    let presigned = client.presigned_get_url("//foo//bar.png").await.unwrap();

    // Path-style URL against the custom endpoint, with the cleaned key
    assert!(
        presigned
            .url
            .starts_with("http://localhost:4566/images/foo/bar.png?"),
        "unexpected presigned URL: {}",
        presigned.url
    );
}

#[tokio::test]
async fn presigned_get_url_uses_the_default_expiry() {
    let client = test_client("images").await;

    let presigned = client.presigned_get_url("foo/bar.png").await.unwrap();

    assert_eq!(
        query_param(&presigned.url, "X-Amz-Expires").as_deref(),
        Some("3600")
    );

    let remaining = presigned.expires_at - chrono::Utc::now();
    assert!(remaining <= chrono::TimeDelta::seconds(3600));
    assert!(remaining > chrono::TimeDelta::seconds(3590));
}

#[tokio::test]
async fn presigned_url_carries_v4_signature_parameters() {
    let client = test_client("images").await;

    let presigned = client
        .presigned_url("foo/bar.png", Method::GET, Duration::from_secs(300))
        .await
        .unwrap();

    assert_eq!(
        query_param(&presigned.url, "X-Amz-Algorithm").as_deref(),
        Some("AWS4-HMAC-SHA256")
    );
    assert_eq!(
        query_param(&presigned.url, "X-Amz-Expires").as_deref(),
        Some("300")
    );
    assert!(query_param(&presigned.url, "X-Amz-Credential").is_some());
    assert!(query_param(&presigned.url, "X-Amz-SignedHeaders").is_some());
    assert!(query_param(&presigned.url, "X-Amz-Signature").is_some());
}

#[tokio::test]
async fn signatures_differ_across_signing_timestamps() {
    let client = test_client("images").await;

    let first = client.presigned_get_url("foo/bar.png").await.unwrap();
    // X-Amz-Date has second resolution; cross a second boundary so the
    // embedded timestamp, and with it the signature, must change.
    tokio::time::sleep(Duration::from_millis(1100)).await;
    let second = client.presigned_get_url("foo/bar.png").await.unwrap();

    assert_ne!(
        query_param(&first.url, "X-Amz-Signature"),
        query_param(&second.url, "X-Amz-Signature")
    );
}

#[tokio::test]
async fn put_urls_are_supported_and_other_methods_rejected() {
    let client = test_client("images").await;

    let put_url = client
        .presigned_url("foo/bar.png", Method::PUT, Duration::from_secs(600))
        .await
        .unwrap();
    assert!(put_url.url.contains("/images/foo/bar.png?"));

    assert!(matches!(
        client
            .presigned_url("foo/bar.png", Method::DELETE, Duration::from_secs(600))
            .await,
        Err(StorageError::Configuration(_))
    ));
}
