//! Object-storage access layer for the image pipeline
//!
//! One [`StorageClient`] per bucket identity, shared through a
//! [`ClientRegistry`] so session setup happens once per identity. Keys are
//! normalized before every operation; presigned URLs grant time-limited
//! access without a separate credential exchange.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

mod client;
mod error;
mod identity;
mod key;
mod registry;
mod sniff;

pub use client::{PresignedUrl, PutOptions, StorageClient, DEFAULT_PRESIGN_EXPIRY_SECS};
pub use error::{StorageError, StorageResult};
pub use identity::BucketIdentity;
pub use key::normalize_key;
pub use registry::ClientRegistry;
pub use sniff::detect_content_type;
