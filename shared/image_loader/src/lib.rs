//! Image loading over object storage
//!
//! The [`PresigningResolver`] decides, once per request, whether a URL is
//! served directly by the generic HTTP fetch capability or resolved against
//! object storage: bucket and key are extracted, a presigned URL is
//! generated, and the fetch is delegated with that URL. Callers receive
//! bytes or no result, never the presigned URL itself.

#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    dead_code
)]

mod error;
mod fetch;
mod resolver;

pub use error::{LoaderError, LoaderResult};
pub use fetch::{HttpObjectFetcher, ObjectFetcher};
pub use resolver::{LoadDecision, PresigningResolver, ResolverConfig};
