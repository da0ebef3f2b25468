//! Error types for storage operations

use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::{
    delete_object::DeleteObjectError, get_object::GetObjectError, put_object::PutObjectError,
};
use thiserror::Error;

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur during storage operations
#[derive(Error, Debug)]
pub enum StorageError {
    /// The requested key does not exist
    #[error("Object not found: {0}")]
    NotFound(String),

    /// The backend rejected the request's authorization or signature
    #[error("Access denied: {0}")]
    AccessDenied(String),

    /// Network, timeout, or service-side failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Malformed identity or invalid request shaping
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl StorageError {
    /// Classifies a service error by its HTTP status: 401/403 means the
    /// signature or authorization was rejected, anything else is a
    /// service-side failure.
    fn from_status(status: u16, message: String) -> Self {
        if status == 401 || status == 403 {
            Self::AccessDenied(message)
        } else {
            Self::Transport(message)
        }
    }
}

impl From<SdkError<GetObjectError>> for StorageError {
    fn from(error: SdkError<GetObjectError>) -> Self {
        match error {
            SdkError::ServiceError(err) => {
                if matches!(err.err(), GetObjectError::NoSuchKey(_)) {
                    return Self::NotFound(err.err().to_string());
                }
                Self::from_status(err.raw().status().as_u16(), err.err().to_string())
            }
            other => Self::Transport(other.to_string()),
        }
    }
}

impl From<SdkError<PutObjectError>> for StorageError {
    fn from(error: SdkError<PutObjectError>) -> Self {
        match error {
            SdkError::ServiceError(err) => {
                Self::from_status(err.raw().status().as_u16(), err.err().to_string())
            }
            other => Self::Transport(other.to_string()),
        }
    }
}

// DeleteObject carries no not-found variant: deleting an absent key succeeds
// on the backend, so only authorization and transport failures surface here.
impl From<SdkError<DeleteObjectError>> for StorageError {
    fn from(error: SdkError<DeleteObjectError>) -> Self {
        match error {
            SdkError::ServiceError(err) => {
                Self::from_status(err.raw().status().as_u16(), err.err().to_string())
            }
            other => Self::Transport(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use aws_sdk_s3::error::ErrorMetadata;
    use aws_sdk_s3::types::error::NoSuchKey;
    use aws_smithy_runtime_api::client::orchestrator::HttpResponse;
    use aws_smithy_runtime_api::http::StatusCode;
    use aws_smithy_types::body::SdkBody;

    use super::*;

    fn raw_response(status: u16) -> HttpResponse {
        HttpResponse::new(StatusCode::try_from(status).unwrap(), SdkBody::empty())
    }

    #[test]
    fn missing_get_key_maps_to_not_found() {
        let error = SdkError::service_error(
            GetObjectError::NoSuchKey(NoSuchKey::builder().build()),
            raw_response(404),
        );

        assert!(matches!(StorageError::from(error), StorageError::NotFound(_)));
    }

    #[test]
    fn delete_errors_never_surface_as_not_found() {
        // The backend treats delete as idempotent; even a 404-shaped service
        // error on the delete path classifies as transport, not a missing key.
        let metadata = ErrorMetadata::builder()
            .code("NoSuchKey")
            .message("The specified key does not exist.")
            .build();
        let error = SdkError::service_error(
            DeleteObjectError::generic(metadata),
            raw_response(404),
        );

        assert!(matches!(
            StorageError::from(error),
            StorageError::Transport(_)
        ));
    }

    #[test]
    fn rejected_delete_maps_to_access_denied() {
        let metadata = ErrorMetadata::builder()
            .code("AccessDenied")
            .message("Access Denied")
            .build();
        let error = SdkError::service_error(
            DeleteObjectError::generic(metadata),
            raw_response(403),
        );

        assert!(matches!(
            StorageError::from(error),
            StorageError::AccessDenied(_)
        ));
    }

    #[test]
    fn status_401_and_403_map_to_access_denied() {
        assert!(matches!(
            StorageError::from_status(401, "rejected".to_string()),
            StorageError::AccessDenied(_)
        ));
        assert!(matches!(
            StorageError::from_status(403, "rejected".to_string()),
            StorageError::AccessDenied(_)
        ));
    }

    #[test]
    fn service_side_statuses_map_to_transport() {
        for status in [429, 500, 503] {
            assert!(matches!(
                StorageError::from_status(status, "unavailable".to_string()),
                StorageError::Transport(_)
            ));
        }
    }
}
