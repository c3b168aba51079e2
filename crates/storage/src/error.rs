use orgmatch_core::Error as CoreError;
use thiserror::Error;

/// Storage-specific error types
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Bulk request failed: {0}")]
    BulkFailed(String),

    #[error("Delete-by-query failed: {0}")]
    SweepFailed(String),

    #[error("Malformed response from index: {0}")]
    MalformedResponse(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<StorageError> for CoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::ConnectionFailed(_) | StorageError::QueryFailed(_) => {
                CoreError::store(err.to_string())
            }
            _ => CoreError::index(err.to_string()),
        }
    }
}
