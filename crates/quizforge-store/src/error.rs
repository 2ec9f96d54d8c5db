use thiserror::Error;

/// Persistence failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("corrupt or unserializable store data: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("background write failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type StoreResult<T> = Result<T, StoreError>;
