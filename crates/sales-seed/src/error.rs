use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("url error: {0}")]
    Url(#[from] url::ParseError),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("generated rows failed checks: {0}")]
    RowCheck(String),
    #[error("row count mismatch: expected {expected} inserted rows, database reported {actual}")]
    RowCountMismatch { expected: u64, actual: u64 },
}

pub type SeedResult<T> = Result<T, SeedError>;
